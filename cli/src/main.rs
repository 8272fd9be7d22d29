use std::path::{Path, PathBuf};
use std::sync::Arc;

use api::config::ApiConfig;
use api::types::{
    BBox, ImageKind, ItemInstanceDraft, ItemInstancePatch, ItemTransform, LoginCredentials, ProjectPatch,
    RegisterData, UploadFile,
};
use api::{ApiClient, ApiError, ItemService, ProjectService, TokenStore};
use clap::{Args, Parser, Subcommand};
use dreamspace::{PollConfig, PollOutcome, spawn_variant_poll};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing access token; run `login` or set DREAMSPACE_ACCESS_TOKEN")]
    MissingAccessToken,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("cannot read {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("variant poll {0}")]
    Poll(String),
}

#[derive(Parser, Debug)]
#[command(name = "dreamspace-cli", about = "DreamSpace backend CLI")]
struct Cli {
    #[arg(long, env = "DREAMSPACE_API_URL", default_value = api::config::DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, env = "DREAMSPACE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "DREAMSPACE_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is up.
    Health,
    /// Exchange credentials for a token pair and print it.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DREAMSPACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    /// Print the signed-in user.
    Profile,
    Project(ProjectCommand),
    Item(ItemCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "DREAMSPACE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

#[derive(Args, Debug)]
struct ProjectCommand {
    #[command(subcommand)]
    command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectSubcommand {
    List,
    Get {
        project_id: i64,
    },
    Create {
        #[arg(long, default_value = "Untitled Project")]
        name: String,
    },
    Update {
        project_id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    Delete {
        project_id: i64,
    },
    /// Upload a room photo or inspiration image.
    Upload {
        project_id: i64,
        path: PathBuf,
        #[arg(long, default_value = "original")]
        kind: ImageKind,
    },
    /// Request a new design variant.
    Generate {
        project_id: i64,
        #[arg(long)]
        prompt: String,
        /// Poll until the variant shows up and print the variant list.
        #[arg(long, default_value_t = false)]
        wait: bool,
    },
    Variants {
        project_id: i64,
    },
    Versions {
        project_id: i64,
    },
}

#[derive(Args, Debug)]
struct ItemCommand {
    #[command(subcommand)]
    command: ItemSubcommand,
}

#[derive(Subcommand, Debug)]
enum ItemSubcommand {
    /// Place an item on a variant.
    Add {
        variant_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    /// Patch an item with a JSON body, e.g. '{"transform":{"rotation":90}}'.
    Update {
        item_id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        item_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let timeouts = ApiConfig::from_env()?.timeouts;
    let config = ApiConfig { timeouts, ..ApiConfig::new(&cli.base_url)? };
    let tokens = TokenStore::from_parts(cli.access_token, cli.refresh_token);
    let client = ApiClient::new(&config, tokens)?;

    match cli.command {
        Command::Health => print_json(&client.health().await?),
        Command::Login { username, password } => {
            let tokens = client.login(&LoginCredentials { username, password }).await?;
            print_json(&tokens)
        }
        Command::Register(args) => run_register(&client, args).await,
        Command::Profile => {
            require_token(&client).await?;
            print_json(&client.profile().await?)
        }
        Command::Project(project) => {
            require_token(&client).await?;
            run_project(client, project).await
        }
        Command::Item(item) => {
            require_token(&client).await?;
            run_item(&client, item).await
        }
    }
}

async fn require_token(client: &ApiClient) -> Result<(), CliError> {
    if client.tokens().is_authenticated().await || client.tokens().refresh().await.is_some() {
        Ok(())
    } else {
        Err(CliError::MissingAccessToken)
    }
}

async fn run_register(client: &ApiClient, args: RegisterArgs) -> Result<(), CliError> {
    let data = RegisterData {
        username: args.username,
        email: args.email,
        password2: args.password.clone(),
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    print_json(&client.register(&data).await?)
}

async fn run_project(client: ApiClient, project: ProjectCommand) -> Result<(), CliError> {
    match project.command {
        ProjectSubcommand::List => print_json(&client.list_projects().await?),
        ProjectSubcommand::Get { project_id } => print_json(&client.get_project(project_id).await?),
        ProjectSubcommand::Create { name } => print_json(&client.create_project(&name).await?),
        ProjectSubcommand::Update { project_id, name } => {
            let patch = ProjectPatch { name };
            print_json(&client.update_project(project_id, &patch).await?)
        }
        ProjectSubcommand::Delete { project_id } => {
            client.delete_project(project_id).await?;
            print_json(&serde_json::json!({ "deleted": project_id }))
        }
        ProjectSubcommand::Upload { project_id, path, kind } => {
            let file = read_upload(&path)?;
            print_json(&client.upload_image(project_id, file, kind).await?)
        }
        ProjectSubcommand::Generate { project_id, prompt, wait } => {
            run_generate(client, project_id, &prompt, wait).await
        }
        ProjectSubcommand::Variants { project_id } => print_json(&client.list_variants(project_id).await?),
        ProjectSubcommand::Versions { project_id } => print_json(&client.list_versions(project_id).await?),
    }
}

async fn run_generate(client: ApiClient, project_id: i64, prompt: &str, wait: bool) -> Result<(), CliError> {
    let baseline = if wait { client.list_variants(project_id).await?.len() } else { 0 };
    let accepted = client.generate_variant(project_id, prompt).await?;
    if !wait {
        return print_json(&accepted);
    }

    tracing::info!(project_id, task_id = %accepted.task_id, baseline, "waiting for variant");
    let handle = spawn_variant_poll(Arc::new(client), project_id, baseline, PollConfig::from_env());
    match handle.wait().await {
        PollOutcome::Ready(variants) => print_json(&variants),
        PollOutcome::Exhausted(_) => Err(CliError::Poll("gave up before a new variant appeared".to_owned())),
        PollOutcome::Cancelled => Err(CliError::Poll("was cancelled".to_owned())),
        PollOutcome::Failed(e) => Err(CliError::Api(e)),
    }
}

async fn run_item(client: &ApiClient, item: ItemCommand) -> Result<(), CliError> {
    match item.command {
        ItemSubcommand::Add { variant_id, name, category, x, y, width, height } => {
            let draft = ItemInstanceDraft {
                variant: variant_id,
                name,
                category,
                bbox: BBox { x, y, width, height },
                mask_url: None,
                transform: ItemTransform { x: Some(x), y: Some(y), ..ItemTransform::default() },
            };
            print_json(&client.add_item(variant_id, &draft).await?)
        }
        ItemSubcommand::Update { item_id, data } => {
            let patch = serde_json::from_str::<ItemInstancePatch>(&data)?;
            print_json(&client.update_item(item_id, &patch).await?)
        }
        ItemSubcommand::Delete { item_id } => {
            client.delete_item(item_id).await?;
            print_json(&serde_json::json!({ "deleted": item_id }))
        }
    }
}

fn read_upload(path: &Path) -> Result<UploadFile, CliError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CliError::ReadFile { path: path.display().to_string(), message: e.to_string() })?;
    let file_name = path.file_name().map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(UploadFile::new(file_name, bytes))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
