//! In-memory backend doubles shared by the session and poll tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use api::types::{
    BBox, DesignVariant, GenerationAccepted, ImageKind, ItemInstance, ItemInstanceDraft, ItemInstanceId,
    ItemInstancePatch, ItemTransform, Metadata, Project, ProjectId, ProjectImage, ProjectPatch, ProjectSummary,
    UploadFile, VariantId, Version,
};
use api::{ApiError, ItemService, ProjectService};
use async_trait::async_trait;

pub fn variant(id: VariantId, project: ProjectId, items: Vec<ItemInstance>) -> DesignVariant {
    DesignVariant {
        id,
        project,
        image_url: format!("https://cdn/variant-{id}.png"),
        metadata: Metadata::new(),
        items,
        created_at: "2026-01-01T00:00:00Z".into(),
    }
}

pub fn instance(id: ItemInstanceId, variant: VariantId) -> ItemInstance {
    ItemInstance {
        id,
        variant,
        name: format!("Item {id}"),
        category: "sofa".into(),
        bbox: BBox { x: 10.0, y: 20.0, width: 200.0, height: 80.0 },
        mask_url: None,
        transform: ItemTransform::default(),
        created_at: "2026-01-01T00:00:00Z".into(),
    }
}

pub fn image(id: i64, project: ProjectId, kind: ImageKind, url: &str) -> ProjectImage {
    ProjectImage {
        id,
        project,
        kind,
        image_url: url.into(),
        metadata: Metadata::new(),
        created_at: "2026-01-01T00:00:00Z".into(),
    }
}

pub fn project(id: ProjectId, images: Vec<ProjectImage>) -> Project {
    Project {
        id,
        name: format!("Project {id}"),
        owner: Some(1),
        owner_username: "ada".into(),
        images,
        variants: Vec::new(),
        versions: Vec::new(),
        created_at: "2026-01-01T00:00:00Z".into(),
        updated_at: "2026-01-01T00:00:00Z".into(),
    }
}

fn unsupported<T>() -> Result<T, ApiError> {
    Err(ApiError::Status { status: 501, body: "not stubbed".into() })
}

#[derive(Debug, Default)]
pub struct MockState {
    pub projects: Vec<Project>,
    /// Served by `list_variants` once `variant_script` is drained.
    pub variants: Vec<DesignVariant>,
    /// Per-call replies for `list_variants`, consumed front to back.
    pub variant_script: VecDeque<Result<Vec<DesignVariant>, ApiError>>,
    /// When set, every call fails with this error.
    pub fail_with: Option<ApiError>,
    pub uploads: Vec<(ProjectId, String, ImageKind)>,
    pub prompts: Vec<String>,
    pub variant_calls: usize,
    pub project_calls: usize,
}

#[derive(Debug, Default)]
pub struct MockProjects {
    pub state: Mutex<MockState>,
}

impl MockProjects {
    pub fn with(state: MockState) -> Self {
        Self { state: Mutex::new(state) }
    }

    pub fn fail_with(&self, error: Option<ApiError>) {
        self.state.lock().unwrap().fail_with = error;
    }

    pub fn variant_calls(&self) -> usize {
        self.state.lock().unwrap().variant_calls
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.state.lock().unwrap().fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectService for MockProjects {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        unsupported()
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.project_calls += 1;
        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ApiError::Status { status: 404, body: "Not found.".into() })
    }

    async fn create_project(&self, _name: &str) -> Result<Project, ApiError> {
        unsupported()
    }

    async fn update_project(&self, _id: ProjectId, _patch: &ProjectPatch) -> Result<Project, ApiError> {
        unsupported()
    }

    async fn delete_project(&self, _id: ProjectId) -> Result<(), ApiError> {
        unsupported()
    }

    async fn upload_image(&self, id: ProjectId, file: UploadFile, kind: ImageKind) -> Result<ProjectImage, ApiError> {
        self.check()?;
        file.mime_type()?;
        let url = format!("https://cdn/{}", file.file_name);
        let mut state = self.state.lock().unwrap();
        state.uploads.push((id, file.file_name, kind));
        let uploaded = image(100 + i64::try_from(state.uploads.len()).unwrap(), id, kind, &url);
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == id) {
            project.images.insert(0, uploaded.clone());
        }
        Ok(uploaded)
    }

    async fn generate_variant(&self, id: ProjectId, prompt: &str) -> Result<GenerationAccepted, ApiError> {
        self.check()?;
        self.state.lock().unwrap().prompts.push(prompt.to_owned());
        Ok(GenerationAccepted { message: "queued".into(), task_id: "task-1".into(), project_id: id })
    }

    async fn list_variants(&self, _id: ProjectId) -> Result<Vec<DesignVariant>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.variant_calls += 1;
        if let Some(reply) = state.variant_script.pop_front() {
            return reply;
        }
        if let Some(e) = &state.fail_with {
            return Err(e.clone());
        }
        Ok(state.variants.clone())
    }

    async fn list_versions(&self, _id: ProjectId) -> Result<Vec<Version>, ApiError> {
        unsupported()
    }
}

#[derive(Debug, Default)]
pub struct MockItems {
    pub added: Mutex<Vec<ItemInstanceDraft>>,
    pub updated: Mutex<Vec<(ItemInstanceId, ItemInstancePatch)>>,
}

#[async_trait]
impl ItemService for MockItems {
    async fn add_item(&self, variant: VariantId, draft: &ItemInstanceDraft) -> Result<ItemInstance, ApiError> {
        let mut added = self.added.lock().unwrap();
        added.push(draft.clone());
        let id = 500 + i64::try_from(added.len()).unwrap();
        Ok(ItemInstance {
            id,
            variant,
            name: draft.name.clone(),
            category: draft.category.clone(),
            bbox: draft.bbox,
            mask_url: None,
            transform: draft.transform,
            created_at: "2026-01-01T00:00:00Z".into(),
        })
    }

    async fn update_item(&self, item: ItemInstanceId, patch: &ItemInstancePatch) -> Result<ItemInstance, ApiError> {
        self.updated.lock().unwrap().push((item, patch.clone()));
        let mut stored = instance(item, 0);
        if let Some(bbox) = patch.bbox {
            stored.bbox = bbox;
        }
        Ok(stored)
    }

    async fn delete_item(&self, _item: ItemInstanceId) -> Result<(), ApiError> {
        Ok(())
    }
}
