//! reqwest implementation of the backend services.
//!
//! DESIGN
//! ======
//! Every authorized call goes through [`ApiClient::send_authorized`], which
//! takes a closure that builds the request rather than a built request. The
//! closure runs again for the single replay after a token refresh, so bodies
//! that can't be cloned (multipart forms) are rebuilt instead.
//!
//! ERROR HANDLING
//! ==============
//! A 401 triggers exactly one refresh and one replay. A missing refresh token,
//! a rejected refresh or a second 401 clears the stored tokens and surfaces
//! [`ApiError::SessionExpired`]; nothing retries past that point. All other
//! non-success statuses come back as [`ApiError::Status`] with the raw body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::service::{ItemService, ProjectService};
use crate::types::{
    AuthTokens, DesignVariant, GenerationAccepted, HealthStatus, ImageKind, ItemInstance, ItemInstanceDraft,
    ItemInstanceId, ItemInstancePatch, Listing, LoginCredentials, Project, ProjectId, ProjectImage, ProjectPatch,
    ProjectSummary, RefreshedAccess, RegisterData, RegisterResponse, UploadFile, User, UserPatch, VariantId, Version,
};

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for one backend, sharing a [`TokenStore`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend can't be initialized.
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), tokens })
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // --- Unauthenticated endpoints ---

    /// `GET /api/health/`.
    ///
    /// # Errors
    ///
    /// Transport, status or parse failures.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = send(self.http.get(self.url("/api/health/"))).await?;
        read_json(response).await
    }

    /// Exchange credentials for a token pair and store it.
    ///
    /// # Errors
    ///
    /// Bad credentials come back as [`ApiError::Status`] (401), not as
    /// [`ApiError::SessionExpired`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthTokens, ApiError> {
        let response = send(self.http.post(self.url("/api/auth/token/")).json(credentials)).await?;
        let tokens: AuthTokens = read_json(response).await?;
        self.tokens.set(tokens.clone()).await;
        debug!(username = %credentials.username, "logged in");
        Ok(tokens)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Validation failures come back as [`ApiError::Status`] (400) with the
    /// server's field errors in the body.
    pub async fn register(&self, data: &RegisterData) -> Result<RegisterResponse, ApiError> {
        let response = send(self.http.post(self.url("/api/users/register/")).json(data)).await?;
        read_json(response).await
    }

    /// Forget the stored tokens.
    pub async fn logout(&self) {
        self.tokens.clear().await;
    }

    // --- Authenticated endpoints ---

    /// # Errors
    ///
    /// See [`ApiClient::send_authorized`].
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get_json("/api/users/profile/").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_authorized`].
    pub async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        self.send_json(Method::PATCH, "/api/users/profile/", patch).await
    }

    /// Trade the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// [`ApiError::SessionExpired`] when no refresh token is held; otherwise
    /// the refresh call's own failure.
    pub async fn refresh_access(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.tokens.refresh().await else {
            return Err(ApiError::SessionExpired);
        };
        let request = self.http.post(self.url("/api/auth/token/refresh/")).json(&json!({ "refresh": refresh }));
        let renewed: RefreshedAccess = read_json(send(request).await?).await?;
        self.tokens.renew(renewed.access, renewed.refresh).await;
        debug!("access token refreshed");
        Ok(())
    }

    /// Send a bearer-authorized request, refreshing and replaying it once on 401.
    ///
    /// # Errors
    ///
    /// [`ApiError::SessionExpired`] when the refresh-once policy gives up,
    /// [`ApiError::Request`] on transport failure, or whatever `build` returns.
    async fn send_authorized<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError> + Send + Sync,
    {
        let response = self.dispatch(build()?).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(url = %response.url(), "access token rejected, refreshing once");
        if let Err(e) = self.refresh_access().await {
            warn!(error = %e, code = e.error_code(), "token refresh failed, ending session");
            self.tokens.clear().await;
            return Err(ApiError::SessionExpired);
        }

        let retried = self.dispatch(build()?).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %retried.url(), "refreshed token rejected, ending session");
            self.tokens.clear().await;
            return Err(ApiError::SessionExpired);
        }
        Ok(retried)
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.tokens.access().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        send(request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send_authorized(|| Ok(self.http.get(&url))).await?;
        read_json(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send_authorized(|| Ok(self.http.request(method.clone(), &url).json(body))).await?;
        read_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let response = self.send_authorized(|| Ok(self.http.delete(&url))).await?;
        ensure_success(response).await.map(|_| ())
    }
}

// =============================================================================
// SERVICES
// =============================================================================

#[async_trait]
impl ProjectService for ApiClient {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        let listing: Listing<ProjectSummary> = self.get_json("/api/projects/").await?;
        Ok(listing.into_vec())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.get_json(&format!("/api/projects/{id}/")).await
    }

    async fn create_project(&self, name: &str) -> Result<Project, ApiError> {
        self.send_json(Method::POST, "/api/projects/", &json!({ "name": name })).await
    }

    async fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> Result<Project, ApiError> {
        self.send_json(Method::PATCH, &format!("/api/projects/{id}/"), patch).await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), ApiError> {
        self.delete(&format!("/api/projects/{id}/")).await
    }

    async fn upload_image(&self, id: ProjectId, file: UploadFile, kind: ImageKind) -> Result<ProjectImage, ApiError> {
        let mime = file.mime_type()?;
        let url = self.url(&format!("/api/projects/{id}/upload/"));
        let size = file.bytes.len();
        let response = self
            .send_authorized(|| {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(mime)
                    .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
                let form = Form::new().part("image", part).text("type", kind.as_str());
                Ok(self.http.post(&url).multipart(form))
            })
            .await?;
        let image: ProjectImage = read_json(response).await?;
        debug!(project_id = id, %kind, size, image_id = image.id, "image uploaded");
        Ok(image)
    }

    async fn generate_variant(&self, id: ProjectId, prompt: &str) -> Result<GenerationAccepted, ApiError> {
        let accepted: GenerationAccepted =
            self.send_json(Method::POST, &format!("/api/projects/{id}/generate/"), &json!({ "prompt": prompt })).await?;
        debug!(project_id = id, task_id = %accepted.task_id, "variant generation queued");
        Ok(accepted)
    }

    async fn list_variants(&self, id: ProjectId) -> Result<Vec<DesignVariant>, ApiError> {
        let listing: Listing<DesignVariant> = self.get_json(&format!("/api/projects/{id}/variants/")).await?;
        Ok(listing.into_vec())
    }

    async fn list_versions(&self, id: ProjectId) -> Result<Vec<Version>, ApiError> {
        let listing: Listing<Version> = self.get_json(&format!("/api/projects/{id}/versions/")).await?;
        Ok(listing.into_vec())
    }
}

#[async_trait]
impl ItemService for ApiClient {
    async fn add_item(&self, variant: VariantId, draft: &ItemInstanceDraft) -> Result<ItemInstance, ApiError> {
        self.send_json(Method::POST, &format!("/api/projects/variants/{variant}/items/"), draft).await
    }

    async fn update_item(&self, item: ItemInstanceId, patch: &ItemInstancePatch) -> Result<ItemInstance, ApiError> {
        self.send_json(Method::PATCH, &format!("/api/projects/items/{item}/"), patch).await
    }

    async fn delete_item(&self, item: ItemInstanceId) -> Result<(), ApiError> {
        self.delete(&format!("/api/projects/items/{item}/")).await
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError::Request(e.to_string()))
}

/// Read the body, turning a non-success status into [`ApiError::Status`].
async fn ensure_success(response: Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, body: text });
    }
    Ok(text)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = ensure_success(response).await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
