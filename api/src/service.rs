//! Service seams between editing sessions and the backend.
//!
//! Every call is async and may fail with a transport, status or
//! [`ApiError::SessionExpired`] error. Callers treat any failure as "the
//! operation did not happen".

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    DesignVariant, GenerationAccepted, ImageKind, ItemInstance, ItemInstanceDraft, ItemInstanceId, ItemInstancePatch,
    Project, ProjectId, ProjectImage, ProjectPatch, ProjectSummary, UploadFile, VariantId, Version,
};

/// Projects, their images and their generated variants.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError>;

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError>;

    async fn create_project(&self, name: &str) -> Result<Project, ApiError>;

    async fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> Result<Project, ApiError>;

    async fn delete_project(&self, id: ProjectId) -> Result<(), ApiError>;

    /// Upload an image and attach it to the project as `kind`.
    async fn upload_image(&self, id: ProjectId, file: UploadFile, kind: ImageKind) -> Result<ProjectImage, ApiError>;

    /// Queue variant generation. Completion is only observable by polling
    /// [`ProjectService::list_variants`].
    async fn generate_variant(&self, id: ProjectId, prompt: &str) -> Result<GenerationAccepted, ApiError>;

    async fn list_variants(&self, id: ProjectId) -> Result<Vec<DesignVariant>, ApiError>;

    async fn list_versions(&self, id: ProjectId) -> Result<Vec<Version>, ApiError>;
}

/// Server-side items of a design variant.
#[async_trait]
pub trait ItemService: Send + Sync {
    async fn add_item(&self, variant: VariantId, draft: &ItemInstanceDraft) -> Result<ItemInstance, ApiError>;

    async fn update_item(&self, item: ItemInstanceId, patch: &ItemInstancePatch) -> Result<ItemInstance, ApiError>;

    async fn delete_item(&self, item: ItemInstanceId) -> Result<(), ApiError>;
}
