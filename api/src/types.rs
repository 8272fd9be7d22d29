//! Wire types exchanged with the backend.
//!
//! Field names follow the backend's JSON exactly (snake_case, plus the
//! camelCase `scaleX`/`scaleY` inside item transforms). Server-managed fields
//! such as `created_at` are kept as the ISO-8601 strings the server sends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub type UserId = i64;
pub type ProjectId = i64;
pub type VariantId = i64;
pub type ItemInstanceId = i64;

/// Free-form JSON object attached to images and variants.
pub type Metadata = Map<String, Value>;

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Bearer access token plus the refresh token that renews it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Confirmation; must equal `password`.
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    #[serde(default)]
    pub message: String,
}

/// Body of a successful token refresh. The refresh token is only present
/// when the server rotates it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct RefreshedAccess {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// =============================================================================
// PROJECTS
// =============================================================================

/// Full project with nested images, variants and versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub owner: Option<UserId>,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub variants: Vec<DesignVariant>,
    #[serde(default)]
    pub versions: Vec<Version>,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Most recent image of `kind`. The server lists images newest first.
    #[must_use]
    pub fn latest_image(&self, kind: ImageKind) -> Option<&ProjectImage> {
        self.images.iter().find(|img| img.kind == kind)
    }
}

/// Lightweight project row returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub variant_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Role of an uploaded image within a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// The user's room photo.
    #[default]
    Original,
    /// Inspiration reference.
    Inspo,
    /// Produced by the generator.
    Generated,
}

impl ImageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Inspo => "inspo",
            Self::Generated => "generated",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "inspo" => Ok(Self::Inspo),
            "generated" => Ok(Self::Generated),
            other => Err(format!("unknown image type '{other}' (expected original, inspo or generated)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: i64,
    pub project: ProjectId,
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub image_url: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: String,
}

/// An image file ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// MIME type guessed from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUpload`] for empty files and extensions
    /// that aren't a supported image format.
    pub fn mime_type(&self) -> Result<&'static str, ApiError> {
        if self.bytes.is_empty() {
            return Err(ApiError::InvalidUpload(format!("{} is empty", self.file_name)));
        }
        let ext = self.file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok("image/jpeg"),
            "png" => Ok("image/png"),
            "webp" => Ok("image/webp"),
            "gif" => Ok("image/gif"),
            _ => Err(ApiError::InvalidUpload(format!("{} is not a supported image type", self.file_name))),
        }
    }
}

/// Reply to a generation request. The variant itself appears later in the
/// variant list; there is no completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationAccepted {
    #[serde(default)]
    pub message: String,
    pub task_id: String,
    pub project_id: ProjectId,
}

// =============================================================================
// VARIANTS AND ITEMS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignVariant {
    pub id: VariantId,
    pub project: ProjectId,
    pub image_url: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub items: Vec<ItemInstance>,
    pub created_at: String,
}

/// Axis-aligned box in the variant image's pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// Canvas placement of an item. Every field is optional on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(rename = "scaleX", default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(rename = "scaleY", default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

/// An item detected in (or added to) a design variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemInstanceId,
    pub variant: VariantId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub bbox: BBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_url: Option<String>,
    #[serde(default)]
    pub transform: ItemTransform,
    pub created_at: String,
}

/// Body for creating an item under a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstanceDraft {
    pub variant: VariantId,
    pub name: String,
    pub category: String,
    pub bbox: BBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_url: Option<String>,
    pub transform: ItemTransform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInstancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<ItemTransform>,
}

/// Saved snapshot of a project's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: i64,
    pub project: ProjectId,
    #[serde(default)]
    pub snapshot: Value,
    #[serde(default)]
    pub prompt: String,
    pub created_at: String,
}

// =============================================================================
// LISTINGS
// =============================================================================

/// A list endpoint body: either a bare array or a paginated page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Page { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Page { results } => results,
            Self::Bare(items) => items,
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
