//! The item abstraction shared by both editing surfaces.
//!
//! An [`Item`] is anything the registry can hold: it has a caller-supplied
//! string id, accepts a sparse patch, and can check its own geometry. The 2D
//! [`crate::canvas_item::CanvasItem`] and 3D [`crate::scene_item::SceneItem`]
//! both implement it, so one [`crate::editor::Editor`] serves both surfaces.

/// Caller-supplied identifier of a placed item, unique within a registry.
pub type ItemId = String;

/// Errors returned when an edit is rejected before it reaches the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// An item with this id is already placed.
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),

    /// The item (or the result of applying a patch to it) has unusable geometry.
    #[error("invalid geometry for {id}: {reason}")]
    InvalidGeometry { id: ItemId, reason: String },
}

impl EditError {
    /// Grepable error code for logs and UI messages.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::InvalidGeometry { .. } => "E_INVALID_GEOMETRY",
        }
    }
}

/// A placed design element that can live in a registry.
pub trait Item: Clone + std::fmt::Debug {
    /// Sparse update: only present fields are applied.
    type Patch: Clone + std::fmt::Debug;

    /// The item's id.
    fn id(&self) -> &str;

    /// Merge the present fields of `patch` into this item.
    fn apply(&mut self, patch: &Self::Patch);

    /// Check that the item's geometry can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidGeometry`] naming the first offending field.
    fn validate(&self) -> Result<(), EditError>;
}

pub(crate) fn ensure_finite(id: &str, field: &str, value: f64) -> Result<(), EditError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(EditError::InvalidGeometry { id: id.to_owned(), reason: format!("{field} is not finite") })
}

pub(crate) fn ensure_nonzero(id: &str, field: &str, value: f64) -> Result<(), EditError> {
    ensure_finite(id, field, value)?;
    if value == 0.0 {
        return Err(EditError::InvalidGeometry { id: id.to_owned(), reason: format!("{field} is zero") });
    }
    Ok(())
}
