//! 2D canvas items: rectangles, images and text placed over the room photo.
//!
//! Geometry is in canvas units with the origin at the top-left of the stage.
//! `rotation` is clockwise degrees around the item's own `(x, y)` origin, and
//! `scale_x` / `scale_y` are the renderer's transient scale factors, which a
//! finished resize folds back into `width` / `height` (see
//! [`crate::gesture::normalize_transform`]).

#[cfg(test)]
#[path = "canvas_item_test.rs"]
mod canvas_item_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FILL, DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH, DEFAULT_RECT_X, DEFAULT_RECT_Y, MIN_DIMENSION};
use crate::item::{EditError, Item, ItemId, ensure_finite, ensure_nonzero};

/// What a canvas item draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasItemKind {
    /// Bitmap referenced by `url`.
    Image,
    /// Filled rectangle.
    Rect,
    /// Text label.
    Text,
}

/// A 2D item on the design canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    /// Caller-supplied identifier.
    pub id: ItemId,
    /// What the item draws.
    pub kind: CanvasItemKind,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Furniture category (e.g. `"Sofas"`).
    #[serde(default)]
    pub category: String,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Image source for [`CanvasItemKind::Image`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Fill color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Label for [`CanvasItemKind::Text`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CanvasItem {
    /// The rectangle the toolbar's "Add Item" button places.
    #[must_use]
    pub fn rect(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            kind: CanvasItemKind::Rect,
            name: String::new(),
            category: String::new(),
            x: DEFAULT_RECT_X,
            y: DEFAULT_RECT_Y,
            width: DEFAULT_RECT_WIDTH,
            height: DEFAULT_RECT_HEIGHT,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            url: None,
            fill: Some(DEFAULT_FILL.to_owned()),
            text: None,
        }
    }

    /// Fill color, falling back to the default rectangle blue.
    #[must_use]
    pub fn fill_or_default(&self) -> &str {
        self.fill.as_deref().unwrap_or(DEFAULT_FILL)
    }
}

/// Sparse update for a canvas item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Item for CanvasItem {
    type Patch = CanvasItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &CanvasItemPatch) {
        if let Some(ref name) = patch.name {
            self.name.clone_from(name);
        }
        if let Some(ref category) = patch.category {
            self.category.clone_from(category);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(sx) = patch.scale_x {
            self.scale_x = sx;
        }
        if let Some(sy) = patch.scale_y {
            self.scale_y = sy;
        }
        if let Some(ref url) = patch.url {
            self.url = Some(url.clone());
        }
        if let Some(ref fill) = patch.fill {
            self.fill = Some(fill.clone());
        }
        if let Some(ref text) = patch.text {
            self.text = Some(text.clone());
        }
    }

    fn validate(&self) -> Result<(), EditError> {
        ensure_finite(&self.id, "x", self.x)?;
        ensure_finite(&self.id, "y", self.y)?;
        ensure_finite(&self.id, "rotation", self.rotation)?;
        ensure_nonzero(&self.id, "scale_x", self.scale_x)?;
        ensure_nonzero(&self.id, "scale_y", self.scale_y)?;
        for (field, value) in [("width", self.width), ("height", self.height)] {
            ensure_finite(&self.id, field, value)?;
            if value < MIN_DIMENSION {
                return Err(EditError::InvalidGeometry {
                    id: self.id.clone(),
                    reason: format!("{field} {value} is below the minimum of {MIN_DIMENSION}"),
                });
            }
        }
        Ok(())
    }
}
