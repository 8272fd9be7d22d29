//! 3D scene items: furniture boxes placed in the room scene.

#[cfg(test)]
#[path = "scene_item_test.rs"]
mod scene_item_test;

use serde::{Deserialize, Serialize};

use crate::item::{EditError, Item, ItemId, ensure_finite, ensure_nonzero};

/// An `[x, y, z]` triple in scene units (or radians, for rotation).
pub type Vec3 = [f64; 3];

/// A 3D item in the room scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    /// Caller-supplied identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Furniture category (e.g. `"Lamps"`).
    pub category: String,
    /// Center position; `y` is up.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Material color as a CSS color string.
    pub color: String,
}

/// Sparse update for a scene item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Item for SceneItem {
    type Patch = SceneItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &SceneItemPatch) {
        if let Some(ref name) = patch.name {
            self.name.clone_from(name);
        }
        if let Some(ref category) = patch.category {
            self.category.clone_from(category);
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(ref color) = patch.color {
            self.color.clone_from(color);
        }
    }

    fn validate(&self) -> Result<(), EditError> {
        const AXES: [&str; 3] = ["x", "y", "z"];
        for (axis, (p, r)) in AXES.iter().zip(self.position.iter().zip(self.rotation.iter())) {
            ensure_finite(&self.id, &format!("position.{axis}"), *p)?;
            ensure_finite(&self.id, &format!("rotation.{axis}"), *r)?;
        }
        for (axis, s) in AXES.iter().zip(self.scale.iter()) {
            ensure_nonzero(&self.id, &format!("scale.{axis}"), *s)?;
        }
        Ok(())
    }
}
