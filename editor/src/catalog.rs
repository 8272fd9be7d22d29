//! Built-in furniture catalog and default scene placement.
//!
//! The catalog is a fixed list of products grouped by category. Placing a
//! product creates a fresh [`SceneItem`] on a grid centred on the scene
//! origin, so successive placements don't stack on top of each other.
//! Swapping an item for another product keeps its transform and replaces
//! only its descriptive fields.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use uuid::Uuid;

use crate::consts::GRID_SPACING;
use crate::scene_item::{SceneItem, SceneItemPatch, Vec3};

/// One entry of the furniture catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    /// CSS color used for the placeholder mesh.
    pub color: &'static str,
}

const fn product(id: &'static str, name: &'static str, category: &'static str, color: &'static str) -> Product {
    Product { id, name, category, color }
}

/// Every product, grouped by category in display order.
pub const PRODUCTS: [Product; 15] = [
    product("sofa-1", "Modern Sectional", "Sofas", "#8B7355"),
    product("sofa-2", "Classic Loveseat", "Sofas", "#A0826D"),
    product("sofa-3", "Minimalist Couch", "Sofas", "#C4A582"),
    product("chair-1", "Accent Chair", "Chairs", "#6B8E23"),
    product("chair-2", "Dining Chair", "Chairs", "#8FBC8F"),
    product("chair-3", "Office Chair", "Chairs", "#2F4F2F"),
    product("table-1", "Coffee Table", "Tables", "#8B4513"),
    product("table-2", "Dining Table", "Tables", "#A0522D"),
    product("table-3", "Side Table", "Tables", "#D2691E"),
    product("lamp-1", "Floor Lamp", "Lamps", "#FFD700"),
    product("lamp-2", "Table Lamp", "Lamps", "#FFA500"),
    product("lamp-3", "Pendant Light", "Lamps", "#FF8C00"),
    product("rug-1", "Persian Rug", "Rugs", "#8B0000"),
    product("rug-2", "Modern Rug", "Rugs", "#696969"),
    product("rug-3", "Shag Rug", "Rugs", "#F5F5DC"),
];

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for p in &PRODUCTS {
        if !out.contains(&p.category) {
            out.push(p.category);
        }
    }
    out
}

/// Products in `category`. Matching is exact.
pub fn by_category(category: &str) -> impl Iterator<Item = &'static Product> + '_ {
    PRODUCTS.iter().filter(move |p| p.category == category)
}

/// Look up a product by its catalog id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Products a placed item in `category` can be swapped for.
#[must_use]
pub fn swap_candidates(category: &str) -> Vec<&'static Product> {
    by_category(category).collect()
}

/// Floor position for the item placed when `count` items already exist.
///
/// Items fill a square grid whose side grows with the item count, centred on
/// the origin with [`GRID_SPACING`] between cells.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grid_position(count: usize) -> Vec3 {
    let size = ((count + 1) as f64).sqrt().ceil() as usize;
    let offset = (size - 1) as f64;
    let x = (count % size) as f64 * GRID_SPACING - offset;
    let z = (count / size) as f64 * GRID_SPACING - offset;
    [x, 0.0, z]
}

impl Product {
    /// A new scene item for this product at the next grid slot.
    #[must_use]
    pub fn instantiate(&self, count: usize) -> SceneItem {
        SceneItem {
            id: format!("{}-{}", self.id, Uuid::new_v4()),
            name: self.name.to_owned(),
            category: self.category.to_owned(),
            position: grid_position(count),
            rotation: [0.0; 3],
            scale: [1.0; 3],
            color: self.color.to_owned(),
        }
    }

    /// Patch that turns an existing item into this product, keeping its transform.
    #[must_use]
    pub fn swap_patch(&self) -> SceneItemPatch {
        SceneItemPatch {
            name: Some(self.name.to_owned()),
            category: Some(self.category.to_owned()),
            color: Some(self.color.to_owned()),
            ..Default::default()
        }
    }
}
