//! Mapping between backend item instances and 2D canvas items.
//!
//! A canvas item hydrated from the backend keeps its instance id in its own
//! id (`item-<n>`), so a later save knows to update rather than create.
//! Position comes from the stored transform when present, else from the
//! detection bounding box.

use api::types::{BBox, ItemInstance, ItemInstanceDraft, ItemInstanceId, ItemInstancePatch, ItemTransform, VariantId};
use editor::{CanvasItem, CanvasItemKind};

const INSTANCE_PREFIX: &str = "item-";

/// Canvas id for a backend item instance.
#[must_use]
pub fn canvas_id(instance: ItemInstanceId) -> String {
    format!("{INSTANCE_PREFIX}{instance}")
}

/// Backend instance id encoded in a canvas id, if it came from the backend.
#[must_use]
pub fn instance_id(canvas_id: &str) -> Option<ItemInstanceId> {
    canvas_id.strip_prefix(INSTANCE_PREFIX)?.parse().ok()
}

/// Canvas rectangle for a stored item instance.
#[must_use]
pub fn canvas_item_from_instance(instance: &ItemInstance) -> CanvasItem {
    let t = instance.transform;
    CanvasItem {
        id: canvas_id(instance.id),
        kind: CanvasItemKind::Rect,
        name: instance.name.clone(),
        category: instance.category.clone(),
        x: t.x.unwrap_or(instance.bbox.x),
        y: t.y.unwrap_or(instance.bbox.y),
        width: instance.bbox.width,
        height: instance.bbox.height,
        rotation: t.rotation.unwrap_or(0.0),
        scale_x: t.scale_x.unwrap_or(1.0),
        scale_y: t.scale_y.unwrap_or(1.0),
        url: instance.mask_url.clone(),
        fill: None,
        text: None,
    }
}

fn bbox_of(item: &CanvasItem) -> BBox {
    BBox { x: item.x, y: item.y, width: item.width, height: item.height }
}

fn transform_of(item: &CanvasItem) -> ItemTransform {
    ItemTransform {
        x: Some(item.x),
        y: Some(item.y),
        rotation: Some(item.rotation),
        scale_x: Some(item.scale_x),
        scale_y: Some(item.scale_y),
    }
}

/// Body for creating `item` under `variant`. Unnamed items are saved under their id.
#[must_use]
pub fn draft_from_canvas_item(item: &CanvasItem, variant: VariantId) -> ItemInstanceDraft {
    let name = if item.name.is_empty() { item.id.clone() } else { item.name.clone() };
    ItemInstanceDraft {
        variant,
        name,
        category: item.category.clone(),
        bbox: bbox_of(item),
        mask_url: None,
        transform: transform_of(item),
    }
}

/// Patch that brings a stored instance in line with `item`'s geometry and labels.
#[must_use]
pub fn patch_from_canvas_item(item: &CanvasItem) -> ItemInstancePatch {
    ItemInstancePatch {
        name: (!item.name.is_empty()).then(|| item.name.clone()),
        category: (!item.category.is_empty()).then(|| item.category.clone()),
        bbox: Some(bbox_of(item)),
        mask_url: None,
        transform: Some(transform_of(item)),
    }
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
