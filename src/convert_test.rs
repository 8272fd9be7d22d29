#![allow(clippy::float_cmp)]

use super::*;

fn instance(transform: ItemTransform) -> ItemInstance {
    ItemInstance {
        id: 42,
        variant: 3,
        name: "Sofa".into(),
        category: "sofa".into(),
        bbox: BBox { x: 10.0, y: 20.0, width: 300.0, height: 120.0 },
        mask_url: Some("https://cdn/mask.png".into()),
        transform,
        created_at: "t".into(),
    }
}

#[test]
fn instance_ids_round_trip_through_canvas_ids() {
    assert_eq!(canvas_id(42), "item-42");
    assert_eq!(instance_id("item-42"), Some(42));
    assert_eq!(instance_id("rect-42"), None);
    assert_eq!(instance_id("item-abc"), None);
}

#[test]
fn bbox_position_when_transform_empty() {
    let item = canvas_item_from_instance(&instance(ItemTransform::default()));
    assert_eq!(item.id, "item-42");
    assert_eq!((item.x, item.y, item.width, item.height), (10.0, 20.0, 300.0, 120.0));
    assert_eq!((item.rotation, item.scale_x, item.scale_y), (0.0, 1.0, 1.0));
    assert_eq!(item.kind, CanvasItemKind::Rect);
    assert_eq!(item.url.as_deref(), Some("https://cdn/mask.png"));
}

#[test]
fn transform_overrides_position() {
    let t = ItemTransform { x: Some(50.0), rotation: Some(90.0), scale_y: Some(2.0), ..Default::default() };
    let item = canvas_item_from_instance(&instance(t));
    assert_eq!((item.x, item.y), (50.0, 20.0));
    assert_eq!(item.rotation, 90.0);
    assert_eq!(item.scale_y, 2.0);
}

#[test]
fn draft_carries_full_geometry() {
    let mut item = CanvasItem::rect("rect-1");
    item.category = "Sofas".into();
    let draft = draft_from_canvas_item(&item, 3);
    assert_eq!(draft.variant, 3);
    assert_eq!(draft.name, "rect-1");
    assert_eq!(draft.bbox, BBox { x: 100.0, y: 100.0, width: 150.0, height: 100.0 });
    assert_eq!(draft.transform.scale_x, Some(1.0));
}

#[test]
fn patch_skips_empty_labels() {
    let item = CanvasItem::rect("item-9");
    let patch = patch_from_canvas_item(&item);
    assert!(patch.name.is_none());
    assert!(patch.category.is_none());
    assert_eq!(patch.transform.and_then(|t| t.x), Some(100.0));
}
