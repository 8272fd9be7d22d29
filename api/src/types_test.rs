#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn variant_json() -> Value {
    json!({
        "id": 4,
        "project": 7,
        "image_url": "https://cdn/variant.jpg",
        "metadata": { "prompt": "scandinavian" },
        "items": [{
            "id": 11,
            "variant": 4,
            "name": "Sofa",
            "category": "sofa",
            "bbox": { "x": 10, "y": 20, "width": 300, "height": 120 },
            "mask_url": null,
            "transform": { "rotation": 5, "scaleX": 1.5 },
            "created_at": "2024-01-01T00:00:00Z"
        }],
        "created_at": "2024-01-01T00:00:00Z"
    })
}

// =============================================================
// Listings
// =============================================================

#[test]
fn listing_accepts_paginated_body() {
    let body = json!({ "count": 1, "next": null, "results": [variant_json()] });
    let listing: Listing<DesignVariant> = serde_json::from_value(body).unwrap();
    assert_eq!(listing.into_vec().len(), 1);
}

#[test]
fn listing_accepts_bare_array() {
    let listing: Listing<DesignVariant> = serde_json::from_value(json!([variant_json(), variant_json()])).unwrap();
    assert_eq!(listing.into_vec().len(), 2);
}

#[test]
fn listing_rejects_other_shapes() {
    assert!(serde_json::from_value::<Listing<DesignVariant>>(json!({ "detail": "nope" })).is_err());
}

// =============================================================
// Variants and items
// =============================================================

#[test]
fn variant_with_items_deserializes() {
    let variant: DesignVariant = serde_json::from_value(variant_json()).unwrap();
    let item = &variant.items[0];
    assert_eq!(item.bbox.width, 300.0);
    assert_eq!(item.transform.rotation, Some(5.0));
    assert_eq!(item.transform.scale_x, Some(1.5));
    assert_eq!(item.transform.x, None);
    assert_eq!(item.mask_url, None);
    assert_eq!(variant.metadata.get("prompt"), Some(&json!("scandinavian")));
}

#[test]
fn item_without_bbox_or_transform_uses_defaults() {
    let item: ItemInstance = serde_json::from_value(json!({
        "id": 1, "variant": 2, "name": "Lamp", "created_at": "t"
    }))
    .unwrap();
    assert_eq!(item.bbox, BBox::default());
    assert_eq!(item.transform, ItemTransform::default());
    assert!(item.category.is_empty());
}

#[test]
fn transform_serializes_camel_case_scale() {
    let t = ItemTransform { scale_y: Some(2.0), ..Default::default() };
    assert_eq!(serde_json::to_value(t).unwrap(), json!({ "scaleY": 2.0 }));
}

#[test]
fn item_patch_skips_absent_fields() {
    let patch = ItemInstancePatch { name: Some("Chair".into()), ..Default::default() };
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "name": "Chair" }));
}

// =============================================================
// Projects and images
// =============================================================

#[test]
fn image_kind_wire_names() {
    assert_eq!(serde_json::to_value(ImageKind::Inspo).unwrap(), json!("inspo"));
    assert_eq!("generated".parse::<ImageKind>().unwrap(), ImageKind::Generated);
    assert!("photo".parse::<ImageKind>().is_err());
    assert_eq!(ImageKind::default().to_string(), "original");
}

#[test]
fn project_latest_image_picks_first_of_kind() {
    let project: Project = serde_json::from_value(json!({
        "id": 7, "name": "Living room", "owner": 1, "owner_username": "ana",
        "images": [
            { "id": 3, "project": 7, "type": "inspo", "image_url": "u3", "created_at": "t3" },
            { "id": 2, "project": 7, "type": "original", "image_url": "u2", "created_at": "t2" },
            { "id": 1, "project": 7, "type": "original", "image_url": "u1", "created_at": "t1" }
        ],
        "created_at": "t", "updated_at": "t"
    }))
    .unwrap();
    assert_eq!(project.latest_image(ImageKind::Original).map(|i| i.id), Some(2));
    assert!(project.latest_image(ImageKind::Generated).is_none());
    assert!(project.variants.is_empty());
}

#[test]
fn project_summary_counts() {
    let summary: ProjectSummary = serde_json::from_value(json!({
        "id": 1, "name": "Den", "owner_username": "ana", "image_count": 2, "variant_count": 3,
        "created_at": "t", "updated_at": "t"
    }))
    .unwrap();
    assert_eq!((summary.image_count, summary.variant_count), (2, 3));
}

#[test]
fn generation_accepted_shape() {
    let accepted: GenerationAccepted = serde_json::from_value(json!({
        "message": "Generation started", "task_id": "abc-123", "project_id": 7
    }))
    .unwrap();
    assert_eq!(accepted.task_id, "abc-123");
    assert_eq!(accepted.project_id, 7);
}

#[test]
fn refresh_body_with_and_without_rotation() {
    let plain: RefreshedAccess = serde_json::from_value(json!({ "access": "a2" })).unwrap();
    assert_eq!(plain.refresh, None);
    let rotated: RefreshedAccess = serde_json::from_value(json!({ "access": "a2", "refresh": "r2" })).unwrap();
    assert_eq!(rotated.refresh.as_deref(), Some("r2"));
}

// =============================================================
// Uploads
// =============================================================

#[test]
fn upload_mime_from_extension() {
    assert_eq!(UploadFile::new("room.JPG", vec![1]).mime_type().unwrap(), "image/jpeg");
    assert_eq!(UploadFile::new("room.png", vec![1]).mime_type().unwrap(), "image/png");
}

#[test]
fn upload_rejects_empty_and_unknown() {
    assert_eq!(UploadFile::new("room.png", Vec::new()).mime_type().unwrap_err().error_code(), "E_INVALID_UPLOAD");
    assert!(UploadFile::new("notes.txt", vec![1]).mime_type().is_err());
    assert!(UploadFile::new("noext", vec![1]).mime_type().is_err());
}
