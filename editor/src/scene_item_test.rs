#![allow(clippy::float_cmp)]

use super::*;

fn chair() -> SceneItem {
    SceneItem {
        id: "chair-1-a".into(),
        name: "Accent Chair".into(),
        category: "Chairs".into(),
        position: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
        color: "#6B8E23".into(),
    }
}

#[test]
fn apply_replaces_whole_vectors() {
    let mut item = chair();
    item.apply(&SceneItemPatch { position: Some([1.0, 0.0, -2.0]), ..Default::default() });
    assert_eq!(item.position, [1.0, 0.0, -2.0]);
    assert_eq!(item.rotation, [0.0; 3]);
    assert_eq!(item.name, "Accent Chair");
}

#[test]
fn apply_descriptive_fields() {
    let mut item = chair();
    item.apply(&SceneItemPatch {
        name: Some("Office Chair".into()),
        color: Some("#2F4F2F".into()),
        ..Default::default()
    });
    assert_eq!(item.name, "Office Chair");
    assert_eq!(item.color, "#2F4F2F");
    assert_eq!(item.category, "Chairs");
}

#[test]
fn validate_accepts_default_transform() {
    assert!(chair().validate().is_ok());
}

#[test]
fn validate_names_offending_axis() {
    let mut item = chair();
    item.position[2] = f64::NAN;
    let err = item.validate().unwrap_err();
    assert!(err.to_string().contains("position.z"), "{err}");

    let mut item = chair();
    item.rotation[0] = f64::INFINITY;
    assert!(item.validate().unwrap_err().to_string().contains("rotation.x"));
}

#[test]
fn validate_rejects_zero_scale_component() {
    let mut item = chair();
    item.scale = [1.0, 0.0, 1.0];
    let err = item.validate().unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_GEOMETRY");
    assert!(err.to_string().contains("scale.y"));
}

#[test]
fn serde_uses_arrays_for_vectors() {
    let value = serde_json::to_value(chair()).unwrap();
    assert_eq!(value["scale"], serde_json::json!([1.0, 1.0, 1.0]));
    let back: SceneItem = serde_json::from_value(value).unwrap();
    assert_eq!(back, chair());
}
