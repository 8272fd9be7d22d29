#![allow(clippy::float_cmp)]

use super::*;
use crate::canvas_item::{CanvasItem, CanvasItemPatch};

fn registry_with(ids: &[&str]) -> Registry<CanvasItem> {
    let mut reg = Registry::new();
    for id in ids {
        reg.insert(CanvasItem::rect(*id));
    }
    reg
}

fn ids(reg: &Registry<CanvasItem>) -> Vec<&str> {
    reg.items().iter().map(|i| i.id.as_str()).collect()
}

// =============================================================
// Storage
// =============================================================

#[test]
fn new_is_empty() {
    let reg: Registry<CanvasItem> = Registry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.len(), 0);
    assert_eq!(reg.selected_id(), None);
    assert_eq!(reg.background_image(), None);
}

#[test]
fn insert_preserves_order() {
    let reg = registry_with(&["a", "b", "c"]);
    assert_eq!(ids(&reg), ["a", "b", "c"]);
    assert_eq!(reg.position("c"), Some(2));
}

#[test]
fn get_and_contains() {
    let reg = registry_with(&["a"]);
    assert!(reg.contains("a"));
    assert!(!reg.contains("z"));
    assert_eq!(reg.get("a").map(|i| i.id.as_str()), Some("a"));
    assert!(reg.get("z").is_none());
}

#[test]
fn apply_patch_existing() {
    let mut reg = registry_with(&["a"]);
    assert!(reg.apply_patch("a", &CanvasItemPatch { y: Some(7.0), ..Default::default() }));
    assert_eq!(reg.get("a").map(|i| i.y), Some(7.0));
}

#[test]
fn apply_patch_missing_returns_false() {
    let mut reg = registry_with(&["a"]);
    assert!(!reg.apply_patch("z", &CanvasItemPatch::default()));
}

// =============================================================
// Selection invariant
// =============================================================

#[test]
fn remove_selected_clears_selection() {
    let mut reg = registry_with(&["a", "b"]);
    reg.select(Some("a".into()));
    assert!(reg.remove("a").is_some());
    assert_eq!(reg.selected_id(), None);
}

#[test]
fn remove_other_keeps_selection() {
    let mut reg = registry_with(&["a", "b"]);
    reg.select(Some("a".into()));
    reg.remove("b");
    assert_eq!(reg.selected_id(), Some("a"));
    assert_eq!(ids(&reg), ["a"]);
}

#[test]
fn remove_missing_returns_none() {
    let mut reg = registry_with(&["a"]);
    assert!(reg.remove("z").is_none());
    assert_eq!(reg.len(), 1);
}

#[test]
fn replace_items_clears_dangling_selection() {
    let mut reg = registry_with(&["a", "b"]);
    reg.select(Some("b".into()));
    reg.replace_items(vec![CanvasItem::rect("a")]);
    assert_eq!(reg.selected_id(), None);
}

#[test]
fn replace_items_keeps_resolvable_selection() {
    let mut reg = registry_with(&["a", "b"]);
    reg.select(Some("a".into()));
    reg.replace_items(vec![CanvasItem::rect("a")]);
    assert_eq!(reg.selected_id(), Some("a"));
}

#[test]
fn background_is_independent_of_items() {
    let mut reg = registry_with(&["a"]);
    reg.set_background_image(Some("https://cdn/room.jpg".into()));
    reg.replace_items(Vec::new());
    assert_eq!(reg.background_image(), Some("https://cdn/room.jpg"));
    reg.set_background_image(None);
    assert_eq!(reg.background_image(), None);
}
