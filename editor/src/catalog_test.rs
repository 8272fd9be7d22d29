#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn catalog_has_five_categories_of_three() {
    let cats = categories();
    assert_eq!(cats, ["Sofas", "Chairs", "Tables", "Lamps", "Rugs"]);
    for cat in cats {
        assert_eq!(by_category(cat).count(), 3, "{cat}");
    }
}

#[test]
fn product_ids_are_unique() {
    for (i, p) in PRODUCTS.iter().enumerate() {
        assert!(PRODUCTS.iter().skip(i + 1).all(|q| q.id != p.id), "{}", p.id);
    }
}

#[test]
fn find_known_and_unknown() {
    assert_eq!(find("lamp-2").map(|p| p.name), Some("Table Lamp"));
    assert!(find("lamp-9").is_none());
}

#[test]
fn by_category_is_exact_match() {
    assert_eq!(by_category("sofas").count(), 0);
}

// =============================================================
// Grid placement
// =============================================================

#[test]
fn first_item_at_origin() {
    assert_eq!(grid_position(0), [0.0, 0.0, 0.0]);
}

#[test]
fn grid_grows_with_count() {
    // count 1..=3 uses a 2x2 grid offset by 1
    assert_eq!(grid_position(1), [1.0, 0.0, -1.0]);
    assert_eq!(grid_position(2), [-1.0, 0.0, 1.0]);
    assert_eq!(grid_position(3), [1.0, 0.0, 1.0]);
    // count 4 jumps to 3x3 offset by 2
    assert_eq!(grid_position(4), [0.0, 0.0, 0.0]);
    assert_eq!(grid_position(8), [2.0, 0.0, 2.0]);
}

// =============================================================
// Instantiate / swap
// =============================================================

#[test]
fn instantiate_builds_fresh_item() {
    let product = find("chair-1").unwrap();
    let item = product.instantiate(0);
    assert!(item.id.starts_with("chair-1-"));
    assert_eq!(item.name, "Accent Chair");
    assert_eq!(item.category, "Chairs");
    assert_eq!(item.color, "#6B8E23");
    assert_eq!(item.scale, [1.0; 3]);
    assert_eq!(item.rotation, [0.0; 3]);
    assert_eq!(item.position, [0.0; 3]);
}

#[test]
fn instantiate_ids_are_distinct() {
    let product = find("rug-1").unwrap();
    assert_ne!(product.instantiate(0).id, product.instantiate(0).id);
}

#[test]
fn swap_keeps_transform() {
    use crate::item::Item;

    let mut item = find("sofa-1").unwrap().instantiate(3);
    let position = item.position;
    let replacement = find("sofa-3").unwrap();
    item.apply(&replacement.swap_patch());
    assert_eq!(item.name, "Minimalist Couch");
    assert_eq!(item.color, "#C4A582");
    assert_eq!(item.position, position);
    assert!(item.id.starts_with("sofa-1-"));
}

#[test]
fn swap_candidates_share_category() {
    let cands = swap_candidates("Tables");
    assert_eq!(cands.len(), 3);
    assert!(cands.iter().all(|p| p.category == "Tables"));
}
