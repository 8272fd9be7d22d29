#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::canvas_item::CanvasItem;
use crate::gesture::PointerTarget;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether `pt` lies inside `item`'s rotated, scaled box.
///
/// The box spans `width * scale_x` by `height * scale_y` from the item origin
/// and is rotated clockwise by `rotation` degrees about that origin.
#[must_use]
pub fn contains(item: &CanvasItem, pt: Point) -> bool {
    let dx = pt.x - item.x;
    let dy = pt.y - item.y;
    let (sin, cos) = (-item.rotation.to_radians()).sin_cos();
    let local_x = dx * cos - dy * sin;
    let local_y = dx * sin + dy * cos;

    let w = item.width * item.scale_x;
    let h = item.height * item.scale_y;
    let (min_x, max_x) = if w < 0.0 { (w, 0.0) } else { (0.0, w) };
    let (min_y, max_y) = if h < 0.0 { (h, 0.0) } else { (0.0, h) };

    local_x >= min_x && local_x <= max_x && local_y >= min_y && local_y <= max_y
}

/// Resolve which item (if any) a click at `pt` lands on. Later items are drawn
/// on top, so they win.
#[must_use]
pub fn hit_test(pt: Point, items: &[CanvasItem]) -> PointerTarget {
    items
        .iter()
        .rev()
        .find(|item| contains(item, pt))
        .map_or(PointerTarget::Empty, |item| PointerTarget::Item(item.id.clone()))
}
