//! Shared numeric constants for the editor crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a 2D item may be resized to, in canvas units.
pub const MIN_DIMENSION: f64 = 5.0;

/// Fill used for new rectangles when none is given.
pub const DEFAULT_FILL: &str = "#3b82f6";

// ── Toolbar defaults ────────────────────────────────────────────

/// Left edge of a rectangle added from the toolbar.
pub const DEFAULT_RECT_X: f64 = 100.0;

/// Top edge of a rectangle added from the toolbar.
pub const DEFAULT_RECT_Y: f64 = 100.0;

/// Width of a rectangle added from the toolbar.
pub const DEFAULT_RECT_WIDTH: f64 = 150.0;

/// Height of a rectangle added from the toolbar.
pub const DEFAULT_RECT_HEIGHT: f64 = 100.0;

// ── Scene placement ─────────────────────────────────────────────

/// Distance between neighbouring catalog items on the scene floor grid.
pub const GRID_SPACING: f64 = 2.0;
