//! Interaction protocol between renderers and an [`Editor`].
//!
//! Renderers report two things back: clicks, which only ever change the
//! selection, and finished gestures (drag, resize, rotate), which become
//! exactly one [`Editor::update`]. While a gesture is in flight its
//! intermediate geometry lives in [`Interaction`] as a preview patch, never in
//! the registry, so one gesture produces one history entry no matter how many
//! frames it spanned.
//!
//! The 2D helpers also fold the renderer's transient scale factors back into
//! width/height and refuse resizes below [`MIN_DIMENSION`] before anything
//! reaches the registry.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::debug;

use crate::canvas_item::CanvasItemPatch;
use crate::consts::MIN_DIMENSION;
use crate::editor::{Change, Editor};
use crate::item::{EditError, Item, ItemId};
use crate::scene_item::{SceneItemPatch, Vec3};

/// What a pointer click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// A placed item.
    Item(ItemId),
    /// Empty stage or scene background.
    Empty,
}

/// Resolve a click into a selection change. Clicking empty space always deselects.
pub fn click<T: Item>(editor: &mut Editor<T>, target: &PointerTarget) -> Change {
    match target {
        PointerTarget::Item(id) => editor.select(Some(id)),
        PointerTarget::Empty => editor.select(None),
    }
}

/// Gesture tracking state.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState<P> {
    /// No gesture in progress.
    Idle,
    /// A drag or transform is in progress on `id`.
    Active {
        /// Item being manipulated.
        id: ItemId,
        /// Latest intermediate geometry reported by the renderer.
        preview: Option<P>,
    },
}

/// Coalesces one direct-manipulation gesture into one recorded update.
#[derive(Debug, Clone)]
pub struct Interaction<T: Item> {
    state: GestureState<T::Patch>,
}

impl<T: Item> Default for Interaction<T> {
    fn default() -> Self {
        Self { state: GestureState::Idle }
    }
}

impl<T: Item> Interaction<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture on `id`, abandoning any gesture already in flight.
    pub fn begin(&mut self, id: impl Into<ItemId>) {
        self.state = GestureState::Active { id: id.into(), preview: None };
    }

    /// Keep the latest intermediate geometry. Ignored when idle.
    pub fn preview(&mut self, patch: T::Patch) {
        if let GestureState::Active { ref mut preview, .. } = self.state {
            *preview = Some(patch);
        }
    }

    /// The intermediate geometry the renderer should draw, if any.
    #[must_use]
    pub fn current_preview(&self) -> Option<&T::Patch> {
        match self.state {
            GestureState::Active { ref preview, .. } => preview.as_ref(),
            GestureState::Idle => None,
        }
    }

    /// Id of the item under manipulation, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        match self.state {
            GestureState::Active { ref id, .. } => Some(id),
            GestureState::Idle => None,
        }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_transforming(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Finish the gesture with the final geometry as a single editor update.
    ///
    /// Returns [`Change::None`] without touching the editor when no gesture is
    /// in progress.
    ///
    /// # Errors
    ///
    /// Propagates [`EditError`] from [`Editor::update`]; the gesture still ends.
    pub fn commit(&mut self, editor: &mut Editor<T>, patch: &T::Patch) -> Result<Change, EditError> {
        let GestureState::Active { id, .. } = std::mem::replace(&mut self.state, GestureState::Idle) else {
            return Ok(Change::None);
        };
        debug!(surface = editor.surface(), %id, "gesture committed");
        editor.update(&id, patch)
    }

    /// Abandon the gesture without touching the editor.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

// =============================================================================
// 2D HELPERS
// =============================================================================

/// Axis-aligned box reported by the 2D transformer while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// Accept `proposed` unless it would shrink either side below the minimum,
/// in which case the previous box is kept.
#[must_use]
pub fn bound_box(previous: Bounds, proposed: Bounds) -> Bounds {
    if proposed.width < MIN_DIMENSION || proposed.height < MIN_DIMENSION {
        return previous;
    }
    proposed
}

/// Final state of a 2D node when a transform gesture ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    pub rotation: f64,
    /// Scale applied by the transformer during the gesture.
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Fold the gesture's scale into width/height (floored at the minimum) and
/// reset the scale to 1.
#[must_use]
pub fn normalize_transform(node: NodeTransform) -> CanvasItemPatch {
    CanvasItemPatch {
        x: Some(node.x),
        y: Some(node.y),
        width: Some((node.width * node.scale_x).max(MIN_DIMENSION)),
        height: Some((node.height * node.scale_y).max(MIN_DIMENSION)),
        rotation: Some(node.rotation),
        scale_x: Some(1.0),
        scale_y: Some(1.0),
        ..Default::default()
    }
}

/// Final position of a 2D drag.
#[must_use]
pub fn drag_end(x: f64, y: f64) -> CanvasItemPatch {
    CanvasItemPatch { x: Some(x), y: Some(y), ..Default::default() }
}

// =============================================================================
// 3D HELPERS
// =============================================================================

/// Final transform of a 3D item when a gizmo gesture ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl From<SceneTransform> for SceneItemPatch {
    fn from(t: SceneTransform) -> Self {
        Self { position: Some(t.position), rotation: Some(t.rotation), scale: Some(t.scale), ..Default::default() }
    }
}
