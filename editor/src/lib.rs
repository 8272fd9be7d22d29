//! Editing core for the room designer.
//!
//! This crate owns the document state behind both editing surfaces: the 2D
//! canvas and the 3D scene. Each surface is an [`editor::Editor`] over its own
//! item shape, combining a flat [`registry::Registry`] of placed items with a
//! snapshot-based [`history::History`] for linear undo/redo. Renderers never
//! mutate items directly; they report clicks and finished gestures through
//! [`gesture`] and re-read the editor afterwards.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Registry + history bound together; the surface-level API |
//! | [`registry`] | Ordered item storage, selection, background reference |
//! | [`history`] | Full-snapshot undo/redo log with branch truncation |
//! | [`item`] | The [`item::Item`] trait shared by both shapes, and [`item::EditError`] |
//! | [`canvas_item`] | 2D canvas item shape |
//! | [`scene_item`] | 3D scene item shape |
//! | [`gesture`] | Click resolution and gesture-to-update coalescing |
//! | [`hit`] | Hit-testing 2D items under a pointer |
//! | [`catalog`] | Built-in furniture catalog and default placement |
//! | [`consts`] | Shared numeric constants (minimum sizes, grid spacing, etc.) |

pub mod canvas_item;
pub mod catalog;
pub mod consts;
pub mod editor;
pub mod gesture;
pub mod hit;
pub mod history;
pub mod item;
pub mod registry;
pub mod scene_item;

pub use canvas_item::{CanvasItem, CanvasItemKind, CanvasItemPatch};
pub use editor::{CanvasEditor, Change, Editor, SceneEditor};
pub use item::{EditError, Item, ItemId};
pub use scene_item::{SceneItem, SceneItemPatch, Vec3};
