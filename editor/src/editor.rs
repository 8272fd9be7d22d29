//! Editor: one editing surface's registry and history bound together.
//!
//! Every mutating operation (`add`, `update`, `delete`) changes the registry
//! and then records exactly one history snapshot, so after N of them the
//! history holds N + 1 snapshots with the cursor at N. Selection and the
//! background reference are view state: they change the registry but are
//! never recorded, and undo/redo never touch them (beyond clearing a
//! selection whose item disappeared).
//!
//! ERROR HANDLING
//! ==============
//! Ordinary misuse degrades to a no-op: an unknown id yields
//! [`Change::Missing`] and an undo at the oldest snapshot yields
//! [`Change::None`]. Only edits that would store a duplicate id or unusable
//! geometry are rejected with [`EditError`], and a rejected edit leaves both
//! the registry and the history exactly as they were.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::{debug, warn};

use crate::canvas_item::CanvasItem;
use crate::history::History;
use crate::item::{EditError, Item, ItemId};
use crate::registry::Registry;
use crate::scene_item::SceneItem;

/// The 2D canvas surface.
pub type CanvasEditor = Editor<CanvasItem>;

/// The 3D scene surface.
pub type SceneEditor = Editor<SceneItem>;

/// What an editor operation changed, for the host to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Nothing changed.
    None,
    ItemAdded { id: ItemId },
    ItemUpdated { id: ItemId },
    ItemDeleted { id: ItemId },
    /// The operation named an id that isn't placed; items are unchanged.
    Missing { id: ItemId },
    SelectionChanged { id: Option<ItemId> },
    BackgroundChanged,
    /// Undo or redo restored the snapshot at `index`.
    Restored { index: usize },
}

/// Registry + history for one editing surface.
#[derive(Debug, Clone)]
pub struct Editor<T: Item> {
    surface: &'static str,
    registry: Registry<T>,
    history: History<T>,
    revision: u64,
}

impl<T: Item> Editor<T> {
    /// Create an empty editor. `surface` labels log events (e.g. `"canvas"`).
    #[must_use]
    pub fn new(surface: &'static str) -> Self {
        Self { surface, registry: Registry::new(), history: History::new(), revision: 0 }
    }

    // --- Item mutations (recorded) ---

    /// Place a new item on top of the draw order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::DuplicateId`] if the id is already placed, or
    /// [`EditError::InvalidGeometry`] if the item fails validation.
    pub fn add(&mut self, item: T) -> Result<Change, EditError> {
        if self.registry.contains(item.id()) {
            return Err(EditError::DuplicateId(item.id().to_owned()));
        }
        item.validate()?;
        let id = item.id().to_owned();
        self.registry.insert(item);
        self.record();
        debug!(surface = self.surface, %id, index = self.history.index(), "item added");
        Ok(Change::ItemAdded { id })
    }

    /// Merge `patch` into the item with `id`.
    ///
    /// An unknown id is a no-op on the items but is still recorded.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidGeometry`] if the patched item would fail
    /// validation; the item is left untouched.
    pub fn update(&mut self, id: &str, patch: &T::Patch) -> Result<Change, EditError> {
        let Some(mut next) = self.registry.get(id).cloned() else {
            self.record();
            debug!(surface = self.surface, %id, "update of unknown item ignored");
            return Ok(Change::Missing { id: id.to_owned() });
        };
        next.apply(patch);
        next.validate()?;
        self.registry.apply_patch(id, patch);
        self.record();
        debug!(surface = self.surface, %id, index = self.history.index(), "item updated");
        Ok(Change::ItemUpdated { id: id.to_owned() })
    }

    /// Remove the item with `id`, clearing the selection if it was selected.
    ///
    /// An unknown id is a no-op on the items but is still recorded.
    pub fn delete(&mut self, id: &str) -> Change {
        let removed = self.registry.remove(id).is_some();
        self.record();
        if removed {
            debug!(surface = self.surface, %id, index = self.history.index(), "item deleted");
            Change::ItemDeleted { id: id.to_owned() }
        } else {
            debug!(surface = self.surface, %id, "delete of unknown item ignored");
            Change::Missing { id: id.to_owned() }
        }
    }

    /// Delete whatever is selected. Returns `None` when nothing is.
    pub fn delete_selected(&mut self) -> Option<Change> {
        let id = self.registry.selected_id()?.to_owned();
        Some(self.delete(&id))
    }

    // --- View state (not recorded) ---

    /// Select the item with `id`, or clear the selection with `None`.
    ///
    /// Selecting an id that isn't placed leaves the selection unchanged.
    pub fn select(&mut self, id: Option<&str>) -> Change {
        if let Some(id) = id {
            if !self.registry.contains(id) {
                return Change::Missing { id: id.to_owned() };
            }
        }
        if self.registry.selected_id() == id {
            return Change::None;
        }
        self.registry.select(id.map(ToOwned::to_owned));
        self.revision += 1;
        Change::SelectionChanged { id: id.map(ToOwned::to_owned) }
    }

    /// Replace the background photo reference.
    pub fn set_background_image(&mut self, url: Option<String>) -> Change {
        if self.registry.background_image() == url.as_deref() {
            return Change::None;
        }
        self.registry.set_background_image(url);
        self.revision += 1;
        Change::BackgroundChanged
    }

    // --- History ---

    /// Step back one snapshot. A no-op at the oldest snapshot.
    pub fn undo(&mut self) -> Change {
        let Some(items) = self.history.undo() else {
            return Change::None;
        };
        self.restore(items)
    }

    /// Step forward one snapshot. A no-op at the newest snapshot.
    pub fn redo(&mut self) -> Change {
        let Some(items) = self.history.redo() else {
            return Change::None;
        };
        self.restore(items)
    }

    /// Whether [`Editor::undo`] would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Editor::redo`] would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the items wholesale and start a fresh history from them.
    ///
    /// Items that fail validation or repeat an earlier id are dropped with a
    /// warning. Returns how many items were loaded.
    pub fn load(&mut self, items: Vec<T>) -> usize {
        let mut accepted: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if accepted.iter().any(|kept| kept.id() == item.id()) {
                warn!(surface = self.surface, id = item.id(), "dropping duplicate item on load");
                continue;
            }
            if let Err(e) = item.validate() {
                warn!(surface = self.surface, error = %e, "dropping invalid item on load");
                continue;
            }
            accepted.push(item);
        }
        let count = accepted.len();
        self.history = History::with_initial(accepted.clone());
        self.registry.replace_items(accepted);
        self.revision += 1;
        debug!(surface = self.surface, count, "items loaded");
        count
    }

    /// Drop every item, the selection, the background and all history.
    pub fn reset(&mut self) {
        self.registry = Registry::new();
        self.history = History::new();
        self.revision += 1;
    }

    // --- Queries ---

    /// All items in draw order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.registry.items()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&T> {
        self.registry.get(id)
    }

    /// The selected item id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.registry.selected_id()
    }

    /// The selected item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        self.registry.selected_id().and_then(|id| self.registry.get(id))
    }

    /// The background photo reference, if any.
    #[must_use]
    pub fn background_image(&self) -> Option<&str> {
        self.registry.background_image()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the history cursor.
    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Counter bumped by every visible change; renderers compare it to skip redraws.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The log label this editor was created with.
    #[must_use]
    pub fn surface(&self) -> &'static str {
        self.surface
    }

    fn record(&mut self) {
        self.history.record(self.registry.items());
        self.revision += 1;
    }

    fn restore(&mut self, items: Vec<T>) -> Change {
        self.registry.replace_items(items);
        self.revision += 1;
        let index = self.history.index();
        debug!(surface = self.surface, index, "history restored");
        Change::Restored { index }
    }
}
