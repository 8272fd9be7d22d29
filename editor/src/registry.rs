//! Item registry: the live, ordered collection of placed items.
//!
//! This module owns what is currently on a surface (`items`), which item is
//! selected, and the background photo reference. It performs no history
//! bookkeeping and no validation; [`crate::editor::Editor`] layers both on
//! top. Insertion order is draw order: later items render above earlier ones.
//!
//! The one invariant kept here is that `selected_id` never names an item that
//! was removed through [`Registry::remove`] or dropped by
//! [`Registry::replace_items`].

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use crate::item::{Item, ItemId};

/// In-memory store of placed items plus view state.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    selected_id: Option<ItemId>,
    background_image: Option<String>,
}

impl<T: Item> Registry<T> {
    /// Create an empty registry with nothing selected and no background.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new(), selected_id: None, background_image: None }
    }

    /// Append an item at the top of the draw order. Ids are not checked here.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Index of the item with `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Whether an item with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Merge a patch into an existing item. Returns false if the item doesn't exist.
    pub fn apply_patch(&mut self, id: &str, patch: &T::Patch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.apply(patch);
        true
    }

    /// Remove an item by id, returning it if it was present. Clears the
    /// selection when the removed item was selected.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.position(id)?;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Some(self.items.remove(index))
    }

    /// Replace every item (undo, redo, hydration). A selection that no longer
    /// resolves is cleared.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        if let Some(ref id) = self.selected_id {
            if !self.contains(id) {
                self.selected_id = None;
            }
        }
    }

    /// Set or clear the selected item id.
    pub fn select(&mut self, id: Option<ItemId>) {
        self.selected_id = id;
    }

    /// Set or clear the background photo reference.
    pub fn set_background_image(&mut self, url: Option<String>) {
        self.background_image = url;
    }

    /// All items in draw order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The selected item id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The background photo reference, if any.
    #[must_use]
    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    /// Number of placed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Item> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
