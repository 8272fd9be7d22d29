//! Snapshot history for linear undo/redo.
//!
//! DESIGN
//! ======
//! Every committed edit stores a full copy of the item list rather than an
//! inverse operation. Item counts stay in the tens, so the memory cost is
//! small, and restoring a snapshot can never drift from the forward edit.
//!
//! `snapshots[index]` is always the item list as of the last record, undo or
//! redo. Recording after an undo discards every snapshot past `index` before
//! appending, so an abandoned branch can't be redone.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

/// Linear log of item-list snapshots with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<Vec<T>>,
    index: usize,
}

impl<T: Clone> History<T> {
    /// Start with a single empty snapshot at index 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial(Vec::new())
    }

    /// Start with `items` as the only snapshot at index 0.
    #[must_use]
    pub fn with_initial(items: Vec<T>) -> Self {
        Self { snapshots: vec![items], index: 0 }
    }

    /// Record a copy of `items` as the newest snapshot, discarding any redo branch.
    pub fn record(&mut self, items: &[T]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(items.to_vec());
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns the items to restore, or `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<Vec<T>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Step forward one snapshot. Returns the items to restore, or `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<Vec<T>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Whether [`History::undo`] would move.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether [`History::redo`] would move.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> &[T] {
        self.snapshots.get(self.index).map_or(&[], Vec::as_slice)
    }

    /// Number of stored snapshots (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Cursor position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}
