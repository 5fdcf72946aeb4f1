//! Bounded linear undo/redo history

use crate::{Command, EditError, HistoryDirection, Result};
use layout_tree::{LayoutTree, NodeId};
use std::collections::VecDeque;
use tracing::debug;

/// History cap used when the host does not configure one
pub const DEFAULT_MAX_UNDOS: usize = 30;

/// Ordered command history with a cursor.
///
/// Entries before the cursor can be undone, entries at or after it can be
/// redone. Executing a new command discards everything after the cursor.
#[derive(Debug)]
pub struct UndoStack {
    entries: VecDeque<Box<dyn Command>>,
    /// Index of the next entry to redo
    cursor: usize,
    /// Maximum number of undoable entries
    max_entries: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_UNDOS)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_entries,
        }
    }

    /// Run a command and record it.
    ///
    /// A command that fails is not recorded and the history is left as it was.
    pub fn execute(&mut self, mut command: Box<dyn Command>, tree: &mut LayoutTree) -> Result<NodeId> {
        let active = command.execute(tree)?;
        debug!(command = command.display_name(), "execute");

        self.entries.truncate(self.cursor);
        self.entries.push_back(command);
        self.cursor += 1;
        self.evict();
        Ok(active)
    }

    /// Invert the entry behind the cursor
    pub fn undo(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        if self.cursor == 0 {
            return Err(EditError::EmptyHistory(HistoryDirection::Undo));
        }
        let command = self
            .entries
            .get_mut(self.cursor - 1)
            .ok_or(EditError::EmptyHistory(HistoryDirection::Undo))?;
        let active = command.invert(tree)?;
        debug!(command = command.display_name(), "undo");
        self.cursor -= 1;
        Ok(active)
    }

    /// Re-execute the entry at the cursor
    pub fn redo(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        let command = self
            .entries
            .get_mut(self.cursor)
            .ok_or(EditError::EmptyHistory(HistoryDirection::Redo))?;
        let active = command.execute(tree)?;
        debug!(command = command.display_name(), "redo");
        self.cursor += 1;
        Ok(active)
    }

    /// Change the cap, evicting the oldest undoable entries if it shrank
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.evict();
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drop the oldest entries past the cap. Pending redo entries are kept.
    fn evict(&mut self) {
        while self.entries.len() > self.max_entries && self.cursor > 0 {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of entries that can be undone
    pub fn undo_len(&self) -> usize {
        self.cursor
    }

    /// Number of entries that can be redone
    pub fn redo_len(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Menu label for the next undo, e.g. `Undo "Move Cell Up"`
    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|command| command.describe_backward())
    }

    /// Menu label for the next redo
    pub fn redo_description(&self) -> Option<String> {
        self.entries.get(self.cursor).map(|command| command.describe_forward())
    }

    /// Forget all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
