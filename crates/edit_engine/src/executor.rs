//! Editor session - owns the tree, history, selection and observers

use crate::{
    Command, EditContext, EditError, Result, SelectionSync, TreeChange, TreeObserver, UndoStack,
};
use layout_tree::{LayoutError, LayoutTree, Node, NodeId};
use tracing::error;

/// One open layout and everything editing it.
///
/// Every mutation goes through [`EditorSession::execute`], [`EditorSession::undo`]
/// or [`EditorSession::redo`]; after each one the table invariants are
/// re-checked, the selection is updated and all observers are notified.
pub struct EditorSession {
    tree: LayoutTree,
    history: UndoStack,
    selection: SelectionSync,
    observers: Vec<Box<dyn TreeObserver>>,
    /// Unsaved changes since the last save or load
    dirty: bool,
}

impl EditorSession {
    /// Open a session on a tree keeping at most `max_undos` undoable steps
    pub fn new(tree: LayoutTree, max_undos: usize) -> Self {
        let mut selection = SelectionSync::new();
        selection.select(&tree, tree.root_id());
        Self {
            tree,
            history: UndoStack::with_limit(max_undos),
            selection,
            observers: Vec::new(),
            dirty: false,
        }
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root_id()
    }

    /// The node the user is on
    pub fn active(&self) -> NodeId {
        self.selection.active().unwrap_or_else(|| self.tree.root_id())
    }

    pub fn selection(&self) -> &SelectionSync {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSync {
        &mut self.selection
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Context handed to command constructors
    pub fn context(&self) -> EditContext {
        EditContext::new(self.active())
    }

    /// Build a command against the current tree and active node
    pub fn request<C, F>(&self, build: F) -> Result<C>
    where
        F: FnOnce(&LayoutTree, &EditContext) -> Result<C>,
    {
        build(&self.tree, &self.context())
    }

    /// Make a node active without editing anything
    pub fn select(&mut self, id: NodeId) -> Result<()> {
        let change = self
            .selection
            .select(&self.tree, id)
            .ok_or(EditError::Layout(LayoutError::NodeNotFound(id.as_uuid())))?;
        self.notify(&change);
        Ok(())
    }

    pub fn add_observer(&mut self, observer: Box<dyn TreeObserver>) {
        self.observers.push(observer);
    }

    /// Run a command and record it for undo
    pub fn execute(&mut self, command: Box<dyn Command>) -> Result<NodeId> {
        let active = self.history.execute(command, &mut self.tree)?;
        Ok(self.after_step(active))
    }

    pub fn undo(&mut self) -> Result<NodeId> {
        let active = self.history.undo(&mut self.tree)?;
        Ok(self.after_step(active))
    }

    pub fn redo(&mut self) -> Result<NodeId> {
        let active = self.history.redo(&mut self.tree)?;
        Ok(self.after_step(active))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a changed history cap from the settings dialog
    pub fn apply_settings(&mut self, max_undos: usize) {
        self.history.set_max_entries(max_undos);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Swap in a freshly loaded tree. History is discarded.
    pub fn replace_tree(&mut self, tree: LayoutTree) {
        self.tree = tree;
        self.history.clear();
        self.dirty = false;
        let change = self.selection.on_tree_changed(&self.tree, self.tree.root_id());
        self.notify(&change);
    }

    /// Check every table for duplicate coordinates
    pub fn verify_structure(&self) -> Result<()> {
        for table in self.tree.tables() {
            self.tree
                .check_table(table.id())
                .map_err(|e| EditError::StructuralInvariantViolation(e.to_string()))?;
        }
        Ok(())
    }

    fn after_step(&mut self, active: NodeId) -> NodeId {
        self.enforce_invariants();
        self.dirty = true;
        let change = self.selection.on_tree_changed(&self.tree, active);
        self.notify(&change);
        change.active
    }

    /// Debug builds stop on a broken table; release builds renumber it
    fn enforce_invariants(&mut self) {
        let table_ids: Vec<NodeId> = self.tree.tables().map(|t| t.id()).collect();
        for table_id in table_ids {
            let checked = self.tree.check_table(table_id);
            debug_assert!(checked.is_ok(), "structural invariant violated: {:?}", checked);
            if let Err(err) = checked {
                error!(table = %table_id, error = %err, "duplicate cell coordinate, renumbering table");
                if let Err(err) = self.tree.normalize_table(table_id) {
                    error!(table = %table_id, error = %err, "failed to renumber table");
                }
            }
        }
    }

    fn notify(&mut self, change: &TreeChange) {
        for observer in &mut self.observers {
            observer.on_tree_changed(change);
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("history", &self.history)
            .field("selection", &self.selection)
            .field("observers", &self.observers.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}
