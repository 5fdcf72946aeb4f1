//! Command system for layout editing

use crate::{EditError, Result};
use layout_tree::{Cell, LayoutTree, NodeId};
use serde::{Deserialize, Serialize};

/// Trait for all reversible editing commands.
///
/// A command captures everything it needs to undo itself when it is
/// requested, before the tree is touched. `execute` performs one logical
/// edit and `invert` restores the captured state; both return the node the
/// editor should leave selected.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply the forward mutation
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId>;

    /// Restore the state captured before `execute`
    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;

    /// Menu label for redoing this command
    fn describe_forward(&self) -> String {
        format!("Redo \"{}\"", self.display_name())
    }

    /// Menu label for undoing this command
    fn describe_backward(&self) -> String {
        format!("Undo \"{}\"", self.display_name())
    }
}

/// What the editor is focused on when a gesture is requested.
///
/// Command constructors read from this instead of from any live dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditContext {
    /// The active node
    pub active: NodeId,
}

impl EditContext {
    pub fn new(active: NodeId) -> Self {
        Self { active }
    }

    /// The active node as a cell, with its owning table
    pub fn active_cell<'a>(&self, tree: &'a LayoutTree) -> Result<(&'a Cell, NodeId)> {
        let cell = tree.get_cell(self.active).ok_or_else(|| {
            EditError::InvalidOperation(format!(
                "Active node {} is not a cell",
                describe_node(tree, self.active)
            ))
        })?;
        let table_id = tree.table_of(self.active)?;
        Ok((cell, table_id))
    }
}

/// Short description of a node for error messages
pub(crate) fn describe_node(tree: &LayoutTree, id: NodeId) -> String {
    tree.display_label(id)
        .unwrap_or_else(|| format!("<missing {}>", id))
}

/// Shorthand for refusing a gesture
pub(crate) fn refuse<T>(reason: impl Into<String>) -> Result<T> {
    Err(EditError::InvalidOperation(reason.into()))
}
