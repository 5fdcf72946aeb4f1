//! Selection sync - active node, breadcrumb path, and preview invalidation

use layout_tree::{LayoutTree, NodeId};
use serde::{Deserialize, Serialize};

/// What changed after a tree mutation, as seen by observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeChange {
    /// The node the user is left on
    pub active: NodeId,
    /// Whether the active node differs from before; the property panel
    /// repopulates only in that case
    pub active_changed: bool,
    /// Breadcrumb from the root to the active node
    pub path: String,
}

/// Something that reacts to tree changes: a property panel, an outline view,
/// a preview pane
pub trait TreeObserver: Send {
    fn on_tree_changed(&mut self, change: &TreeChange);
}

/// Keeps the active node, its breadcrumb path, and the preview flag in step
/// with the tree
#[derive(Debug, Clone, Default)]
pub struct SelectionSync {
    active: Option<NodeId>,
    path: String,
    preview_invalidated: bool,
}

impl SelectionSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the node a mutation left the user on.
    ///
    /// A node that is no longer in the tree falls back to the root.
    pub fn on_tree_changed(&mut self, tree: &LayoutTree, active: NodeId) -> TreeChange {
        let active = if tree.contains(active) { active } else { tree.root_id() };
        let active_changed = self.active != Some(active);

        self.active = Some(active);
        self.path = tree.breadcrumb(active).unwrap_or_default();
        self.preview_invalidated = true;

        TreeChange {
            active,
            active_changed,
            path: self.path.clone(),
        }
    }

    /// Change the active node without a mutation. Returns `None` for an
    /// unknown node.
    pub fn select(&mut self, tree: &LayoutTree, id: NodeId) -> Option<TreeChange> {
        if !tree.contains(id) {
            return None;
        }
        let active_changed = self.active != Some(id);
        self.active = Some(id);
        self.path = tree.breadcrumb(id).unwrap_or_default();
        Some(TreeChange {
            active: id,
            active_changed,
            path: self.path.clone(),
        })
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn preview_invalidated(&self) -> bool {
        self.preview_invalidated
    }

    /// Clear the preview flag; returns whether a redraw was pending
    pub fn take_preview_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.preview_invalidated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_tree::{Node, Table};

    #[test]
    fn test_path_and_flags() {
        let mut tree = LayoutTree::new();
        let table_id = tree
            .add_table(tree.root_id(), Table::new().with_name("menu"))
            .unwrap();
        let cell = tree.add_cell(table_id, 1, 0).unwrap();

        let mut sync = SelectionSync::new();
        let change = sync.on_tree_changed(&tree, cell);
        assert!(change.active_changed);
        assert_eq!(change.path, "Root > menu > Cell (1, 0)");
        assert_eq!(sync.path(), change.path);

        let again = sync.on_tree_changed(&tree, cell);
        assert!(!again.active_changed);

        assert!(sync.take_preview_invalidation());
        assert!(!sync.take_preview_invalidation());
    }

    #[test]
    fn test_missing_node_falls_back_to_root() {
        let tree = LayoutTree::with_empty_table().unwrap();
        let mut sync = SelectionSync::new();
        let change = sync.on_tree_changed(&tree, NodeId::new());
        assert_eq!(change.active, tree.root_id());
        assert_eq!(change.path, "Root");
    }

    #[test]
    fn test_select() {
        let tree = LayoutTree::with_empty_table().unwrap();
        let table_id = tree.tables().next().unwrap().id();
        let mut sync = SelectionSync::new();

        assert!(sync.select(&tree, NodeId::new()).is_none());
        let change = sync.select(&tree, table_id).unwrap();
        assert_eq!(change.active, table_id);
        assert_eq!(sync.active(), Some(table_id));
        assert!(!sync.preview_invalidated());
    }
}
