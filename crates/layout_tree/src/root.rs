//! Scene root group

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// The root group of a scene: an ordered list of top-level tables and elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRoot {
    id: NodeId,
    children: Vec<NodeId>,
    pub name: Option<String>,
}

impl LayoutRoot {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            children: Vec::new(),
            name: None,
        }
    }

    /// Add a child at the given index (or at the end)
    pub fn insert_child(&mut self, child_id: NodeId, index: Option<usize>) {
        match index {
            Some(i) if i <= self.children.len() => self.children.insert(i, child_id),
            _ => self.children.push(child_id),
        }
    }

    /// Remove a child, returning its former index
    pub fn remove_child(&mut self, child_id: NodeId) -> Option<usize> {
        let index = self.children.iter().position(|&id| id == child_id)?;
        self.children.remove(index);
        Some(index)
    }
}

impl Default for LayoutRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for LayoutRoot {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Root
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn parent(&self) -> Option<NodeId> {
        None
    }

    fn set_parent(&mut self, _parent: Option<NodeId>) {}

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
