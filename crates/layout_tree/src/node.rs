//! Core node trait and types

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Enumeration of all node types in the layout tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Root,
    Table,
    Cell,
    Element,
}

impl NodeType {
    /// Label used when a node has no name of its own
    pub fn label(&self) -> &'static str {
        match self {
            NodeType::Root => "Root",
            NodeType::Table => "Table",
            NodeType::Cell => "Cell",
            NodeType::Element => "Element",
        }
    }
}

/// Common interface for all layout nodes
pub trait Node: std::fmt::Debug {
    /// Get the unique ID of this node
    fn id(&self) -> NodeId;

    /// Get the type of this node
    fn node_type(&self) -> NodeType;

    /// Get the IDs of child nodes
    fn children(&self) -> &[NodeId];

    /// Get the ID of the parent node (None for the root or a detached node)
    fn parent(&self) -> Option<NodeId>;

    /// Set the parent node ID
    fn set_parent(&mut self, parent: Option<NodeId>);

    /// User-assigned name, if any
    fn name(&self) -> Option<&str> {
        None
    }
}
