//! Cell content commands: placing, removing and moving widgets, and renaming

use crate::command::{describe_node, refuse};
use crate::{Command, EditContext, EditError, Result};
use layout_tree::{
    validate_name, Cell, Element, ElementKind, LayoutTree, Node, NodeId, NodeType, Placement,
    Subtree, Table,
};
use serde::{Deserialize, Serialize};

/// What to place into an empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewChild {
    /// A nested table that starts with one empty cell
    Table,
    /// A leaf widget
    Element(ElementKind),
}

fn empty_cell(tree: &LayoutTree, ctx: &EditContext) -> Result<NodeId> {
    let (cell, _) = ctx.active_cell(tree)?;
    if !cell.is_empty() {
        return refuse(format!("{} already holds a widget", describe_node(tree, cell.id())));
    }
    Ok(cell.id())
}

// =============================================================================
// SetCellChild Command
// =============================================================================

/// Put a new table or element into the active (empty) cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCellChild {
    cell_id: NodeId,
    content: NewChild,
    /// Pre-allocated ids: the child and, for tables, its first cell
    child_id: NodeId,
    first_cell_id: NodeId,
}

impl SetCellChild {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, content: NewChild) -> Result<Self> {
        Ok(Self {
            cell_id: empty_cell(tree, ctx)?,
            content,
            child_id: NodeId::new(),
            first_cell_id: NodeId::new(),
        })
    }

    pub fn child_id(&self) -> NodeId {
        self.child_id
    }
}

impl Command for SetCellChild {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        match self.content {
            NewChild::Table => {
                tree.set_child(self.cell_id, Subtree::from_table(Table::with_id(self.child_id)))?;
                tree.attach_subtree(
                    Subtree::from_cell(Cell::with_id(self.first_cell_id, 0, 0)),
                    Placement::Table(self.child_id),
                )?;
            }
            NewChild::Element(kind) => {
                let element = Element::with_id(self.child_id, kind);
                tree.set_child(self.cell_id, Subtree::from_element(element))?;
            }
        }
        Ok(self.child_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.take_child(self.cell_id)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        match self.content {
            NewChild::Table => "Add Table",
            NewChild::Element(_) => "Add Widget",
        }
    }
}

// =============================================================================
// ClearCell Command
// =============================================================================

/// Remove the widget held by the active cell; the cell stays selected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCell {
    cell_id: NodeId,
    #[serde(skip)]
    removed: Option<Subtree>,
}

impl ClearCell {
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, _) = ctx.active_cell(tree)?;
        if cell.is_empty() {
            return refuse("Cell is already empty");
        }
        Ok(Self {
            cell_id: cell.id(),
            removed: None,
        })
    }
}

impl Command for ClearCell {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.removed = tree.take_child(self.cell_id)?;
        Ok(self.cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        let subtree = self
            .removed
            .take()
            .ok_or_else(|| EditError::InvalidOperation("Clear Cell was never executed".into()))?;
        tree.set_child(self.cell_id, subtree)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        "Clear Cell"
    }
}

// =============================================================================
// ReparentChild Command
// =============================================================================

/// Move the active cell's widget into another empty cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReparentChild {
    child_id: NodeId,
    from_cell: NodeId,
    to_cell: NodeId,
}

impl ReparentChild {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, target_cell: NodeId) -> Result<Self> {
        let (cell, _) = ctx.active_cell(tree)?;
        let child_id = cell
            .child()
            .ok_or_else(|| EditError::InvalidOperation("Cell holds nothing to move".into()))?;

        let target = tree.get_cell(target_cell).ok_or_else(|| {
            EditError::InvalidOperation(format!("{} is not a cell", describe_node(tree, target_cell)))
        })?;
        if target_cell == cell.id() {
            return refuse("Target is the source cell");
        }
        if !target.is_empty() {
            return refuse(format!("{} already holds a widget", describe_node(tree, target_cell)));
        }
        if tree.descendants(child_id).contains(&target_cell) {
            return refuse("Cannot move a table into one of its own cells");
        }

        Ok(Self {
            child_id,
            from_cell: cell.id(),
            to_cell: target_cell,
        })
    }

    fn move_to(&self, tree: &mut LayoutTree, cell_id: NodeId) -> Result<NodeId> {
        let (subtree, _) = tree.detach_subtree(self.child_id)?;
        tree.set_child(cell_id, subtree)?;
        Ok(self.child_id)
    }
}

impl Command for ReparentChild {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.move_to(tree, self.to_cell)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.move_to(tree, self.from_cell)
    }

    fn display_name(&self) -> &str {
        "Move Widget"
    }
}

// =============================================================================
// RenameNode Command
// =============================================================================

/// Rename the active table, element or root group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameNode {
    node_id: NodeId,
    old: Option<String>,
    new: Option<String>,
}

impl RenameNode {
    /// `None` clears the name
    pub fn request(tree: &LayoutTree, ctx: &EditContext, name: Option<String>) -> Result<Self> {
        let node = tree
            .node(ctx.active)
            .ok_or_else(|| EditError::InvalidOperation(format!("Node {} not found", ctx.active)))?;
        if node.node_type() == NodeType::Cell {
            return refuse("Cells cannot be named");
        }
        if let Some(name) = &name {
            validate_name(name)?;
        }
        let old = node.name().map(str::to_string);
        if old == name {
            return refuse("Name is unchanged");
        }
        Ok(Self {
            node_id: ctx.active,
            old,
            new: name,
        })
    }
}

impl Command for RenameNode {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.set_name(self.node_id, self.new.clone())?;
        Ok(self.node_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.set_name(self.node_id, self.old.clone())?;
        Ok(self.node_id)
    }

    fn display_name(&self) -> &str {
        "Rename"
    }
}
