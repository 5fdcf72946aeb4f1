//! Table editing commands
//!
//! This module implements the structural table gestures of the composer:
//! - InsertRow: open a row above/below the active cell with one new cell
//! - DeleteRow: remove the active cell's row
//! - InsertColumn: open a column left/right of the active cell
//! - DeleteColumn: remove the active cell's column from every row
//! - InsertCell: insert a single cell left/right of the active cell
//! - DeleteCell: remove the active cell and its contents
//! - ResizeCell: replace the active cell's sizing properties

use crate::command::{describe_node, refuse};
use crate::{Command, EditContext, EditError, Result};
use layout_tree::{
    Cell, CellCoord, CellProperties, LayoutTree, Node, NodeId, Placement, Subtree,
};
use serde::{Deserialize, Serialize};

/// Which side of the active cell a new row or column goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertSide {
    Before,
    After,
}

/// Put previously detached cells back into a table
fn restore_cells(tree: &mut LayoutTree, table_id: NodeId, cells: Vec<Subtree>) -> Result<()> {
    for subtree in cells {
        tree.attach_subtree(subtree, Placement::Table(table_id))?;
    }
    Ok(())
}

// =============================================================================
// InsertRow Command
// =============================================================================

/// Open a new row next to the active cell's row, holding one empty cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRow {
    table_id: NodeId,
    /// Row index the new row takes
    at: usize,
    /// Id of the created cell, allocated up front so redo recreates the same node
    new_cell_id: NodeId,
    previous_active: NodeId,
}

impl InsertRow {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, side: InsertSide) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let at = match side {
            InsertSide::Before => cell.row,
            InsertSide::After => cell.row + 1,
        };
        Ok(Self {
            table_id,
            at,
            new_cell_id: NodeId::new(),
            previous_active: ctx.active,
        })
    }

    pub fn above(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::Before)
    }

    pub fn below(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::After)
    }

    pub fn new_cell_id(&self) -> NodeId {
        self.new_cell_id
    }
}

impl Command for InsertRow {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.insert_row(self.table_id, self.at)?;
        tree.insert_cell(self.table_id, Cell::with_id(self.new_cell_id, self.at, 0))?;
        Ok(self.new_cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.remove_cell(self.new_cell_id)?;
        tree.delete_row(self.table_id, self.at)?;
        Ok(self.previous_active)
    }

    fn display_name(&self) -> &str {
        "Insert Row"
    }
}

// =============================================================================
// DeleteRow Command
// =============================================================================

/// Remove the active cell's row; rows below move up.
///
/// The owning table is selected in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRow {
    table_id: NodeId,
    row: usize,
    /// Cells removed by the last execute
    #[serde(skip)]
    removed: Vec<Subtree>,
}

impl DeleteRow {
    /// Refused when the row is the only row of its table
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let other_rows = tree
            .cells_in_table(table_id)
            .iter()
            .any(|c| c.row != cell.row);
        if !other_rows {
            return refuse(format!(
                "Cannot delete the only row of {}",
                describe_node(tree, table_id)
            ));
        }
        Ok(Self {
            table_id,
            row: cell.row,
            removed: Vec::new(),
        })
    }
}

impl Command for DeleteRow {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.removed = tree.delete_row(self.table_id, self.row)?;
        Ok(self.table_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.insert_row(self.table_id, self.row)?;
        restore_cells(tree, self.table_id, std::mem::take(&mut self.removed))?;
        Ok(self.table_id)
    }

    fn display_name(&self) -> &str {
        "Delete Row"
    }
}

// =============================================================================
// InsertColumn Command
// =============================================================================

/// Open a new column next to the active cell's column.
///
/// Every row long enough to reach the column gets one new empty cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertColumn {
    table_id: NodeId,
    at: usize,
    /// (row, id) of each created cell
    new_cells: Vec<(usize, NodeId)>,
    /// The created cell in the active row
    focus_cell: NodeId,
    previous_active: NodeId,
}

impl InsertColumn {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, side: InsertSide) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let at = match side {
            InsertSide::Before => cell.column,
            InsertSide::After => cell.column + 1,
        };
        let new_cells: Vec<(usize, NodeId)> = (0..tree.row_count(table_id))
            .filter(|&row| tree.columns_in_row(table_id, row) >= at)
            .map(|row| (row, NodeId::new()))
            .collect();
        let focus_cell = new_cells
            .iter()
            .find(|(row, _)| *row == cell.row)
            .map(|(_, id)| *id)
            .ok_or_else(|| EditError::InvalidOperation("Active row cannot reach the new column".into()))?;
        Ok(Self {
            table_id,
            at,
            new_cells,
            focus_cell,
            previous_active: ctx.active,
        })
    }

    pub fn left(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::Before)
    }

    pub fn right(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::After)
    }
}

impl Command for InsertColumn {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.insert_column(self.table_id, self.at)?;
        for &(row, id) in &self.new_cells {
            tree.attach_subtree(
                Subtree::from_cell(Cell::with_id(id, row, self.at)),
                Placement::Table(self.table_id),
            )?;
        }
        Ok(self.focus_cell)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        for &(_, id) in &self.new_cells {
            tree.detach_subtree(id)?;
        }
        tree.delete_column(self.table_id, self.at)?;
        Ok(self.previous_active)
    }

    fn display_name(&self) -> &str {
        "Insert Column"
    }
}

// =============================================================================
// DeleteColumn Command
// =============================================================================

/// Remove the active cell's column from every row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteColumn {
    table_id: NodeId,
    column: usize,
    #[serde(skip)]
    removed: Vec<Subtree>,
}

impl DeleteColumn {
    /// Refused when no cell would remain in the table
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let survivors = tree
            .cells_in_table(table_id)
            .iter()
            .any(|c| c.column != cell.column);
        if !survivors {
            return refuse(format!(
                "Cannot delete the only column of {}",
                describe_node(tree, table_id)
            ));
        }
        Ok(Self {
            table_id,
            column: cell.column,
            removed: Vec::new(),
        })
    }
}

impl Command for DeleteColumn {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.removed = tree.delete_column(self.table_id, self.column)?;
        Ok(self.table_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.insert_column(self.table_id, self.column)?;
        restore_cells(tree, self.table_id, std::mem::take(&mut self.removed))?;
        Ok(self.table_id)
    }

    fn display_name(&self) -> &str {
        "Delete Column"
    }
}

// =============================================================================
// InsertCell Command
// =============================================================================

/// Insert one empty cell left or right of the active cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertCell {
    table_id: NodeId,
    coord: CellCoord,
    new_cell_id: NodeId,
    previous_active: NodeId,
}

impl InsertCell {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, side: InsertSide) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let column = match side {
            InsertSide::Before => cell.column,
            InsertSide::After => cell.column + 1,
        };
        Ok(Self {
            table_id,
            coord: CellCoord::new(cell.row, column),
            new_cell_id: NodeId::new(),
            previous_active: ctx.active,
        })
    }

    pub fn left(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::Before)
    }

    pub fn right(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        Self::request(tree, ctx, InsertSide::After)
    }
}

impl Command for InsertCell {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        let cell = Cell::with_id(self.new_cell_id, self.coord.row, self.coord.column);
        Ok(tree.insert_cell(self.table_id, cell)?)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.remove_cell(self.new_cell_id)?;
        Ok(self.previous_active)
    }

    fn display_name(&self) -> &str {
        "Insert Cell"
    }
}

// =============================================================================
// DeleteCell Command
// =============================================================================

/// Remove the active cell with its contents; the rest of its row moves left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCell {
    cell_id: NodeId,
    table_id: NodeId,
    coord: CellCoord,
    #[serde(skip)]
    removed: Option<Subtree>,
}

impl DeleteCell {
    /// Refused for the last remaining cell of a table
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        if tree.cells_in_table(table_id).len() <= 1 {
            return refuse(format!(
                "Cannot delete the last cell of {}",
                describe_node(tree, table_id)
            ));
        }
        Ok(Self {
            cell_id: cell.id(),
            table_id,
            coord: cell.coord(),
            removed: None,
        })
    }
}

impl Command for DeleteCell {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.removed = Some(tree.remove_cell(self.cell_id)?);
        Ok(self.table_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        let subtree = self.removed.take().ok_or_else(|| {
            EditError::InvalidOperation("Delete Cell was never executed".into())
        })?;
        tree.open_row_gap(self.table_id, self.coord)?;
        tree.attach_subtree(subtree, Placement::Table(self.table_id))?;
        Ok(self.table_id)
    }

    fn display_name(&self) -> &str {
        "Delete Cell"
    }
}

// =============================================================================
// ResizeCell Command
// =============================================================================

/// Replace the sizing properties of the active cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeCell {
    cell_id: NodeId,
    old: CellProperties,
    new: CellProperties,
}

impl ResizeCell {
    pub fn request(tree: &LayoutTree, ctx: &EditContext, properties: CellProperties) -> Result<Self> {
        let (cell, _) = ctx.active_cell(tree)?;
        if cell.properties == properties {
            return refuse("Cell properties are unchanged");
        }
        Ok(Self {
            cell_id: cell.id(),
            old: cell.properties,
            new: properties,
        })
    }

    fn apply(&self, tree: &mut LayoutTree, properties: CellProperties) -> Result<NodeId> {
        let cell = tree.get_cell_mut(self.cell_id).ok_or_else(|| {
            EditError::InvalidOperation(format!("Cell {} no longer exists", self.cell_id))
        })?;
        cell.properties = properties;
        Ok(self.cell_id)
    }
}

impl Command for ResizeCell {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.apply(tree, self.new)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        self.apply(tree, self.old)
    }

    fn display_name(&self) -> &str {
        "Resize Cell"
    }
}
