//! Cell move commands
//!
//! Vertical moves take a cell out of its row (closing the gap behind it) and
//! append it after the last cell of the neighbouring row. Horizontal moves
//! swap the cell with its neighbour in the same row.

use crate::command::{describe_node, refuse};
use crate::{Command, EditContext, EditError, Result};
use layout_tree::{CellCoord, LayoutTree, Node, NodeId};
use serde::{Deserialize, Serialize};

// =============================================================================
// MoveCellUp Command
// =============================================================================

/// Move a cell to the end of the row above it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCellUp {
    cell_id: NodeId,
    /// Coordinate before the move
    old: CellCoord,
    /// Tail of the row above, computed when requested
    target: CellCoord,
}

impl MoveCellUp {
    /// Build the command for the active cell; refused in the first row
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        if cell.row == 0 {
            return refuse(format!("{} is already in the first row", describe_node(tree, cell.id())));
        }
        let target_row = cell.row - 1;
        Ok(Self {
            cell_id: cell.id(),
            old: cell.coord(),
            target: CellCoord::new(target_row, tree.columns_in_row(table_id, target_row)),
        })
    }

    pub fn target(&self) -> CellCoord {
        self.target
    }
}

impl Command for MoveCellUp {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.relocate_cell(self.cell_id, self.target)?;
        Ok(self.cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.relocate_cell(self.cell_id, self.old)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        "Move Cell Up"
    }
}

// =============================================================================
// MoveCellDown Command
// =============================================================================

/// Move a cell to the end of the row below it.
///
/// Moving past the last row opens a new row, unless the cell is alone in
/// the last row already.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCellDown {
    cell_id: NodeId,
    old: CellCoord,
    target: CellCoord,
}

impl MoveCellDown {
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let is_last_row = cell.row + 1 >= tree.row_count(table_id);
        if is_last_row && tree.columns_in_row(table_id, cell.row) <= 1 {
            return refuse(format!(
                "{} is alone in the last row",
                describe_node(tree, cell.id())
            ));
        }
        let target_row = cell.row + 1;
        Ok(Self {
            cell_id: cell.id(),
            old: cell.coord(),
            target: CellCoord::new(target_row, tree.columns_in_row(table_id, target_row)),
        })
    }

    pub fn target(&self) -> CellCoord {
        self.target
    }
}

impl Command for MoveCellDown {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.relocate_cell(self.cell_id, self.target)?;
        Ok(self.cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.relocate_cell(self.cell_id, self.old)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        "Move Cell Down"
    }
}

// =============================================================================
// MoveCellLeft / MoveCellRight Commands
// =============================================================================

/// Swap a cell with its left neighbour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCellLeft {
    cell_id: NodeId,
    neighbor_id: NodeId,
}

impl MoveCellLeft {
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        if cell.column == 0 {
            return refuse(format!("{} is already in the first column", describe_node(tree, cell.id())));
        }
        let neighbor_id = tree
            .cell_at(table_id, CellCoord::new(cell.row, cell.column - 1))
            .ok_or_else(|| EditError::InvalidOperation("No cell to the left".into()))?;
        Ok(Self {
            cell_id: cell.id(),
            neighbor_id,
        })
    }
}

impl Command for MoveCellLeft {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.swap_cells(self.cell_id, self.neighbor_id)?;
        Ok(self.cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.swap_cells(self.cell_id, self.neighbor_id)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        "Move Cell Left"
    }
}

/// Swap a cell with its right neighbour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCellRight {
    cell_id: NodeId,
    neighbor_id: NodeId,
}

impl MoveCellRight {
    pub fn request(tree: &LayoutTree, ctx: &EditContext) -> Result<Self> {
        let (cell, table_id) = ctx.active_cell(tree)?;
        let neighbor_id = tree
            .cell_at(table_id, CellCoord::new(cell.row, cell.column + 1))
            .ok_or_else(|| {
                EditError::InvalidOperation(format!(
                    "{} is already in the last column",
                    describe_node(tree, cell.id())
                ))
            })?;
        Ok(Self {
            cell_id: cell.id(),
            neighbor_id,
        })
    }
}

impl Command for MoveCellRight {
    fn execute(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.swap_cells(self.cell_id, self.neighbor_id)?;
        Ok(self.cell_id)
    }

    fn invert(&mut self, tree: &mut LayoutTree) -> Result<NodeId> {
        tree.swap_cells(self.cell_id, self.neighbor_id)?;
        Ok(self.cell_id)
    }

    fn display_name(&self) -> &str {
        "Move Cell Right"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_tree::Table;

    /// Row 0 has columns {0, 1}, row 1 has column {0}
    fn setup() -> (LayoutTree, NodeId, [NodeId; 3]) {
        let mut tree = LayoutTree::new();
        let table_id = tree.add_table(tree.root_id(), Table::new()).unwrap();
        let a = tree.add_cell(table_id, 0, 0).unwrap();
        let b = tree.add_cell(table_id, 0, 1).unwrap();
        let c = tree.add_cell(table_id, 1, 0).unwrap();
        (tree, table_id, [a, b, c])
    }

    fn coord(tree: &LayoutTree, id: NodeId) -> CellCoord {
        tree.get_cell(id).unwrap().coord()
    }

    #[test]
    fn test_move_up_appends_to_row_above() {
        let (mut tree, table_id, [a, b, c]) = setup();
        let mut cmd = MoveCellUp::request(&tree, &EditContext::new(c)).unwrap();
        assert_eq!(cmd.target(), CellCoord::new(0, 2));

        let active = cmd.execute(&mut tree).unwrap();
        assert_eq!(active, c);

        let order: Vec<_> = tree.cells_in_row(table_id, 0).iter().map(|cell| cell.id()).collect();
        assert_eq!(order, vec![a, b, c]);
        let columns: Vec<_> = tree.cells_in_row(table_id, 0).iter().map(|cell| cell.column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
        tree.check_table(table_id).unwrap();
    }

    #[test]
    fn test_move_up_roundtrip() {
        let (mut tree, _, [_, _, c]) = setup();
        let before = tree.clone();
        let mut cmd = MoveCellUp::request(&tree, &EditContext::new(c)).unwrap();
        cmd.execute(&mut tree).unwrap();
        assert_eq!(cmd.invert(&mut tree).unwrap(), c);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_move_up_closes_gap_in_vacated_row() {
        let (mut tree, table_id, [a, b, c]) = setup();
        let d = tree.add_cell(table_id, 1, 1).unwrap();
        let before = tree.clone();

        let mut cmd = MoveCellUp::request(&tree, &EditContext::new(c)).unwrap();
        cmd.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, d), CellCoord::new(1, 0));
        assert_eq!(coord(&tree, c), CellCoord::new(0, 2));
        assert_eq!(coord(&tree, a), CellCoord::new(0, 0));
        assert_eq!(coord(&tree, b), CellCoord::new(0, 1));

        cmd.invert(&mut tree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_move_up_refused_in_first_row() {
        let (tree, _, [a, _, _]) = setup();
        let result = MoveCellUp::request(&tree, &EditContext::new(a));
        assert!(matches!(result, Err(EditError::InvalidOperation(_))));
    }

    #[test]
    fn test_move_down_appends_to_row_below() {
        let (mut tree, _, [_, b, c]) = setup();
        let before = tree.clone();
        let mut cmd = MoveCellDown::request(&tree, &EditContext::new(b)).unwrap();
        assert_eq!(cmd.target(), CellCoord::new(1, 1));

        cmd.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, b), CellCoord::new(1, 1));
        assert_eq!(coord(&tree, c), CellCoord::new(1, 0));

        cmd.invert(&mut tree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_move_down_opens_new_row() {
        let (mut tree, table_id, [a, _, _]) = setup();
        // Move (0,0) down twice: first into row 1, then out of a shared last row
        let mut first = MoveCellDown::request(&tree, &EditContext::new(a)).unwrap();
        first.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, a), CellCoord::new(1, 1));

        let mut second = MoveCellDown::request(&tree, &EditContext::new(a)).unwrap();
        second.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, a), CellCoord::new(2, 0));
        assert_eq!(tree.row_count(table_id), 3);
    }

    #[test]
    fn test_move_down_refused_when_alone_in_last_row() {
        let (tree, _, [_, _, c]) = setup();
        assert!(MoveCellDown::request(&tree, &EditContext::new(c)).is_err());
    }

    #[test]
    fn test_move_left_and_right_swap() {
        let (mut tree, _, [a, b, _]) = setup();
        let before = tree.clone();

        let mut left = MoveCellLeft::request(&tree, &EditContext::new(b)).unwrap();
        left.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, b), CellCoord::new(0, 0));
        assert_eq!(coord(&tree, a), CellCoord::new(0, 1));
        left.invert(&mut tree).unwrap();
        assert_eq!(tree, before);

        let mut right = MoveCellRight::request(&tree, &EditContext::new(a)).unwrap();
        right.execute(&mut tree).unwrap();
        assert_eq!(coord(&tree, a), CellCoord::new(0, 1));
        right.invert(&mut tree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_horizontal_moves_refused_at_edges() {
        let (tree, _, [a, b, _]) = setup();
        assert!(MoveCellLeft::request(&tree, &EditContext::new(a)).is_err());
        assert!(MoveCellRight::request(&tree, &EditContext::new(b)).is_err());
    }

    #[test]
    fn test_move_requires_cell_selection() {
        let (tree, table_id, _) = setup();
        assert!(MoveCellUp::request(&tree, &EditContext::new(table_id)).is_err());
    }
}
