//! Layout tree operations and storage

use crate::{
    Cell, CellCoord, Element, LayoutError, LayoutRoot, Node, NodeId, NodeType, Result, Table,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Storage for the different node types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStorage {
    pub tables: HashMap<NodeId, Table>,
    pub cells: HashMap<NodeId, Cell>,
    pub elements: HashMap<NodeId, Element>,
}

/// Where a detached subtree hangs in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Top-level child of the root group at an index
    Root { index: usize },
    /// Sole child of a cell
    Cell(NodeId),
    /// A cell inside a table; the coordinate travels with the cell
    Table(NodeId),
}

/// A node and all of its descendants lifted out of the tree.
///
/// Holding a subtree keeps every id and attribute, so attaching it again
/// restores the exact nodes that were detached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtree {
    top: NodeId,
    tables: Vec<Table>,
    cells: Vec<Cell>,
    elements: Vec<Element>,
}

impl Subtree {
    /// A fresh table with no cells
    pub fn from_table(table: Table) -> Self {
        Self {
            top: table.id(),
            tables: vec![table],
            cells: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// A fresh leaf element
    pub fn from_element(element: Element) -> Self {
        Self {
            top: element.id(),
            tables: Vec::new(),
            cells: Vec::new(),
            elements: vec![element],
        }
    }

    /// A fresh empty cell
    pub fn from_cell(cell: Cell) -> Self {
        Self {
            top: cell.id(),
            tables: Vec::new(),
            cells: vec![cell],
            elements: Vec::new(),
        }
    }

    pub fn top(&self) -> NodeId {
        self.top
    }

    /// Type of the top node
    pub fn top_type(&self) -> Option<NodeType> {
        if self.tables.iter().any(|t| t.id() == self.top) {
            Some(NodeType::Table)
        } else if self.cells.iter().any(|c| c.id() == self.top) {
            Some(NodeType::Cell)
        } else if self.elements.iter().any(|e| e.id() == self.top) {
            Some(NodeType::Element)
        } else {
            None
        }
    }

    /// Coordinate of the top node when it is a cell
    pub fn top_coord(&self) -> Option<CellCoord> {
        self.cells.iter().find(|c| c.id() == self.top).map(Cell::coord)
    }

    pub fn node_count(&self) -> usize {
        self.tables.len() + self.cells.len() + self.elements.len()
    }
}

/// The complete layout tree of one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTree {
    /// The root group
    pub root: LayoutRoot,
    /// Storage for all nodes below the root
    pub nodes: NodeStorage,
}

impl LayoutTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            root: LayoutRoot::new(),
            nodes: NodeStorage::default(),
        }
    }

    /// Create a tree holding a single empty table with one cell at (0, 0)
    pub fn with_empty_table() -> Result<Self> {
        let mut tree = Self::new();
        let table_id = tree.add_table(tree.root_id(), Table::new())?;
        tree.add_cell(table_id, 0, 0)?;
        Ok(tree)
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_type(id).is_some()
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        if id == self.root.id() {
            Some(NodeType::Root)
        } else if self.nodes.tables.contains_key(&id) {
            Some(NodeType::Table)
        } else if self.nodes.cells.contains_key(&id) {
            Some(NodeType::Cell)
        } else if self.nodes.elements.contains_key(&id) {
            Some(NodeType::Element)
        } else {
            None
        }
    }

    /// Get any node through the common trait
    pub fn node(&self, id: NodeId) -> Option<&dyn Node> {
        if id == self.root.id() {
            return Some(&self.root as &dyn Node);
        }
        if let Some(table) = self.nodes.tables.get(&id) {
            return Some(table as &dyn Node);
        }
        if let Some(cell) = self.nodes.cells.get(&id) {
            return Some(cell as &dyn Node);
        }
        self.nodes.elements.get(&id).map(|e| e as &dyn Node)
    }

    pub fn get_table(&self, id: NodeId) -> Option<&Table> {
        self.nodes.tables.get(&id)
    }

    pub fn get_table_mut(&mut self, id: NodeId) -> Option<&mut Table> {
        self.nodes.tables.get_mut(&id)
    }

    pub fn get_cell(&self, id: NodeId) -> Option<&Cell> {
        self.nodes.cells.get(&id)
    }

    pub fn get_cell_mut(&mut self, id: NodeId) -> Option<&mut Cell> {
        self.nodes.cells.get_mut(&id)
    }

    pub fn get_element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.elements.get(&id)
    }

    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.elements.get_mut(&id)
    }

    fn cell(&self, id: NodeId) -> Result<&Cell> {
        self.nodes.cells.get(&id).ok_or(LayoutError::NodeNotFound(id.as_uuid()))
    }

    fn cell_mut(&mut self, id: NodeId) -> Result<&mut Cell> {
        self.nodes.cells.get_mut(&id).ok_or(LayoutError::NodeNotFound(id.as_uuid()))
    }

    fn table(&self, id: NodeId) -> Result<&Table> {
        self.nodes.tables.get(&id).ok_or(LayoutError::NodeNotFound(id.as_uuid()))
    }

    /// The table owning a cell
    pub fn table_of(&self, cell_id: NodeId) -> Result<NodeId> {
        self.cell(cell_id)?.parent().ok_or_else(|| {
            LayoutError::TreeStructure(format!("Cell {} has no owning table", cell_id))
        })
    }

    /// Cells of a table in iteration order
    pub fn cells_in_table(&self, table_id: NodeId) -> Vec<&Cell> {
        self.nodes
            .tables
            .get(&table_id)
            .map(|t| {
                t.children()
                    .iter()
                    .filter_map(|id| self.nodes.cells.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cells of one row in column order
    pub fn cells_in_row(&self, table_id: NodeId, row: usize) -> Vec<&Cell> {
        self.cells_in_table(table_id)
            .into_iter()
            .filter(|c| c.row == row)
            .collect()
    }

    /// Number of cells in a row
    pub fn columns_in_row(&self, table_id: NodeId, row: usize) -> usize {
        self.cells_in_row(table_id, row).len()
    }

    /// Number of rows, derived from the highest occupied row
    pub fn row_count(&self, table_id: NodeId) -> usize {
        self.cells_in_table(table_id)
            .iter()
            .map(|c| c.row + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of columns, derived from the widest row
    pub fn column_count(&self, table_id: NodeId) -> usize {
        self.cells_in_table(table_id)
            .iter()
            .map(|c| c.column + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn cell_at(&self, table_id: NodeId, coord: CellCoord) -> Option<NodeId> {
        self.cells_in_table(table_id)
            .into_iter()
            .find(|c| c.coord() == coord)
            .map(Cell::id)
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Add an empty table under the root group or into an empty cell
    pub fn add_table(&mut self, parent: NodeId, table: Table) -> Result<NodeId> {
        let placement = self.placement_for_child(parent)?;
        self.attach_subtree(Subtree::from_table(table), placement)
    }

    /// Add an element under the root group or into an empty cell
    pub fn add_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        let placement = self.placement_for_child(parent)?;
        self.attach_subtree(Subtree::from_element(element), placement)
    }

    /// Add an empty cell at a free coordinate
    pub fn add_cell(&mut self, table_id: NodeId, row: usize, column: usize) -> Result<NodeId> {
        self.attach_subtree(Subtree::from_cell(Cell::new(row, column)), Placement::Table(table_id))
    }

    fn placement_for_child(&self, parent: NodeId) -> Result<Placement> {
        match self.node_type(parent) {
            Some(NodeType::Root) => Ok(Placement::Root { index: self.root.children().len() }),
            Some(NodeType::Cell) => Ok(Placement::Cell(parent)),
            Some(other) => Err(LayoutError::InvalidOperation(format!(
                "A {} cannot hold a table or element directly",
                other.label()
            ))),
            None => Err(LayoutError::NodeNotFound(parent.as_uuid())),
        }
    }

    // =========================================================================
    // Detach / attach
    // =========================================================================

    /// All ids in the subtree rooted at `id`, parents before children
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node(current) {
                result.push(current);
                stack.extend(node.children().iter().rev().copied());
            }
        }
        result
    }

    /// Lift a node and its descendants out of the tree.
    ///
    /// Sibling coordinates are left untouched; callers close any gap.
    pub fn detach_subtree(&mut self, id: NodeId) -> Result<(Subtree, Placement)> {
        let node_type = self
            .node_type(id)
            .ok_or(LayoutError::NodeNotFound(id.as_uuid()))?;
        if node_type == NodeType::Root {
            return Err(LayoutError::InvalidOperation("The root group cannot be detached".into()));
        }

        let parent = self
            .node(id)
            .and_then(|n| n.parent())
            .ok_or_else(|| LayoutError::TreeStructure(format!("Node {} has no parent", id)))?;

        let placement = match self.node_type(parent) {
            Some(NodeType::Root) => {
                let index = self.root.remove_child(id).ok_or_else(|| {
                    LayoutError::TreeStructure(format!("Root does not list child {}", id))
                })?;
                Placement::Root { index }
            }
            Some(NodeType::Cell) => {
                self.cell_mut(parent)?.set_child(None);
                Placement::Cell(parent)
            }
            Some(NodeType::Table) => {
                if let Some(table) = self.nodes.tables.get_mut(&parent) {
                    table.remove_cell(id);
                }
                Placement::Table(parent)
            }
            _ => {
                return Err(LayoutError::TreeStructure(format!(
                    "Node {} has a dangling parent {}",
                    id, parent
                )))
            }
        };

        let mut subtree = Subtree {
            top: id,
            tables: Vec::new(),
            cells: Vec::new(),
            elements: Vec::new(),
        };
        for node_id in self.descendants(id) {
            if let Some(table) = self.nodes.tables.remove(&node_id) {
                subtree.tables.push(table);
            } else if let Some(cell) = self.nodes.cells.remove(&node_id) {
                subtree.cells.push(cell);
            } else if let Some(element) = self.nodes.elements.remove(&node_id) {
                subtree.elements.push(element);
            }
        }

        Ok((subtree, placement))
    }

    /// Put a subtree back into the tree. Returns the id of its top node.
    pub fn attach_subtree(&mut self, subtree: Subtree, placement: Placement) -> Result<NodeId> {
        let top = subtree.top;
        let top_type = subtree
            .top_type()
            .ok_or_else(|| LayoutError::TreeStructure(format!("Subtree is missing its top node {}", top)))?;

        let collision = subtree
            .tables
            .iter()
            .map(Table::id)
            .chain(subtree.cells.iter().map(Cell::id))
            .chain(subtree.elements.iter().map(Element::id))
            .find(|&id| self.contains(id));
        if let Some(id) = collision {
            return Err(LayoutError::TreeStructure(format!("Node {} is already in the tree", id)));
        }

        let parent = match placement {
            Placement::Root { .. } => {
                if top_type == NodeType::Cell {
                    return Err(LayoutError::InvalidOperation(
                        "A cell can only be placed in a table".into(),
                    ));
                }
                self.root.id()
            }
            Placement::Cell(cell_id) => {
                if top_type == NodeType::Cell {
                    return Err(LayoutError::InvalidOperation(
                        "A cell can only be placed in a table".into(),
                    ));
                }
                if !self.cell(cell_id)?.is_empty() {
                    return Err(LayoutError::InvalidOperation(format!(
                        "Cell {} already holds a child",
                        cell_id
                    )));
                }
                cell_id
            }
            Placement::Table(table_id) => {
                if top_type != NodeType::Cell {
                    return Err(LayoutError::InvalidOperation(
                        "Only cells can be placed directly in a table".into(),
                    ));
                }
                self.table(table_id)?;
                if let Some(coord) = subtree.top_coord() {
                    if self.cell_at(table_id, coord).is_some() {
                        return Err(LayoutError::DuplicateCoordinate {
                            table: table_id.as_uuid(),
                            row: coord.row,
                            column: coord.column,
                        });
                    }
                }
                table_id
            }
        };

        for mut table in subtree.tables {
            if table.id() == top {
                table.set_parent(Some(parent));
            }
            self.nodes.tables.insert(table.id(), table);
        }
        for mut cell in subtree.cells {
            if cell.id() == top {
                cell.set_parent(Some(parent));
            }
            self.nodes.cells.insert(cell.id(), cell);
        }
        for mut element in subtree.elements {
            if element.id() == top {
                element.set_parent(Some(parent));
            }
            self.nodes.elements.insert(element.id(), element);
        }

        match placement {
            Placement::Root { index } => self.root.insert_child(top, Some(index)),
            Placement::Cell(cell_id) => self.cell_mut(cell_id)?.set_child(Some(top)),
            Placement::Table(table_id) => {
                if let Some(table) = self.nodes.tables.get_mut(&table_id) {
                    table.push_cell(top);
                }
                self.sort_table(table_id)?;
            }
        }

        Ok(top)
    }

    // =========================================================================
    // Structural operations
    // =========================================================================

    /// Rebuild a table's cell order from cell coordinates
    pub fn sort_table(&mut self, table_id: NodeId) -> Result<()> {
        let table = self
            .nodes
            .tables
            .get_mut(&table_id)
            .ok_or(LayoutError::NodeNotFound(table_id.as_uuid()))?;
        table.sort(&self.nodes.cells);
        Ok(())
    }

    /// Apply `f` to every cell of a table except `skip`
    fn for_each_cell_in_table<F>(&mut self, table_id: NodeId, skip: Option<NodeId>, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Cell),
    {
        let ids: Vec<NodeId> = self.table(table_id)?.children().to_vec();
        for id in ids {
            if Some(id) == skip {
                continue;
            }
            if let Some(cell) = self.nodes.cells.get_mut(&id) {
                f(cell);
            }
        }
        Ok(())
    }

    /// Move a cell to another coordinate of the same table.
    ///
    /// Cells right of the old position in the vacated row shift left by one,
    /// then cells at or right of the target in the destination row shift
    /// right by one. Returns the cell's previous coordinate.
    pub fn relocate_cell(&mut self, cell_id: NodeId, to: CellCoord) -> Result<CellCoord> {
        let table_id = self.table_of(cell_id)?;
        let from = self.cell(cell_id)?.coord();

        self.for_each_cell_in_table(table_id, Some(cell_id), |c| {
            if c.row == from.row && c.column > from.column {
                c.column -= 1;
            }
        })?;
        self.for_each_cell_in_table(table_id, Some(cell_id), |c| {
            if c.row == to.row && c.column >= to.column {
                c.column += 1;
            }
        })?;
        self.cell_mut(cell_id)?.set_coord(to);
        self.sort_table(table_id)?;
        Ok(from)
    }

    /// Exchange the coordinates of two cells of the same table
    pub fn swap_cells(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let table_id = self.table_of(a)?;
        if self.table_of(b)? != table_id {
            return Err(LayoutError::InvalidOperation(
                "Cells belong to different tables".into(),
            ));
        }
        let coord_a = self.cell(a)?.coord();
        let coord_b = self.cell(b)?.coord();
        self.cell_mut(a)?.set_coord(coord_b);
        self.cell_mut(b)?.set_coord(coord_a);
        self.sort_table(table_id)
    }

    /// Open an empty row: every cell with `row >= at` moves down one row
    pub fn insert_row(&mut self, table_id: NodeId, at: usize) -> Result<()> {
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.row >= at {
                c.row += 1;
            }
        })?;
        self.sort_table(table_id)
    }

    /// Remove a row: its cells are detached and later rows move up one row.
    /// The detached cells are returned in column order.
    pub fn delete_row(&mut self, table_id: NodeId, at: usize) -> Result<Vec<Subtree>> {
        let doomed: Vec<NodeId> = self.cells_in_row(table_id, at).iter().map(|c| c.id()).collect();
        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            let (subtree, _) = self.detach_subtree(id)?;
            removed.push(subtree);
        }
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.row > at {
                c.row -= 1;
            }
        })?;
        self.sort_table(table_id)?;
        Ok(removed)
    }

    /// Open an empty column: every cell with `column >= at` moves right
    pub fn insert_column(&mut self, table_id: NodeId, at: usize) -> Result<()> {
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.column >= at {
                c.column += 1;
            }
        })?;
        self.sort_table(table_id)
    }

    /// Remove a column from every row; later columns move left.
    /// The detached cells are returned in row order.
    pub fn delete_column(&mut self, table_id: NodeId, at: usize) -> Result<Vec<Subtree>> {
        let doomed: Vec<NodeId> = self
            .cells_in_table(table_id)
            .iter()
            .filter(|c| c.column == at)
            .map(|c| c.id())
            .collect();
        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            let (subtree, _) = self.detach_subtree(id)?;
            removed.push(subtree);
        }
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.column > at {
                c.column -= 1;
            }
        })?;
        self.sort_table(table_id)?;
        Ok(removed)
    }

    /// Open a gap in one row: cells of `coord.row` with `column >= coord.column` move right
    pub fn open_row_gap(&mut self, table_id: NodeId, coord: CellCoord) -> Result<()> {
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.row == coord.row && c.column >= coord.column {
                c.column += 1;
            }
        })?;
        self.sort_table(table_id)
    }

    /// Close a gap in one row: cells of `coord.row` with `column > coord.column` move left
    pub fn close_row_gap(&mut self, table_id: NodeId, coord: CellCoord) -> Result<()> {
        self.for_each_cell_in_table(table_id, None, |c| {
            if c.row == coord.row && c.column > coord.column {
                c.column -= 1;
            }
        })?;
        self.sort_table(table_id)
    }

    /// Insert a fresh cell into a row, shifting the rest of the row right
    pub fn insert_cell(&mut self, table_id: NodeId, cell: Cell) -> Result<NodeId> {
        let coord = cell.coord();
        self.open_row_gap(table_id, coord)?;
        self.attach_subtree(Subtree::from_cell(cell), Placement::Table(table_id))
    }

    /// Remove a cell with its contents, shifting the rest of the row left
    pub fn remove_cell(&mut self, cell_id: NodeId) -> Result<Subtree> {
        let table_id = self.table_of(cell_id)?;
        let coord = self.cell(cell_id)?.coord();
        let (subtree, _) = self.detach_subtree(cell_id)?;
        self.close_row_gap(table_id, coord)?;
        Ok(subtree)
    }

    /// Place a table or element subtree into an empty cell
    pub fn set_child(&mut self, cell_id: NodeId, child: Subtree) -> Result<NodeId> {
        self.attach_subtree(child, Placement::Cell(cell_id))
    }

    /// Lift a cell's child out of the tree, leaving the cell empty
    pub fn take_child(&mut self, cell_id: NodeId) -> Result<Option<Subtree>> {
        match self.cell(cell_id)?.child() {
            Some(child_id) => Ok(Some(self.detach_subtree(child_id)?.0)),
            None => Ok(None),
        }
    }

    /// Replace a node's name, returning the previous one
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) -> Result<Option<String>> {
        let slot = if id == self.root.id() {
            &mut self.root.name
        } else if let Some(table) = self.nodes.tables.get_mut(&id) {
            &mut table.name
        } else if let Some(element) = self.nodes.elements.get_mut(&id) {
            &mut element.name
        } else if self.nodes.cells.contains_key(&id) {
            return Err(LayoutError::InvalidOperation("Cells cannot be named".into()));
        } else {
            return Err(LayoutError::NodeNotFound(id.as_uuid()));
        };
        Ok(std::mem::replace(slot, name))
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Fail on the first coordinate shared by two cells of a table
    pub fn check_table(&self, table_id: NodeId) -> Result<()> {
        let mut seen = HashSet::new();
        for cell in self.cells_in_table(table_id) {
            if !seen.insert(cell.coord()) {
                return Err(LayoutError::DuplicateCoordinate {
                    table: table_id.as_uuid(),
                    row: cell.row,
                    column: cell.column,
                });
            }
        }
        Ok(())
    }

    /// Sort a table and renumber each row's columns to `0..n`.
    /// Returns whether any cell moved.
    pub fn normalize_table(&mut self, table_id: NodeId) -> Result<bool> {
        self.sort_table(table_id)?;
        let ids: Vec<NodeId> = self.table(table_id)?.children().to_vec();
        let mut changed = false;
        let mut current_row = None;
        let mut next_column = 0;
        for id in ids {
            let cell = self.cell_mut(id)?;
            if current_row != Some(cell.row) {
                current_row = Some(cell.row);
                next_column = 0;
            }
            if cell.column != next_column {
                cell.column = next_column;
                changed = true;
            }
            next_column += 1;
        }
        if changed {
            self.sort_table(table_id)?;
        }
        Ok(changed)
    }

    // =========================================================================
    // Paths
    // =========================================================================

    /// Ancestor chain from the root down to `target_id` (inclusive)
    pub fn path_to_node(&self, target_id: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![target_id];
        let mut current = self.node(target_id)?;
        while let Some(parent) = current.parent() {
            if path.contains(&parent) {
                return None;
            }
            path.push(parent);
            current = self.node(parent)?;
        }
        if current.node_type() != NodeType::Root {
            return None;
        }
        path.reverse();
        Some(path)
    }

    /// Identifier shown for a node in breadcrumbs
    pub fn display_label(&self, id: NodeId) -> Option<String> {
        let node = self.node(id)?;
        if let Some(name) = node.name() {
            return Some(name.to_string());
        }
        let label = match node.node_type() {
            NodeType::Cell => {
                let cell = self.nodes.cells.get(&id)?;
                format!("Cell {}", cell.coord())
            }
            NodeType::Element => self.nodes.elements.get(&id)?.kind.label().to_string(),
            other => other.label().to_string(),
        };
        Some(label)
    }

    /// Breadcrumb string from the root to a node
    pub fn breadcrumb(&self, id: NodeId) -> Option<String> {
        let labels = self
            .path_to_node(id)?
            .into_iter()
            .map(|node_id| self.display_label(node_id))
            .collect::<Option<Vec<_>>>()?;
        Some(labels.join(" > "))
    }

    /// Tables anywhere in the tree
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.nodes.tables.values()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;
    use proptest::prelude::*;

    /// Row 0 has columns {0, 1}, row 1 has column {0}
    fn two_row_table() -> (LayoutTree, NodeId, Vec<NodeId>) {
        let mut tree = LayoutTree::new();
        let table_id = tree.add_table(tree.root_id(), Table::new()).unwrap();
        let cells = vec![
            tree.add_cell(table_id, 0, 0).unwrap(),
            tree.add_cell(table_id, 0, 1).unwrap(),
            tree.add_cell(table_id, 1, 0).unwrap(),
        ];
        (tree, table_id, cells)
    }

    fn coords(tree: &LayoutTree, table_id: NodeId) -> Vec<(usize, usize)> {
        tree.cells_in_table(table_id)
            .iter()
            .map(|c| (c.row, c.column))
            .collect()
    }

    #[test]
    fn test_with_empty_table() {
        let tree = LayoutTree::with_empty_table().unwrap();
        let table = tree.tables().next().unwrap();
        assert_eq!(table.cell_count(), 1);
        assert_eq!(tree.row_count(table.id()), 1);
    }

    #[test]
    fn test_columns_and_rows() {
        let (tree, table_id, _) = two_row_table();
        assert_eq!(tree.columns_in_row(table_id, 0), 2);
        assert_eq!(tree.columns_in_row(table_id, 1), 1);
        assert_eq!(tree.columns_in_row(table_id, 5), 0);
        assert_eq!(tree.row_count(table_id), 2);
        assert_eq!(tree.column_count(table_id), 2);
    }

    #[test]
    fn test_add_cell_rejects_duplicate() {
        let (mut tree, table_id, _) = two_row_table();
        let result = tree.add_cell(table_id, 0, 1);
        assert!(matches!(result, Err(LayoutError::DuplicateCoordinate { .. })));
    }

    #[test]
    fn test_relocate_cell_up() {
        let (mut tree, table_id, cells) = two_row_table();
        let target = CellCoord::new(0, tree.columns_in_row(table_id, 0));
        let from = tree.relocate_cell(cells[2], target).unwrap();

        assert_eq!(from, CellCoord::new(1, 0));
        assert_eq!(coords(&tree, table_id), vec![(0, 0), (0, 1), (0, 2)]);
        tree.check_table(table_id).unwrap();
    }

    #[test]
    fn test_relocate_closes_and_opens_gaps() {
        let (mut tree, table_id, cells) = two_row_table();
        // Move (0, 0) into row 1 at column 0: row 0 closes up, row 1 opens up
        tree.relocate_cell(cells[0], CellCoord::new(1, 0)).unwrap();

        assert_eq!(tree.get_cell(cells[1]).unwrap().coord(), CellCoord::new(0, 0));
        assert_eq!(tree.get_cell(cells[0]).unwrap().coord(), CellCoord::new(1, 0));
        assert_eq!(tree.get_cell(cells[2]).unwrap().coord(), CellCoord::new(1, 1));
    }

    #[test]
    fn test_swap_cells() {
        let (mut tree, table_id, cells) = two_row_table();
        tree.swap_cells(cells[0], cells[1]).unwrap();
        let order: Vec<_> = tree.cells_in_table(table_id).iter().map(|c| c.id()).collect();
        assert_eq!(order, vec![cells[1], cells[0], cells[2]]);
    }

    #[test]
    fn test_insert_and_delete_row() {
        let (mut tree, table_id, cells) = two_row_table();
        let before = tree.clone();

        tree.insert_row(table_id, 1).unwrap();
        assert_eq!(tree.get_cell(cells[2]).unwrap().row, 2);

        let removed = tree.delete_row(table_id, 1).unwrap();
        assert!(removed.is_empty());
        assert_eq!(tree, before);

        let removed = tree.delete_row(table_id, 0).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(coords(&tree, table_id), vec![(0, 0)]);
    }

    #[test]
    fn test_insert_and_delete_column() {
        let (mut tree, table_id, _) = two_row_table();
        let before = tree.clone();

        tree.insert_column(table_id, 0).unwrap();
        assert_eq!(coords(&tree, table_id), vec![(0, 1), (0, 2), (1, 1)]);

        let removed = tree.delete_column(table_id, 0).unwrap();
        assert!(removed.is_empty());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_then_restore_column() {
        let (mut tree, table_id, _) = two_row_table();
        let before = tree.clone();

        let removed = tree.delete_column(table_id, 0).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(coords(&tree, table_id), vec![(0, 0)]);

        tree.insert_column(table_id, 0).unwrap();
        for subtree in removed {
            tree.attach_subtree(subtree, Placement::Table(table_id)).unwrap();
        }
        assert_eq!(tree, before);
    }

    #[test]
    fn test_remove_cell_restores_exactly() {
        let (mut tree, table_id, cells) = two_row_table();
        let label = tree
            .add_element(cells[0], Element::new(ElementKind::Label).with_text("Hi"))
            .unwrap();
        let before = tree.clone();

        let subtree = tree.remove_cell(cells[0]).unwrap();
        assert_eq!(subtree.node_count(), 2);
        assert!(!tree.contains(label));
        assert_eq!(tree.get_cell(cells[1]).unwrap().column, 0);

        let coord = subtree.top_coord().unwrap();
        tree.open_row_gap(table_id, coord).unwrap();
        tree.attach_subtree(subtree, Placement::Table(table_id)).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_detach_root_child_keeps_index() {
        let mut tree = LayoutTree::new();
        let root = tree.root_id();
        let first = tree.add_element(root, Element::new(ElementKind::Label)).unwrap();
        let second = tree.add_table(root, Table::new()).unwrap();

        let (subtree, placement) = tree.detach_subtree(first).unwrap();
        assert_eq!(placement, Placement::Root { index: 0 });
        assert_eq!(tree.root.children(), &[second]);

        tree.attach_subtree(subtree, placement).unwrap();
        assert_eq!(tree.root.children(), &[first, second]);
    }

    #[test]
    fn test_take_and_set_child() {
        let (mut tree, _, cells) = two_row_table();
        assert!(tree.take_child(cells[0]).unwrap().is_none());

        let nested = tree.add_table(cells[0], Table::new()).unwrap();
        tree.add_cell(nested, 0, 0).unwrap();
        let before = tree.clone();

        let subtree = tree.take_child(cells[0]).unwrap().unwrap();
        assert_eq!(subtree.node_count(), 2);
        assert!(tree.get_cell(cells[0]).unwrap().is_empty());

        tree.set_child(cells[0], subtree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_cell_holds_single_child() {
        let (mut tree, _, cells) = two_row_table();
        tree.add_element(cells[0], Element::new(ElementKind::Label)).unwrap();
        let result = tree.add_element(cells[0], Element::new(ElementKind::Button));
        assert!(matches!(result, Err(LayoutError::InvalidOperation(_))));
    }

    #[test]
    fn test_normalize_table_heals_duplicates() {
        let (mut tree, table_id, cells) = two_row_table();
        tree.get_cell_mut(cells[1]).unwrap().column = 0;
        assert!(tree.check_table(table_id).is_err());

        assert!(tree.normalize_table(table_id).unwrap());
        tree.check_table(table_id).unwrap();
        assert_eq!(coords(&tree, table_id), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_breadcrumb() {
        let (mut tree, table_id, cells) = two_row_table();
        tree.set_name(table_id, Some("menu".into())).unwrap();
        let nested = tree.add_table(cells[2], Table::new()).unwrap();
        let inner_cell = tree.add_cell(nested, 0, 0).unwrap();
        let button = tree
            .add_element(inner_cell, Element::new(ElementKind::TextButton))
            .unwrap();

        assert_eq!(
            tree.breadcrumb(button).unwrap(),
            "Root > menu > Cell (1, 0) > Table > Cell (0, 0) > TextButton"
        );
        assert_eq!(tree.path_to_node(button).unwrap().len(), 6);
    }

    #[test]
    fn test_cells_cannot_be_named() {
        let (mut tree, _, cells) = two_row_table();
        assert!(tree.set_name(cells[0], Some("x".into())).is_err());
    }

    fn table_with_rows(row_lengths: &[usize]) -> (LayoutTree, NodeId) {
        let mut tree = LayoutTree::new();
        let table_id = tree.add_table(tree.root_id(), Table::new()).unwrap();
        for (row, &len) in row_lengths.iter().enumerate() {
            for column in 0..len {
                tree.add_cell(table_id, row, column).unwrap();
            }
        }
        (tree, table_id)
    }

    proptest! {
        #[test]
        fn prop_relocate_between_rows_is_reversible(
            row_lengths in prop::collection::vec(1usize..4, 2..5),
            pick in 0usize..16,
            target_row in 0usize..5,
            target_column in 0usize..5,
        ) {
            let (mut tree, table_id) = table_with_rows(&row_lengths);
            let ids: Vec<NodeId> = tree.cells_in_table(table_id).iter().map(|c| c.id()).collect();
            let cell_id = ids[pick % ids.len()];
            let from = tree.get_cell(cell_id).unwrap().coord();
            prop_assume!(target_row != from.row);

            let to = CellCoord::new(
                target_row,
                target_column.min(tree.columns_in_row(table_id, target_row)),
            );
            let before = tree.clone();

            prop_assert_eq!(tree.relocate_cell(cell_id, to).unwrap(), from);
            prop_assert!(tree.check_table(table_id).is_ok());
            prop_assert!(!tree.normalize_table(table_id).unwrap());

            tree.relocate_cell(cell_id, from).unwrap();
            prop_assert_eq!(tree, before);
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let (tree, _, _) = two_row_table();
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: LayoutTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, parsed);
    }
}
