//! Table model - tables and the cells they lay out
//!
//! A table owns an ordered list of cell ids. Each cell carries its own
//! `(row, column)` coordinate; the table's list order is only a cache of the
//! row-major visual order and is rebuilt by [`Table::sort`] after every
//! structural change.

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Coordinates
// =============================================================================

/// A zero-based cell coordinate within a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

// =============================================================================
// Cell Properties
// =============================================================================

/// Sizing and spacing properties of a cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellProperties {
    /// Minimum width in pixels
    pub min_width: Option<f32>,
    /// Minimum height in pixels
    pub min_height: Option<f32>,
    /// Preferred width in pixels
    pub pref_width: Option<f32>,
    /// Preferred height in pixels
    pub pref_height: Option<f32>,
    /// Number of columns this cell spans
    pub colspan: u32,
    pub expand_x: bool,
    pub expand_y: bool,
    pub fill_x: bool,
    pub fill_y: bool,
    /// Uniform padding in pixels
    pub padding: f32,
}

impl Default for CellProperties {
    fn default() -> Self {
        Self {
            min_width: None,
            min_height: None,
            pref_width: None,
            pref_height: None,
            colspan: 1,
            expand_x: false,
            expand_y: false,
            fill_x: false,
            fill_y: false,
            padding: 0.0,
        }
    }
}

impl CellProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both minimum dimensions
    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = Some(width);
        self.min_height = Some(height);
        self
    }

    /// Set both preferred dimensions
    pub fn with_pref_size(mut self, width: f32, height: f32) -> Self {
        self.pref_width = Some(width);
        self.pref_height = Some(height);
        self
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn with_expand(mut self, x: bool, y: bool) -> Self {
        self.expand_x = x;
        self.expand_y = y;
        self
    }

    pub fn with_fill(mut self, x: bool, y: bool) -> Self {
        self.fill_x = x;
        self.fill_y = y;
        self
    }
}

// =============================================================================
// Cell
// =============================================================================

/// One slot of a table, optionally holding a nested table or an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    id: NodeId,
    /// Owning table
    parent: Option<NodeId>,
    /// Nested table or element
    child: Option<NodeId>,
    pub row: usize,
    pub column: usize,
    pub properties: CellProperties,
}

impl Cell {
    /// Create an empty cell at a coordinate
    pub fn new(row: usize, column: usize) -> Self {
        Self::with_id(NodeId::new(), row, column)
    }

    /// Create an empty cell with a pre-allocated id
    pub fn with_id(id: NodeId, row: usize, column: usize) -> Self {
        Self {
            id,
            parent: None,
            child: None,
            row,
            column,
            properties: CellProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: CellProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.row, self.column)
    }

    pub fn set_coord(&mut self, coord: CellCoord) {
        self.row = coord.row;
        self.column = coord.column;
    }

    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub fn set_child(&mut self, child: Option<NodeId>) {
        self.child = child;
    }

    pub fn is_empty(&self) -> bool {
        self.child.is_none()
    }
}

impl Node for Cell {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Cell
    }

    fn children(&self) -> &[NodeId] {
        self.child.as_slice()
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}

// =============================================================================
// Table
// =============================================================================

/// A layout table holding cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    id: NodeId,
    /// Owning cell, or the root group for a top-level table
    parent: Option<NodeId>,
    /// Cell ids in row-major order (after `sort`)
    cells: Vec<NodeId>,
    pub name: Option<String>,
    /// Default padding applied to every cell
    pub default_padding: f32,
}

impl Table {
    pub fn new() -> Self {
        Self::with_id(NodeId::new())
    }

    pub fn with_id(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            cells: Vec::new(),
            name: None,
            default_padding: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn push_cell(&mut self, cell_id: NodeId) {
        self.cells.push(cell_id);
    }

    pub(crate) fn remove_cell(&mut self, cell_id: NodeId) -> bool {
        let before = self.cells.len();
        self.cells.retain(|&id| id != cell_id);
        self.cells.len() != before
    }

    /// Reorder cell ids so iteration matches `(row, column)` order.
    ///
    /// Ids missing from `cells` sort last; ties keep their relative order.
    pub fn sort(&mut self, cells: &HashMap<NodeId, Cell>) {
        self.cells.sort_by_key(|id| {
            cells
                .get(id)
                .map(|c| (0, c.row, c.column))
                .unwrap_or((1, usize::MAX, usize::MAX))
        });
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Table {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Table
    }

    fn children(&self) -> &[NodeId] {
        &self.cells
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
