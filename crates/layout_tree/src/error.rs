//! Error types for layout tree operations

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Duplicate cell coordinate ({row}, {column}) in table {table}")]
    DuplicateCoordinate { table: Uuid, row: usize, column: usize },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Tree structure error: {0}")]
    TreeStructure(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
