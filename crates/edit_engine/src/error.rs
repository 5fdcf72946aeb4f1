//! Error types for editing operations

use thiserror::Error;

/// Which side of the history an operation reached for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Nothing to {0}")]
    EmptyHistory(HistoryDirection),

    #[error("Structural invariant violated: {0}")]
    StructuralInvariantViolation(String),

    #[error("Layout tree error: {0}")]
    Layout(#[from] layout_tree::LayoutError),
}

pub type Result<T> = std::result::Result<T, EditError>;
