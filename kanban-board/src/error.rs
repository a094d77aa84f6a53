//! Error types for the kanban board

use std::fmt;
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Which end of a move an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Move instruction names a column that is not on the board
    #[error("unknown column: {id}")]
    UnknownColumn { id: String },

    /// Source or destination index outside the valid range for its column
    #[error("{side} index {index} out of range for column '{column}' (len {len})")]
    IndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
        side: Side,
    },

    /// The task sitting at the source index is not the one being moved
    #[error("column '{column}' holds '{found}' at index {index}, expected '{expected}'")]
    TaskIdMismatch {
        column: String,
        index: usize,
        expected: String,
        found: String,
    },

    /// A column references a task that is not in the task map
    #[error("column '{column}' references unknown task: {task}")]
    DanglingTaskRef { column: String, task: String },

    /// A task is not listed in any column
    #[error("task not assigned to any column: {id}")]
    UnassignedTask { id: String },

    /// A task id is listed more than once across the board
    #[error("task '{task}' listed more than once (in '{first}' and '{second}')")]
    DuplicateTaskRef {
        task: String,
        first: String,
        second: String,
    },

    /// Column order is not a permutation of the column keys
    #[error("column order mismatch: {message}")]
    ColumnOrderMismatch { message: String },

    /// Duplicate ID while building a board
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// A map key disagrees with the id stored in its entry
    #[error("{item_type} stored under key '{key}' has id '{id}'")]
    KeyMismatch {
        item_type: String,
        key: String,
        id: String,
    },

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create an unknown column error
    pub fn unknown_column(id: impl Into<String>) -> Self {
        Self::UnknownColumn { id: id.into() }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(column: impl Into<String>, index: usize, len: usize, side: Side) -> Self {
        Self::IndexOutOfRange {
            column: column.into(),
            index,
            len,
            side,
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create a column order mismatch error
    pub fn column_order(message: impl Into<String>) -> Self {
        Self::ColumnOrderMismatch {
            message: message.into(),
        }
    }

    /// Whether this error is a caller contract violation raised by a move.
    ///
    /// These never arise from a well-behaved gesture layer; the board is
    /// left untouched when they do.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownColumn { .. } | Self::IndexOutOfRange { .. } | Self::TaskIdMismatch { .. }
        )
    }
}
