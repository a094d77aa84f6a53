//! Location of a task: column + index within that column's ordered list.

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A slot on the board. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub column: ColumnId,
    pub index: usize,
}

impl Location {
    /// Create a new location
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column, self.index)
    }
}
