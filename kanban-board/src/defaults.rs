//! Built-in sample board and YAML loading.
//!
//! The sample is embedded at compile time and parsed on demand. It goes
//! through the same validation as any other board.

use crate::error::Result;
use crate::types::Board;

/// Embedded seed board: `todo`, `in-progress` and `done`, one task each.
pub const SAMPLE_BOARD_YAML: &str = include_str!("../builtin/sample_board.yaml");

impl Board {
    /// Parse and validate a board from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Render the board as a YAML document.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// The built-in sample board.
    pub fn sample() -> Self {
        Self::from_yaml_str(SAMPLE_BOARD_YAML).expect("invalid built-in sample board")
    }
}
