//! Core types for the kanban board

mod board;
mod ids;
mod instruction;
mod location;
mod log;
mod task;

// Re-export all types
pub use board::{Board, Column};
pub use ids::{ColumnId, TaskId};
pub use instruction::{DraggableLocation, DropResult, MoveInstruction};
pub use location::Location;
pub use log::LogEntry;
pub use task::Task;
