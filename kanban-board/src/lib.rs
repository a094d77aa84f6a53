//! Kanban board state reducer
//!
//! This crate models a kanban board as an immutable value: a fixed set of
//! tasks, a fixed set of columns, and the ordered lists that say which task
//! sits where. The only way a board changes is [`apply_move`], which takes the
//! current board and a [`MoveInstruction`] and returns the next board.
//!
//! ## Overview
//!
//! - **Columns own order, not tasks** - each column lists task ids; the board
//!   keeps the task map
//! - **Pure transitions** - the input board is never mutated; untouched parts
//!   are shared with the result
//! - **All-or-nothing** - a rejected move leaves the board exactly as it was
//! - **No-ops are not errors** - drops outside every column or back onto the
//!   same slot return the board unchanged
//!
//! ## Basic Usage
//!
//! ```rust
//! use kanban_board::{apply_move, Board, Location, MoveInstruction};
//!
//! # fn example() -> kanban_board::Result<()> {
//! let board = Board::sample();
//!
//! let next = apply_move(
//!     &board,
//!     &MoveInstruction::new(
//!         "task-1",
//!         Location::new("todo", 0),
//!         Location::new("in-progress", 1),
//!     ),
//! )?;
//!
//! assert!(next.column("todo").unwrap().is_empty());
//! assert_eq!(next.locate("task-1"), Some(Location::new("in-progress", 1)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Hosts that keep a "current" board can use [`BoardSession`], which swaps
//! the board after each successful move and keeps an activity log.

pub mod defaults;
mod error;
pub mod reducer;
pub mod session;
pub mod types;
pub mod view;

pub use error::{KanbanError, Result, Side};
pub use reducer::{apply_move, MovePolicy, Reducer};
pub use session::{BoardSession, MoveOutcome, DEFAULT_ACTIVITY_LIMIT};
pub use view::ColumnView;

// Re-export commonly used types
pub use types::{
    Board, Column, ColumnId, DraggableLocation, DropResult, Location, LogEntry, MoveInstruction,
    Task, TaskId,
};
