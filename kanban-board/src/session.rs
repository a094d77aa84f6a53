//! BoardSession - holds the current board for an interaction layer.
//!
//! The session owns the "current" board value and swaps it wholesale after
//! each successful move. Taking `&mut self` keeps moves strictly one at a
//! time. Every attempted move that is not a no-op is recorded in an in-memory
//! activity log, newest first, capped at `DEFAULT_ACTIVITY_LIMIT` entries
//! unless the host picks another limit.

use crate::error::Result;
use crate::reducer::{MovePolicy, Reducer};
use crate::types::{Board, Location, LogEntry, MoveInstruction};
use serde_json::json;
use std::collections::VecDeque;
use std::time::Instant;

const MOVE_OP: &str = "move task";

/// Activity entries kept before the oldest are dropped
pub const DEFAULT_ACTIVITY_LIMIT: usize = 1000;

/// What a move did to the session's board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board was replaced; the task now sits at `to`
    Moved { from: Location, to: Location },
    /// No-op drop; the board was kept as is
    Unchanged,
}

impl MoveOutcome {
    /// Whether the board was replaced
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Single-owner holder of the current board
#[derive(Debug, Clone)]
pub struct BoardSession {
    board: Board,
    reducer: Reducer,
    actor: Option<String>,
    activity: VecDeque<LogEntry>,
    activity_limit: usize,
}

impl BoardSession {
    /// Start a session on a board, using the strict policy
    pub fn new(board: Board) -> Self {
        Self {
            board,
            reducer: Reducer::default(),
            actor: None,
            activity: VecDeque::new(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Use a different move policy
    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.reducer = Reducer::new(policy);
        self
    }

    /// Attribute logged moves to an actor ("user_id" or "agent[session]")
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Keep at most `limit` activity entries, dropping the oldest
    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self.activity.truncate(limit);
        self
    }

    /// The current board snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The reducer this session applies moves with
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Logged moves, newest first
    pub fn activity(&self) -> &VecDeque<LogEntry> {
        &self.activity
    }

    /// Consume the session, returning the current board
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Apply a move to the current board.
    ///
    /// On error the current board is left exactly as it was.
    pub fn apply(&mut self, instruction: &MoveInstruction) -> Result<MoveOutcome> {
        let Some(destination) = instruction.destination.clone() else {
            return Ok(MoveOutcome::Unchanged);
        };
        if instruction.is_same_position() {
            return Ok(MoveOutcome::Unchanged);
        }

        let start = Instant::now();
        let input = serde_json::to_value(instruction)?;

        let result = self.reducer.apply(&self.board, instruction);
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(next) => {
                self.board = next;
                let from = instruction.source.clone();
                let output = json!({ "from": &from, "to": &destination });
                self.record(LogEntry::success(MOVE_OP, input, output, duration_ms));
                Ok(MoveOutcome::Moved {
                    from,
                    to: destination,
                })
            }
            Err(error) => {
                tracing::debug!(task = %instruction.task_id, %error, "move rejected");
                self.record(LogEntry::failure(MOVE_OP, input, &error.to_string(), duration_ms));
                Err(error)
            }
        }
    }

    fn record(&mut self, entry: LogEntry) {
        let entry = match &self.actor {
            Some(actor) => entry.with_actor(actor.clone()),
            None => entry,
        };
        self.activity.push_front(entry);
        self.activity.truncate(self.activity_limit);
    }
}
