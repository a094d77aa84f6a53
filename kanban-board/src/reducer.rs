//! Board state reducer
//!
//! `apply_move` is the only transition a board goes through. It takes the
//! current board by reference and returns a new one; the input is never
//! touched, so earlier snapshots stay valid for as long as anyone holds them.
//!
//! Checks run in a fixed order and all of them happen before any column is
//! rebuilt, so a failed move leaves nothing half-applied:
//!
//! 1. dropped outside every column: no-op
//! 2. dropped back on its own slot: no-op
//! 3. unknown source column, then unknown destination column
//! 4. source index in `[0, len)`
//! 5. id at the source index (strict policy only)
//! 6. destination index in `[0, len]`, measured after the removal

use crate::error::{KanbanError, Result, Side};
use crate::types::{Board, Column, Location, MoveInstruction, TaskId};
use serde::{Deserialize, Serialize};

/// How the reducer treats a source index that does not hold the dragged task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePolicy {
    /// Reject the move with `TaskIdMismatch`
    #[default]
    Strict,
    /// Remove whatever sits at the source index and insert the dragged id.
    ///
    /// This trusts the gesture layer completely. A desynced instruction can
    /// leave a task listed twice or not at all.
    TrustIndex,
}

/// Applies move instructions under a fixed policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reducer {
    policy: MovePolicy,
}

impl Reducer {
    /// Create a reducer with the given policy
    pub fn new(policy: MovePolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect
    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    /// Compute the board that results from applying `instruction` to `board`.
    pub fn apply(&self, board: &Board, instruction: &MoveInstruction) -> Result<Board> {
        let Some(destination) = &instruction.destination else {
            tracing::trace!(task = %instruction.task_id, "dropped outside, board unchanged");
            return Ok(board.clone());
        };

        if instruction.is_same_position() {
            tracing::trace!(task = %instruction.task_id, at = %destination, "dropped in place, board unchanged");
            return Ok(board.clone());
        }

        let source = &instruction.source;
        let source_column = lookup(board, source)?;
        let destination_column = lookup(board, destination)?;

        if source.index >= source_column.len() {
            return Err(KanbanError::index_out_of_range(
                source.column.as_str(),
                source.index,
                source_column.len(),
                Side::Source,
            ));
        }

        let found = &source_column.task_ids[source.index];
        if found != &instruction.task_id {
            match self.policy {
                MovePolicy::Strict => {
                    return Err(KanbanError::TaskIdMismatch {
                        column: source.column.to_string(),
                        index: source.index,
                        expected: instruction.task_id.to_string(),
                        found: found.to_string(),
                    });
                }
                MovePolicy::TrustIndex => {
                    tracing::warn!(
                        task = %instruction.task_id,
                        removed = %found,
                        at = %source,
                        "task at source index does not match dragged task, removing by index"
                    );
                }
            }
        }

        let replacements = if source.column == destination.column {
            let mut task_ids = source_column.task_ids.clone();
            task_ids.remove(source.index);
            insert_at(&mut task_ids, destination, &instruction.task_id)?;
            vec![replace_task_ids(source_column, task_ids)]
        } else {
            let mut source_ids = source_column.task_ids.clone();
            source_ids.remove(source.index);
            let mut destination_ids = destination_column.task_ids.clone();
            insert_at(&mut destination_ids, destination, &instruction.task_id)?;
            vec![
                replace_task_ids(source_column, source_ids),
                replace_task_ids(destination_column, destination_ids),
            ]
        };

        let next = board.with_columns(replacements);
        if self.policy == MovePolicy::Strict {
            debug_assert!(
                board.validate().is_err() || next.validate().is_ok(),
                "strict move broke board invariants"
            );
        }

        tracing::debug!(
            task = %instruction.task_id,
            from = %source,
            to = %destination,
            "moved task"
        );
        Ok(next)
    }
}

/// Apply a move under the default (strict) policy.
pub fn apply_move(board: &Board, instruction: &MoveInstruction) -> Result<Board> {
    Reducer::default().apply(board, instruction)
}

fn lookup<'a>(board: &'a Board, location: &Location) -> Result<&'a Column> {
    board
        .column(location.column.as_str())
        .ok_or_else(|| KanbanError::unknown_column(location.column.as_str()))
}

fn insert_at(task_ids: &mut Vec<TaskId>, destination: &Location, task_id: &TaskId) -> Result<()> {
    if destination.index > task_ids.len() {
        return Err(KanbanError::index_out_of_range(
            destination.column.as_str(),
            destination.index,
            task_ids.len(),
            Side::Destination,
        ));
    }
    task_ids.insert(destination.index, task_id.clone());
    Ok(())
}

fn replace_task_ids(column: &Column, task_ids: Vec<TaskId>) -> Column {
    Column {
        id: column.id.clone(),
        title: column.title.clone(),
        task_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;

    fn board(columns: &[(&str, &[&str])]) -> Board {
        let tasks = columns
            .iter()
            .flat_map(|(_, ids)| ids.iter())
            .map(|id| Task::new(*id, id.to_uppercase()));
        let cols = columns
            .iter()
            .map(|(id, ids)| Column::new(*id, id.to_uppercase()).with_tasks(ids.iter().copied()));
        Board::new(tasks, cols, columns.iter().map(|(id, _)| *id)).unwrap()
    }

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board
            .column(column)
            .unwrap()
            .task_ids
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn mv(task: &str, from: (&str, usize), to: (&str, usize)) -> MoveInstruction {
        MoveInstruction::new(task, Location::new(from.0, from.1), Location::new(to.0, to.1))
    }

    #[test]
    fn test_move_between_columns() {
        let before = board(&[("todo", &["t1"]), ("in-progress", &["t2"]), ("done", &["t3"])]);
        let after = apply_move(&before, &mv("t1", ("todo", 0), ("in-progress", 1))).unwrap();

        assert!(ids(&after, "todo").is_empty());
        assert_eq!(ids(&after, "in-progress"), ["t2", "t1"]);
        assert_eq!(ids(&after, "done"), ["t3"]);
        // input untouched
        assert_eq!(ids(&before, "todo"), ["t1"]);
    }

    #[test]
    fn test_reorder_within_column() {
        let before = board(&[("todo", &["a", "b", "c"])]);
        let after = apply_move(&before, &mv("a", ("todo", 0), ("todo", 2))).unwrap();
        assert_eq!(ids(&after, "todo"), ["b", "c", "a"]);

        let after = apply_move(&before, &mv("c", ("todo", 2), ("todo", 0))).unwrap();
        assert_eq!(ids(&after, "todo"), ["c", "a", "b"]);
    }

    #[test]
    fn test_untouched_parts_are_shared() {
        let before = board(&[("todo", &["t1"]), ("in-progress", &["t2"]), ("done", &["t3"])]);
        let after = apply_move(&before, &mv("t1", ("todo", 0), ("in-progress", 0))).unwrap();

        assert!(after.shares_tasks_with(&before));
        assert!(after.shares_column_order_with(&before));
        assert!(after.shares_column_with(&before, "done"));
        assert!(!after.shares_column_with(&before, "todo"));
        assert!(!after.shares_column_with(&before, "in-progress"));
    }

    #[test]
    fn test_noop_shares_everything() {
        let before = board(&[("todo", &["a", "b"]), ("done", &[])]);
        let after = apply_move(&before, &mv("a", ("todo", 0), ("todo", 0))).unwrap();

        assert_eq!(after, before);
        assert!(after.shares_column_with(&before, "todo"));
        assert!(after.shares_column_with(&before, "done"));
    }

    #[test]
    fn test_same_position_wins_over_unknown_column() {
        let before = board(&[("todo", &["a"])]);
        let after = apply_move(&before, &mv("a", ("ghost", 3), ("ghost", 3))).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_unknown_source_reported_before_destination() {
        let before = board(&[("todo", &["a"])]);
        let err = apply_move(&before, &mv("a", ("nope", 0), ("archived", 0))).unwrap_err();
        assert!(matches!(err, KanbanError::UnknownColumn { ref id } if id == "nope"));
    }

    #[test]
    fn test_source_range_checked_before_id() {
        let before = board(&[("todo", &["a"]), ("done", &[])]);
        let err = apply_move(&before, &mv("zzz", ("todo", 1), ("done", 0))).unwrap_err();
        assert!(matches!(
            err,
            KanbanError::IndexOutOfRange { side: Side::Source, index: 1, len: 1, .. }
        ));
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let before = board(&[("todo", &["a", "b"]), ("done", &[])]);
        let err = apply_move(&before, &mv("b", ("todo", 0), ("done", 0))).unwrap_err();
        assert!(matches!(
            err,
            KanbanError::TaskIdMismatch { ref expected, ref found, index: 0, .. }
                if expected == "b" && found == "a"
        ));
    }

    #[test]
    fn test_destination_range_uses_post_removal_length() {
        let before = board(&[("todo", &["a", "b", "c"])]);
        // after removing one entry the column has length 2, so 3 is out of range
        let err = apply_move(&before, &mv("a", ("todo", 0), ("todo", 3))).unwrap_err();
        assert!(matches!(
            err,
            KanbanError::IndexOutOfRange { side: Side::Destination, index: 3, len: 2, .. }
        ));
    }

    #[test]
    fn test_policy_deserializes() {
        let policy: MovePolicy = serde_json::from_str("\"trust_index\"").unwrap();
        assert_eq!(policy, MovePolicy::TrustIndex);
        assert_eq!(Reducer::default().policy(), MovePolicy::Strict);
    }
}
