//! Board-level types: Board, Column

use super::ids::{ColumnId, TaskId};
use super::location::Location;
use super::task::Task;
use crate::error::{KanbanError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A column defines a workflow stage and the display order of its tasks.
///
/// `task_ids` is the authoritative record of membership. A column never owns
/// tasks, it only names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Create a new empty column
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Set the ordered task ids
    pub fn with_tasks<I, T>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.task_ids = task_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Number of tasks in the column
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Check if the column has no tasks
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Index of a task within this column
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id.as_str() == task_id)
    }
}

/// The kanban board: the single root of state.
///
/// `new`, `from_parts` and deserialization all validate the membership
/// invariants: each listed task exists, each task is listed exactly once, and
/// the column order names every column once. Strict moves keep them. A move
/// under `MovePolicy::TrustIndex` can break them on a desynced instruction;
/// `validate` reports that.
///
/// The task map, the column order and each column sit behind `Arc`. A move
/// replaces only the columns it touches; everything else is shared with the
/// previous board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData", into = "BoardData")]
pub struct Board {
    tasks: Arc<IndexMap<TaskId, Task>>,
    columns: IndexMap<ColumnId, Arc<Column>>,
    column_order: Arc<Vec<ColumnId>>,
}

/// Plain serialized form of a board.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardData {
    tasks: IndexMap<TaskId, Task>,
    columns: IndexMap<ColumnId, Column>,
    column_order: Vec<ColumnId>,
}

impl TryFrom<BoardData> for Board {
    type Error = KanbanError;

    fn try_from(data: BoardData) -> Result<Self> {
        Board::from_parts(data.tasks, data.columns, data.column_order)
    }
}

impl From<Board> for BoardData {
    fn from(board: Board) -> Self {
        BoardData {
            tasks: Arc::unwrap_or_clone(board.tasks),
            columns: board
                .columns
                .into_iter()
                .map(|(id, column)| (id, Arc::unwrap_or_clone(column)))
                .collect(),
            column_order: Arc::unwrap_or_clone(board.column_order),
        }
    }
}

impl Board {
    /// Build a board from tasks, columns and a column order.
    ///
    /// Fails if any id is duplicated or the membership invariants do not hold.
    pub fn new<T, C, O>(tasks: T, columns: C, column_order: O) -> Result<Self>
    where
        T: IntoIterator<Item = Task>,
        C: IntoIterator<Item = Column>,
        O: IntoIterator,
        O::Item: Into<ColumnId>,
    {
        let mut task_map = IndexMap::new();
        for task in tasks {
            if let Some(dup) = task_map.insert(task.id.clone(), task) {
                return Err(KanbanError::duplicate_id("task", dup.id.to_string()));
            }
        }

        let mut column_map = IndexMap::new();
        for column in columns {
            if let Some(dup) = column_map.insert(column.id.clone(), column) {
                return Err(KanbanError::duplicate_id("column", dup.id.to_string()));
            }
        }

        let order = column_order.into_iter().map(Into::into).collect();
        Self::from_parts(task_map, column_map, order)
    }

    /// Build a board from already keyed maps, validating it.
    pub fn from_parts(
        tasks: IndexMap<TaskId, Task>,
        columns: IndexMap<ColumnId, Column>,
        column_order: Vec<ColumnId>,
    ) -> Result<Self> {
        let board = Self {
            tasks: Arc::new(tasks),
            columns: columns
                .into_iter()
                .map(|(id, column)| (id, Arc::new(column)))
                .collect(),
            column_order: Arc::new(column_order),
        };
        board.validate()?;
        Ok(board)
    }

    /// Check the board's membership invariants, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        for (key, task) in self.tasks.iter() {
            if key != &task.id {
                return Err(KanbanError::KeyMismatch {
                    item_type: "task".into(),
                    key: key.to_string(),
                    id: task.id.to_string(),
                });
            }
        }
        for (key, column) in &self.columns {
            if key != &column.id {
                return Err(KanbanError::KeyMismatch {
                    item_type: "column".into(),
                    key: key.to_string(),
                    id: column.id.to_string(),
                });
            }
        }

        let mut ordered = HashSet::new();
        for id in self.column_order.iter() {
            if !self.columns.contains_key(id) {
                return Err(KanbanError::column_order(format!(
                    "unknown column '{id}' in order"
                )));
            }
            if !ordered.insert(id) {
                return Err(KanbanError::column_order(format!(
                    "column '{id}' listed twice in order"
                )));
            }
        }
        if let Some(missing) = self.columns.keys().find(|id| !ordered.contains(id)) {
            return Err(KanbanError::column_order(format!(
                "column '{missing}' missing from order"
            )));
        }

        let mut seen: HashMap<&TaskId, &ColumnId> = HashMap::new();
        for column_id in self.column_order.iter() {
            let column = &self.columns[column_id];
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(KanbanError::DanglingTaskRef {
                        column: column_id.to_string(),
                        task: task_id.to_string(),
                    });
                }
                if let Some(first) = seen.insert(task_id, column_id) {
                    return Err(KanbanError::DuplicateTaskRef {
                        task: task_id.to_string(),
                        first: first.to_string(),
                        second: column_id.to_string(),
                    });
                }
            }
        }

        if let Some(unassigned) = self.tasks.keys().find(|id| !seen.contains_key(id)) {
            return Err(KanbanError::UnassignedTask {
                id: unassigned.to_string(),
            });
        }

        Ok(())
    }

    /// All tasks, keyed by id
    pub fn tasks(&self) -> &IndexMap<TaskId, Task> {
        &self.tasks
    }

    /// Look up a task by id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Look up a column by id
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id).map(Arc::as_ref)
    }

    /// Column ids in display order, left to right
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Number of tasks on the board
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of columns on the board
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find which column holds a task, and at what index
    pub fn locate(&self, task_id: &str) -> Option<Location> {
        self.column_order.iter().find_map(|column_id| {
            self.columns[column_id]
                .position_of(task_id)
                .map(|index| Location::new(column_id, index))
        })
    }

    /// Whether both boards share the same task map allocation
    pub fn shares_tasks_with(&self, other: &Board) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    /// Whether both boards share the same column order allocation
    pub fn shares_column_order_with(&self, other: &Board) -> bool {
        Arc::ptr_eq(&self.column_order, &other.column_order)
    }

    /// Whether both boards share the same allocation for a column
    pub fn shares_column_with(&self, other: &Board, column_id: &str) -> bool {
        match (self.columns.get(column_id), other.columns.get(column_id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Copy of this board with the given columns replaced.
    ///
    /// Callers must only pass columns that already exist; ids not on the board
    /// are ignored so the column set never changes.
    pub(crate) fn with_columns(&self, replacements: impl IntoIterator<Item = Column>) -> Board {
        let mut next = self.clone();
        for column in replacements {
            if let Some(slot) = next.columns.get_mut(&column.id) {
                *slot = Arc::new(column);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![Task::new("t1", "One"), Task::new("t2", "Two"), Task::new("t3", "Three")]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("todo", "Todo").with_tasks(["t1"]),
            Column::new("in-progress", "In Progress").with_tasks(["t2"]),
            Column::new("done", "Done").with_tasks(["t3"]),
        ]
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new(tasks(), columns(), ["todo", "in-progress", "done"]).unwrap();
        assert_eq!(board.task_count(), 3);
        assert_eq!(board.column_count(), 3);
        assert_eq!(board.column_order()[1], "in-progress");
        assert_eq!(board.task("t2").unwrap().title, "Two");
        assert!(board.task("t9").is_none());
    }

    #[test]
    fn test_locate() {
        let board = Board::new(tasks(), columns(), ["todo", "in-progress", "done"]).unwrap();
        assert_eq!(board.locate("t3"), Some(Location::new("done", 0)));
        assert_eq!(board.locate("nope"), None);
    }

    #[test]
    fn test_dangling_task_ref() {
        let mut cols = columns();
        cols[0].task_ids.push(TaskId::from("ghost"));
        let err = Board::new(tasks(), cols, ["todo", "in-progress", "done"]).unwrap_err();
        assert!(matches!(err, KanbanError::DanglingTaskRef { ref task, .. } if task == "ghost"));
    }

    #[test]
    fn test_task_in_two_columns() {
        let mut cols = columns();
        cols[2].task_ids.push(TaskId::from("t1"));
        let err = Board::new(tasks(), cols, ["todo", "in-progress", "done"]).unwrap_err();
        assert!(matches!(
            err,
            KanbanError::DuplicateTaskRef { ref first, ref second, .. }
                if first == "todo" && second == "done"
        ));
    }

    #[test]
    fn test_task_twice_in_one_column() {
        let mut cols = columns();
        cols[0].task_ids.push(TaskId::from("t1"));
        let err = Board::new(tasks(), cols, ["todo", "in-progress", "done"]).unwrap_err();
        assert!(matches!(err, KanbanError::DuplicateTaskRef { .. }));
    }

    #[test]
    fn test_unassigned_task() {
        let mut all = tasks();
        all.push(Task::new("t4", "Orphan"));
        let err = Board::new(all, columns(), ["todo", "in-progress", "done"]).unwrap_err();
        assert!(matches!(err, KanbanError::UnassignedTask { ref id } if id == "t4"));
    }

    #[test]
    fn test_column_order_mismatch() {
        let err = Board::new(tasks(), columns(), ["todo", "done"]).unwrap_err();
        assert!(err.to_string().contains("'in-progress' missing"));

        let err = Board::new(tasks(), columns(), ["todo", "in-progress", "done", "todo"]).unwrap_err();
        assert!(err.to_string().contains("listed twice"));

        let err =
            Board::new(tasks(), columns(), ["todo", "in-progress", "done", "archived"]).unwrap_err();
        assert!(err.to_string().contains("unknown column 'archived'"));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut all = tasks();
        all.push(Task::new("t1", "Again"));
        let err = Board::new(all, columns(), ["todo", "in-progress", "done"]).unwrap_err();
        assert!(matches!(err, KanbanError::DuplicateId { ref item_type, .. } if item_type == "task"));
    }

    #[test]
    fn test_key_mismatch() {
        let mut task_map = IndexMap::new();
        task_map.insert(TaskId::from("t1"), Task::new("other", "One"));
        let mut column_map = IndexMap::new();
        column_map.insert(ColumnId::from("todo"), Column::new("todo", "Todo").with_tasks(["t1"]));

        let err = Board::from_parts(task_map, column_map, vec![ColumnId::from("todo")]).unwrap_err();
        assert!(matches!(err, KanbanError::KeyMismatch { ref key, .. } if key == "t1"));
    }

    #[test]
    fn test_board_serialization_shape() {
        let board = Board::new(tasks(), columns(), ["todo", "in-progress", "done"]).unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["columnOrder"][0], "todo");
        assert_eq!(value["columns"]["todo"]["taskIds"][0], "t1");
        assert_eq!(value["tasks"]["t2"]["title"], "Two");

        let parsed: Board = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_invalid_board_rejected_on_deserialize() {
        let json = r#"{
            "tasks": {"t1": {"id": "t1", "title": "One"}},
            "columns": {"todo": {"id": "todo", "title": "Todo", "taskIds": []}},
            "columnOrder": ["todo"]
        }"#;
        let err = serde_json::from_str::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("task not assigned to any column: t1"));
    }

    #[test]
    fn test_with_columns_shares_untouched_parts() {
        let board = Board::new(tasks(), columns(), ["todo", "in-progress", "done"]).unwrap();
        let next = board.with_columns([Column::new("todo", "Todo")]);

        assert!(next.shares_tasks_with(&board));
        assert!(next.shares_column_order_with(&board));
        assert!(next.shares_column_with(&board, "done"));
        assert!(!next.shares_column_with(&board, "todo"));
        assert_eq!(board.column("todo").unwrap().len(), 1);
        assert!(next.column("todo").unwrap().is_empty());
    }

    #[test]
    fn test_board_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Board>();
    }
}
