//! Move instructions and the raw drop event they are normalized from.

use super::ids::{ColumnId, TaskId};
use super::location::Location;
use serde::{Deserialize, Serialize};

/// A request to move one task, produced once per completed drag gesture.
///
/// `destination == None` means the task was dropped outside every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInstruction {
    /// The task being dragged
    pub task_id: TaskId,
    /// Where the drag started
    pub source: Location,
    /// Where it was dropped, if anywhere
    pub destination: Option<Location>,
}

impl MoveInstruction {
    /// Create an instruction for a drop onto a column
    pub fn new(task_id: impl Into<TaskId>, source: Location, destination: Location) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination: Some(destination),
        }
    }

    /// Create an instruction for a drop that landed outside every column
    pub fn dropped_outside(task_id: impl Into<TaskId>, source: Location) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination: None,
        }
    }

    /// Whether the gesture ended with no valid destination
    pub fn is_dropped_outside(&self) -> bool {
        self.destination.is_none()
    }

    /// Whether the task was dropped back where it started
    pub fn is_same_position(&self) -> bool {
        self.destination.as_ref() == Some(&self.source)
    }
}

/// One end of a raw drop event, as emitted by a drag-and-drop layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub droppable_id: ColumnId,
    pub index: usize,
}

/// A raw gesture-completion event.
///
/// Extra fields the drag layer attaches (`reason`, `mode`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub draggable_id: TaskId,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
}

impl From<DraggableLocation> for Location {
    fn from(loc: DraggableLocation) -> Self {
        Location {
            column: loc.droppable_id,
            index: loc.index,
        }
    }
}

impl From<DropResult> for MoveInstruction {
    fn from(result: DropResult) -> Self {
        MoveInstruction {
            task_id: result.draggable_id,
            source: result.source.into(),
            destination: result.destination.map(Location::from),
        }
    }
}
