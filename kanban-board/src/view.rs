//! Read-only views for rendering a board.
//!
//! Columns come out left to right in `column_order`; tasks come out top to
//! bottom, resolved through the board's task map.

use crate::types::{Board, Column, Task};

/// A column paired with the board it belongs to
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    board: &'a Board,
    column: &'a Column,
}

impl<'a> ColumnView<'a> {
    /// The underlying column
    pub fn column(&self) -> &'a Column {
        self.column
    }

    /// Column title
    pub fn title(&self) -> &'a str {
        &self.column.title
    }

    /// Tasks in display order.
    ///
    /// Ids with no entry in the task map are skipped. Only a board left
    /// invalid by a `MovePolicy::TrustIndex` move has such ids.
    pub fn tasks(&self) -> impl Iterator<Item = &'a Task> + 'a {
        let board = self.board;
        let column = self.column;
        column
            .task_ids
            .iter()
            .filter_map(move |id| board.task(id.as_str()))
    }
}

impl Board {
    /// Columns in display order
    pub fn columns_in_order(&self) -> impl Iterator<Item = ColumnView<'_>> + '_ {
        self.column_order().iter().filter_map(move |id| {
            self.column(id.as_str())
                .map(|column| ColumnView { board: self, column })
        })
    }
}
