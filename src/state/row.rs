use tracing::debug;

use crate::state::column::{Column, DEFAULT_NESTED_MAX_COLUMNS, LIST_MAX_COLUMNS};
use crate::state::ids::{self, Id};
use crate::state::rejection::Rejection;

/// An ordered run of columns with inclusive bounds on how many it may hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: Id,
    pub min_column_count: usize,
    pub max_column_count: usize,
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(id: Id, min_column_count: usize, max_column_count: usize) -> Self {
        Self {
            id,
            min_column_count,
            max_column_count,
            columns: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn can_add_column(&self) -> bool {
        self.columns.len() < self.max_column_count
    }

    pub fn can_remove_column(&self) -> bool {
        !self.columns.is_empty() && self.columns.len() > self.min_column_count
    }

    /// Appends an empty `Text` column and returns its index.
    pub fn add_column(&mut self) -> Result<usize, Rejection> {
        self.add_column_with_id(ids::next_id())
    }

    pub fn add_column_with_id(&mut self, id: Id) -> Result<usize, Rejection> {
        if !self.can_add_column() {
            debug!(row = %self.id, max = self.max_column_count, "add column rejected");
            return Err(Rejection::ColumnLimit {
                max: self.max_column_count,
            });
        }
        self.columns.push(Column::blank_text(id));
        Ok(self.columns.len() - 1)
    }

    pub fn remove_column(&mut self, index: usize) -> Result<Column, Rejection> {
        if index >= self.columns.len() {
            return Err(Rejection::NoColumnInRow {
                row: self.id,
                column: index,
            });
        }
        if !self.can_remove_column() {
            debug!(row = %self.id, min = self.min_column_count, "remove column rejected");
            return Err(Rejection::ColumnMinimum {
                min: self.min_column_count,
            });
        }
        Ok(self.columns.remove(index))
    }

    /// Deep copy with every id in the subtree regenerated.
    pub fn duplicate(&self) -> Row {
        self.duplicate_with(&mut ids::next_id)
    }

    pub fn duplicate_with(&self, next_id: &mut impl FnMut() -> Id) -> Row {
        let id = next_id();
        let columns = self
            .columns
            .iter()
            .map(|column| column.duplicate_with(next_id))
            .collect();
        Row {
            id,
            min_column_count: self.min_column_count,
            max_column_count: self.max_column_count,
            columns,
        }
    }

    /// Clamps the row to the single column a list item may hold.
    pub fn narrow_to_list(&mut self) {
        self.columns.truncate(LIST_MAX_COLUMNS);
        self.max_column_count = LIST_MAX_COLUMNS;
        self.min_column_count = self.min_column_count.min(LIST_MAX_COLUMNS);
    }

    /// Lifts the list limit when a list becomes a nested table.
    pub fn widen_to_table(&mut self) {
        self.max_column_count = DEFAULT_NESTED_MAX_COLUMNS.max(self.columns.len());
    }

    /// Same column types as this row with content cleared and fresh ids.
    pub fn blank_copy_with(&self, next_id: &mut impl FnMut() -> Id) -> Row {
        let id = next_id();
        let columns = self
            .columns
            .iter()
            .map(|column| column.blank_copy_with(next_id))
            .collect();
        Row {
            id,
            min_column_count: self.min_column_count,
            max_column_count: self.max_column_count,
            columns,
        }
    }
}
