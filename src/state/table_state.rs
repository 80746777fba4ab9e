use tracing::debug;

use crate::state::column::{Column, FileRef};
use crate::state::ids::{self, Id};
use crate::state::mode::{OperationMode, TableConfig};
use crate::state::rejection::Rejection;
use crate::state::row::Row;

/// Column currently open in the type editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnTarget {
    pub row: usize,
    pub column: usize,
}

/// One table of the document: its rows plus the local editing markers.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TableState {
    rows: Vec<Row>,
    config: TableConfig,
    open_row: Option<usize>,
    open_column: Option<ColumnTarget>,
}

impl TableState {
    /// An authoring table with no rows starts with one empty row bounded to
    /// `1..=max_column_count`.
    pub fn new(rows: Vec<Row>, mode: OperationMode, config: TableConfig) -> Self {
        let mut state = Self::from_parts(rows, config);
        if state.rows.is_empty() && config.effective_mode(mode) == OperationMode::Edit {
            state.rows.push(Row::new(ids::next_id(), 1, config.max_column_count));
        }
        state
    }

    /// Wraps existing rows without applying the default-row rule.
    pub fn from_parts(rows: Vec<Row>, config: TableConfig) -> Self {
        Self {
            rows,
            config,
            open_row: None,
            open_column: None,
        }
    }

    pub fn with_editing(mut self, open_row: Option<usize>, open_column: Option<ColumnTarget>) -> Self {
        self.open_row = open_row.filter(|&index| index < self.rows.len());
        self.open_column = open_column.filter(|target| self.column(target.row, target.column).is_some());
        self
    }

    /// Replaces the whole subtree, e.g. when a template is loaded into an
    /// already-mounted table.
    pub fn reset(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.open_row = None;
        self.open_column = None;
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn open_row(&self) -> Option<usize> {
        self.open_row
    }

    pub fn open_column(&self) -> Option<ColumnTarget> {
        self.open_column
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn column(&self, row: usize, column: usize) -> Option<&Column> {
        self.rows.get(row)?.columns.get(column)
    }

    /// Appends a row and returns its index. While authoring the row starts
    /// empty. Otherwise columns cannot be added, so the new row repeats the
    /// last row's columns with their entered content cleared.
    pub fn add_row(&mut self, mode: OperationMode) -> usize {
        let row = if self.config.effective_mode(mode) == OperationMode::Edit {
            Row::new(ids::next_id(), 1, self.config.max_column_count)
        } else {
            match self.rows.last() {
                Some(last) => last.blank_copy_with(&mut ids::next_id),
                None => Row::new(ids::next_id(), 1, self.config.max_column_count)
                    .with_columns(vec![Column::blank_text(ids::next_id())]),
            }
        };
        debug!(row = %row.id, columns = row.columns.len(), "added row");
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Result<Row, Rejection> {
        if index >= self.rows.len() {
            return Err(Rejection::NoSuchRow(index));
        }
        if self.rows.len() == 1 {
            debug!("refusing to remove the last row");
            return Err(Rejection::LastRow);
        }
        let removed = self.rows.remove(index);
        self.open_row = shift_after_removal(self.open_row, index);
        self.open_column = match self.open_column {
            Some(target) if target.row == index => None,
            Some(target) if target.row > index => Some(ColumnTarget {
                row: target.row - 1,
                ..target
            }),
            other => other,
        };
        Ok(removed)
    }

    /// Inserts a deep copy of row `index` right after it and returns the
    /// copy's index.
    pub fn duplicate_row(&mut self, index: usize) -> Result<usize, Rejection> {
        let copy = self
            .rows
            .get(index)
            .ok_or(Rejection::NoSuchRow(index))?
            .duplicate();
        debug!(source = %self.rows[index].id, copy = %copy.id, "duplicated row");
        self.rows.insert(index + 1, copy);
        if let Some(open) = self.open_row.filter(|&open| open > index) {
            self.open_row = Some(open + 1);
        }
        if let Some(target) = self.open_column.filter(|target| target.row > index) {
            self.open_column = Some(ColumnTarget {
                row: target.row + 1,
                ..target
            });
        }
        Ok(index + 1)
    }

    /// Moves the row at `from` so that it ends up at `to`.
    pub fn reorder_rows(&mut self, mode: OperationMode, from: usize, to: usize) -> Result<(), Rejection> {
        if !self.config.can_reorder(mode) {
            return Err(Rejection::ReorderNotAllowed);
        }
        let len = self.rows.len();
        if from >= len {
            return Err(Rejection::NoSuchRow(from));
        }
        if to >= len {
            return Err(Rejection::NoSuchRow(to));
        }
        if from == to {
            return Ok(());
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.open_row = self.open_row.map(|open| moved_index(open, from, to));
        self.open_column = self.open_column.map(|target| ColumnTarget {
            row: moved_index(target.row, from, to),
            ..target
        });
        Ok(())
    }

    pub fn add_column(&mut self, row: usize) -> Result<usize, Rejection> {
        self.row_mut(row)?.add_column()
    }

    pub fn remove_column(&mut self, row: usize, column: usize) -> Result<Column, Rejection> {
        let target = self.row_mut(row)?;
        if column >= target.columns.len() {
            return Err(Rejection::NoSuchColumn { row, column });
        }
        let removed = target.remove_column(column)?;
        self.open_column = match self.open_column {
            Some(open) if open.row == row && open.column == column => None,
            Some(open) if open.row == row && open.column > column => Some(ColumnTarget {
                column: open.column - 1,
                ..open
            }),
            other => other,
        };
        Ok(removed)
    }

    /// Folds a changed column back into its row.
    pub fn replace_column(&mut self, row: usize, column: usize, value: Column) -> Result<(), Rejection> {
        let slot = self.column_mut(row, column)?;
        *slot = value;
        Ok(())
    }

    pub fn set_column_content(&mut self, row: usize, column: usize, content: String) -> Result<(), Rejection> {
        if self.column_mut(row, column)?.set_text_content(content) {
            Ok(())
        } else {
            Err(Rejection::NotEditable)
        }
    }

    pub fn set_tag_value(&mut self, row: usize, column: usize, value: Option<u64>) -> Result<(), Rejection> {
        if self.column_mut(row, column)?.set_tag_value(value) {
            Ok(())
        } else {
            Err(Rejection::NotEditable)
        }
    }

    pub fn set_nested_rows(&mut self, row: usize, column: usize, rows: Vec<Row>) -> Result<(), Rejection> {
        let nested = self
            .column_mut(row, column)?
            .nested_rows_mut()
            .ok_or(Rejection::NotNested)?;
        *nested = rows;
        Ok(())
    }

    /// `(row, column)` of the column with `id` in this table.
    pub fn locate_column(&self, id: Id) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.columns
                .iter()
                .position(|column| column.id == id)
                .map(|column_index| (row_index, column_index))
        })
    }

    /// Files are attached by column id since an upload can finish after
    /// rows were moved or removed.
    pub fn attach_files(&mut self, column: Id, files: Vec<FileRef>) -> Result<(), Rejection> {
        if self.column_by_id_mut(column)?.attach_files(files) {
            Ok(())
        } else {
            Err(Rejection::NotAFileColumn)
        }
    }

    pub fn remove_file(&mut self, column: Id, file_id: &str) -> Result<(), Rejection> {
        let target = self.column_by_id_mut(column)?;
        if target.files().is_none() {
            return Err(Rejection::NotAFileColumn);
        }
        target.remove_file(file_id);
        Ok(())
    }

    pub fn toggle_row(&mut self, index: usize) {
        self.open_row = if self.open_row == Some(index) || index >= self.rows.len() {
            None
        } else {
            Some(index)
        };
    }

    pub fn open_column_editor(&mut self, row: usize, column: usize) -> Result<(), Rejection> {
        self.column_mut(row, column)?;
        self.open_column = Some(ColumnTarget { row, column });
        Ok(())
    }

    pub fn close_column_editor(&mut self) {
        self.open_column = None;
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut Row, Rejection> {
        self.rows.get_mut(index).ok_or(Rejection::NoSuchRow(index))
    }

    fn column_by_id_mut(&mut self, id: Id) -> Result<&mut Column, Rejection> {
        let (row, column) = self.locate_column(id).ok_or(Rejection::UnknownColumn(id))?;
        self.column_mut(row, column)
    }

    fn column_mut(&mut self, row: usize, column: usize) -> Result<&mut Column, Rejection> {
        self.row_mut(row)?
            .columns
            .get_mut(column)
            .ok_or(Rejection::NoSuchColumn { row, column })
    }
}

fn shift_after_removal(open: Option<usize>, removed: usize) -> Option<usize> {
    match open {
        Some(index) if index == removed => None,
        Some(index) if index > removed => Some(index - 1),
        other => other,
    }
}

fn moved_index(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_index_follows_the_dragged_row() {
        assert_eq!(moved_index(0, 0, 2), 2);
        assert_eq!(moved_index(1, 0, 2), 0);
        assert_eq!(moved_index(2, 0, 2), 1);
        assert_eq!(moved_index(3, 0, 2), 3);
        assert_eq!(moved_index(0, 2, 0), 1);
        assert_eq!(moved_index(2, 2, 0), 0);
    }
}
