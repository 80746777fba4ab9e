use thiserror::Error;

use crate::state::ids::Id;

/// Soft, user-facing refusal of a structural edit. The tree is left untouched
/// whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("a table must keep at least one row")]
    LastRow,
    #[error("row already has the maximum of {max} columns")]
    ColumnLimit { max: usize },
    #[error("row must keep at least {min} columns")]
    ColumnMinimum { min: usize },
    #[error("rows can only be reordered while authoring")]
    ReorderNotAllowed,
    #[error("no row at index {0}")]
    NoSuchRow(usize),
    #[error("no column at index {column} in row {row}")]
    NoSuchColumn { row: usize, column: usize },
    #[error("row {row} has no column at index {column}")]
    NoColumnInRow { row: Id, column: usize },
    #[error("no column with id {0}")]
    UnknownColumn(Id),
    #[error("column does not hold a nested table")]
    NotNested,
    #[error("column does not accept files")]
    NotAFileColumn,
    #[error("column content is not editable")]
    NotEditable,
}

impl Rejection {
    /// Key into the message catalog used for the user notification.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::LastRow => "error.last_row",
            Self::ColumnLimit { .. } => "error.column_limit",
            Self::ColumnMinimum { .. } => "error.column_minimum",
            Self::ReorderNotAllowed => "error.reorder_not_allowed",
            Self::NoSuchRow(_)
            | Self::NoSuchColumn { .. }
            | Self::NoColumnInRow { .. }
            | Self::UnknownColumn(_) => "error.stale_index",
            Self::NotNested | Self::NotAFileColumn | Self::NotEditable => "error.wrong_column_type",
        }
    }
}
