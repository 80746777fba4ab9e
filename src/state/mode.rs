use serde::{Deserialize, Serialize};

use crate::state::column::{Column, ColumnKind, ColumnType};
use crate::state::ids::Id;
use crate::state::row::Row;

/// What the embedding page is doing with the document. Supplied top-down and
/// never changed by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationMode {
    /// Authoring the schema.
    #[default]
    Edit,
    /// Entering data into a fixed schema.
    FillIn,
    /// Read-only display.
    View,
}

impl OperationMode {
    pub fn all() -> &'static [Self] {
        &[Self::Edit, Self::FillIn, Self::View]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::FillIn => "fill-in",
            Self::View => "view",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "edit" => Some(Self::Edit),
            "fill-in" | "fillin" | "fill_in" => Some(Self::FillIn),
            "view" => Some(Self::View),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Edit => "mode.edit",
            Self::FillIn => "mode.fill_in",
            Self::View => "mode.view",
        }
    }
}

/// Column types whose content must be entered while filling in.
pub const REQUIRED_CONTENT_TYPES: &[ColumnType] = &[ColumnType::Text, ColumnType::LongText];

/// How one column renders and accepts input in a given mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capability {
    pub input_enabled: bool,
    pub input_required: bool,
    /// Content comes from the schema and is shown as plain text.
    pub static_content: bool,
    /// Files are shown as a list with a viewer instead of an uploader.
    pub file_viewer: bool,
    pub uploader_enabled: bool,
}

pub fn capability(mode: OperationMode, column_type: ColumnType) -> Capability {
    let filling = mode == OperationMode::FillIn;
    match column_type {
        ColumnType::Label | ColumnType::Empty => Capability {
            static_content: true,
            ..Capability::default()
        },
        ColumnType::Text | ColumnType::LongText => Capability {
            input_enabled: filling,
            input_required: filling && REQUIRED_CONTENT_TYPES.contains(&column_type),
            ..Capability::default()
        },
        ColumnType::Tag => Capability {
            input_enabled: filling,
            input_required: filling,
            ..Capability::default()
        },
        ColumnType::File | ColumnType::MultipleFiles => Capability {
            uploader_enabled: filling,
            input_required: filling,
            file_viewer: mode == OperationMode::View,
            ..Capability::default()
        },
        ColumnType::List | ColumnType::Table => Capability {
            input_enabled: mode != OperationMode::View,
            ..Capability::default()
        },
    }
}

/// Embedding-context configuration of one table. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Column limit given to rows created by this table.
    pub max_column_count: usize,
    /// Whether add/duplicate/remove row controls may show at all.
    pub show_row_controls: bool,
    /// Render read-only whatever the mode.
    pub force_view: bool,
    /// Rows may be added and reordered while filling in.
    pub repeatable: bool,
}

pub const DEFAULT_MAX_COLUMNS: usize = 6;

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_column_count: DEFAULT_MAX_COLUMNS,
            show_row_controls: true,
            force_view: false,
            repeatable: false,
        }
    }
}

/// Which controls a table shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    pub add_row: bool,
    pub remove_row: bool,
    pub duplicate_row: bool,
    pub reorder_rows: bool,
    pub edit_columns: bool,
}

impl TableConfig {
    pub fn with_max_columns(max_column_count: usize) -> Self {
        Self {
            max_column_count,
            ..Self::default()
        }
    }

    pub fn effective_mode(&self, mode: OperationMode) -> OperationMode {
        if self.force_view {
            OperationMode::View
        } else {
            mode
        }
    }

    pub fn can_reorder(&self, mode: OperationMode) -> bool {
        match self.effective_mode(mode) {
            OperationMode::Edit => true,
            OperationMode::FillIn => self.repeatable,
            OperationMode::View => false,
        }
    }

    pub fn affordances(&self, mode: OperationMode) -> Affordances {
        let mode = self.effective_mode(mode);
        let rows = self.show_row_controls
            && match mode {
                OperationMode::Edit => true,
                OperationMode::FillIn => self.repeatable,
                OperationMode::View => false,
            };
        Affordances {
            add_row: rows,
            remove_row: rows,
            duplicate_row: rows,
            reorder_rows: self.can_reorder(mode),
            edit_columns: mode == OperationMode::Edit,
        }
    }

    /// Configuration for the table carried by a `List` or `Table` column of
    /// this table.
    pub fn nested_for(&self, mode: OperationMode, column_type: ColumnType) -> TableConfig {
        let mode = self.effective_mode(mode);
        let list = column_type == ColumnType::List;
        TableConfig {
            max_column_count: if list {
                crate::state::column::LIST_MAX_COLUMNS
            } else {
                crate::state::column::DEFAULT_NESTED_MAX_COLUMNS
            },
            show_row_controls: match mode {
                OperationMode::Edit => !list,
                OperationMode::FillIn => list,
                OperationMode::View => false,
            },
            force_view: mode == OperationMode::View,
            repeatable: list,
        }
    }
}

/// A required leaf that is still empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingField {
    /// `(row, column)` indices from the root table down to the column.
    pub path: Vec<(usize, usize)>,
    pub column_id: Id,
    pub column_type: ColumnType,
}

fn is_missing(mode: OperationMode, column: &Column) -> bool {
    if !capability(mode, column.column_type()).input_required {
        return false;
    }
    match &column.kind {
        ColumnKind::Text { content, .. } | ColumnKind::LongText { content, .. } => {
            content.trim().is_empty()
        }
        ColumnKind::Tag { value, .. } => value.is_none(),
        ColumnKind::File { files } | ColumnKind::MultipleFiles { files } => files.is_empty(),
        _ => false,
    }
}

/// Every required-but-empty leaf of the tree. Submission is allowed only
/// when this is empty; outside `FillIn` it always is.
pub fn missing_required(rows: &[Row], mode: OperationMode) -> Vec<MissingField> {
    let mut missing = Vec::new();
    collect_missing(rows, mode, &mut Vec::new(), &mut missing);
    missing
}

fn collect_missing(
    rows: &[Row],
    mode: OperationMode,
    path: &mut Vec<(usize, usize)>,
    missing: &mut Vec<MissingField>,
) {
    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, column) in row.columns.iter().enumerate() {
            path.push((row_index, column_index));
            if is_missing(mode, column) {
                missing.push(MissingField {
                    path: path.clone(),
                    column_id: column.id,
                    column_type: column.column_type(),
                });
            }
            if let Some(nested) = column.nested_rows() {
                collect_missing(nested, mode, path, missing);
            }
            path.pop();
        }
    }
}
