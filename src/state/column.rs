use serde::{Deserialize, Serialize};

use crate::state::ids::Id;
use crate::state::row::Row;

/// Deepest nesting of tables inside columns a document may reach.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Column limit for rows of a table created by a `Table` column.
pub const DEFAULT_NESTED_MAX_COLUMNS: usize = 8;

/// Column limit for rows of a list: a list repeats a single column.
pub const LIST_MAX_COLUMNS: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Label,
    Text,
    LongText,
    Tag,
    List,
    Table,
    Empty,
    File,
    MultipleFiles,
}

impl ColumnType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Label,
            Self::Text,
            Self::LongText,
            Self::Tag,
            Self::List,
            Self::Table,
            Self::Empty,
            Self::File,
            Self::MultipleFiles,
        ]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Label => "Label",
            Self::Text => "Text",
            Self::LongText => "LongText",
            Self::Tag => "Tag",
            Self::List => "List",
            Self::Table => "Table",
            Self::Empty => "Empty",
            Self::File => "File",
            Self::MultipleFiles => "MultipleFiles",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|ty| ty.code() == code)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Label => "column_type.label",
            Self::Text => "column_type.text",
            Self::LongText => "column_type.long_text",
            Self::Tag => "column_type.tag",
            Self::List => "column_type.list",
            Self::Table => "column_type.table",
            Self::Empty => "column_type.empty",
            Self::File => "column_type.file",
            Self::MultipleFiles => "column_type.multiple_files",
        }
    }

    pub fn is_nested(self) -> bool {
        matches!(self, Self::List | Self::Table)
    }
}

/// An already-uploaded file owned by the storage service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    pub id: String,
    pub name: String,
    pub bucket: String,
}

/// Type-dependent payload of a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Label {
        content: String,
    },
    Text {
        content: String,
        placeholder: Option<String>,
    },
    LongText {
        content: String,
        placeholder: Option<String>,
    },
    Tag {
        tag_id: Option<u64>,
        value: Option<u64>,
    },
    List {
        rows: Vec<Row>,
    },
    Table {
        rows: Vec<Row>,
    },
    Empty,
    File {
        files: Vec<FileRef>,
    },
    MultipleFiles {
        files: Vec<FileRef>,
    },
}

impl ColumnKind {
    pub fn empty_of(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Label => Self::Label {
                content: String::new(),
            },
            ColumnType::Text => Self::Text {
                content: String::new(),
                placeholder: None,
            },
            ColumnType::LongText => Self::LongText {
                content: String::new(),
                placeholder: None,
            },
            ColumnType::Tag => Self::Tag {
                tag_id: None,
                value: None,
            },
            ColumnType::List => Self::List { rows: Vec::new() },
            ColumnType::Table => Self::Table { rows: Vec::new() },
            ColumnType::Empty => Self::Empty,
            ColumnType::File => Self::File { files: Vec::new() },
            ColumnType::MultipleFiles => Self::MultipleFiles { files: Vec::new() },
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Label { .. } => ColumnType::Label,
            Self::Text { .. } => ColumnType::Text,
            Self::LongText { .. } => ColumnType::LongText,
            Self::Tag { .. } => ColumnType::Tag,
            Self::List { .. } => ColumnType::List,
            Self::Table { .. } => ColumnType::Table,
            Self::Empty => ColumnType::Empty,
            Self::File { .. } => ColumnType::File,
            Self::MultipleFiles { .. } => ColumnType::MultipleFiles,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub id: Id,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(id: Id, kind: ColumnKind) -> Self {
        Self { id, kind }
    }

    /// The column every "add column" creates: empty `Text`.
    pub fn blank_text(id: Id) -> Self {
        Self::new(id, ColumnKind::empty_of(ColumnType::Text))
    }

    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Label { content }
            | ColumnKind::Text { content, .. }
            | ColumnKind::LongText { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Returns false when the column does not carry text.
    pub fn set_text_content(&mut self, value: impl Into<String>) -> bool {
        match &mut self.kind {
            ColumnKind::Label { content }
            | ColumnKind::Text { content, .. }
            | ColumnKind::LongText { content, .. } => {
                *content = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Text { placeholder, .. } | ColumnKind::LongText { placeholder, .. } => {
                placeholder.as_deref()
            }
            _ => None,
        }
    }

    pub fn tag_id(&self) -> Option<u64> {
        match self.kind {
            ColumnKind::Tag { tag_id, .. } => tag_id,
            _ => None,
        }
    }

    pub fn tag_value(&self) -> Option<u64> {
        match self.kind {
            ColumnKind::Tag { value, .. } => value,
            _ => None,
        }
    }

    pub fn set_tag_value(&mut self, selected: Option<u64>) -> bool {
        match &mut self.kind {
            ColumnKind::Tag { value, .. } => {
                *value = selected;
                true
            }
            _ => false,
        }
    }

    pub fn nested_rows(&self) -> Option<&[Row]> {
        match &self.kind {
            ColumnKind::List { rows } | ColumnKind::Table { rows } => Some(rows),
            _ => None,
        }
    }

    pub fn nested_rows_mut(&mut self) -> Option<&mut Vec<Row>> {
        match &mut self.kind {
            ColumnKind::List { rows } | ColumnKind::Table { rows } => Some(rows),
            _ => None,
        }
    }

    pub fn files(&self) -> Option<&[FileRef]> {
        match &self.kind {
            ColumnKind::File { files } | ColumnKind::MultipleFiles { files } => Some(files),
            _ => None,
        }
    }

    /// Adds freshly uploaded files. A `File` column keeps only the newest one.
    pub fn attach_files(&mut self, uploaded: Vec<FileRef>) -> bool {
        match &mut self.kind {
            ColumnKind::File { files } => {
                if let Some(last) = uploaded.into_iter().last() {
                    *files = vec![last];
                }
                true
            }
            ColumnKind::MultipleFiles { files } => {
                files.extend(uploaded);
                true
            }
            _ => false,
        }
    }

    pub fn remove_file(&mut self, file_id: &str) -> bool {
        match &mut self.kind {
            ColumnKind::File { files } | ColumnKind::MultipleFiles { files } => {
                let before = files.len();
                files.retain(|f| f.id != file_id);
                files.len() != before
            }
            _ => false,
        }
    }

    /// Switches the column to `target`, carrying over whatever payload still
    /// makes sense for the new type.
    pub fn retype(&mut self, target: ColumnType) {
        if self.column_type() == target {
            return;
        }
        let previous = std::mem::replace(&mut self.kind, ColumnKind::Empty);
        let text = match &previous {
            ColumnKind::Label { content }
            | ColumnKind::Text { content, .. }
            | ColumnKind::LongText { content, .. } => Some(content.clone()),
            _ => None,
        };
        let placeholder = match &previous {
            ColumnKind::Text { placeholder, .. } | ColumnKind::LongText { placeholder, .. } => {
                placeholder.clone()
            }
            _ => None,
        };

        self.kind = match (target, previous) {
            (ColumnType::Label, _) => ColumnKind::Label {
                content: text.unwrap_or_default(),
            },
            (ColumnType::Text, _) => ColumnKind::Text {
                content: text.unwrap_or_default(),
                placeholder,
            },
            (ColumnType::LongText, _) => ColumnKind::LongText {
                content: text.unwrap_or_default(),
                placeholder,
            },
            (ColumnType::List, ColumnKind::Table { mut rows }) => {
                rows.iter_mut().for_each(Row::narrow_to_list);
                ColumnKind::List { rows }
            }
            (ColumnType::Table, ColumnKind::List { mut rows }) => {
                rows.iter_mut().for_each(Row::widen_to_table);
                ColumnKind::Table { rows }
            }
            (ColumnType::File, ColumnKind::MultipleFiles { mut files }) => {
                files.truncate(1);
                ColumnKind::File { files }
            }
            (ColumnType::MultipleFiles, ColumnKind::File { files }) => {
                ColumnKind::MultipleFiles { files }
            }
            (other, _) => ColumnKind::empty_of(other),
        };
    }

    /// Copy of this column where the column and every nested row and column
    /// get a fresh id. File references are shared with the source.
    pub fn duplicate_with(&self, next_id: &mut impl FnMut() -> Id) -> Column {
        let id = next_id();
        let kind = match &self.kind {
            ColumnKind::List { rows } => ColumnKind::List {
                rows: rows.iter().map(|row| row.duplicate_with(next_id)).collect(),
            },
            ColumnKind::Table { rows } => ColumnKind::Table {
                rows: rows.iter().map(|row| row.duplicate_with(next_id)).collect(),
            },
            other => other.clone(),
        };
        Column { id, kind }
    }

    /// Same type and schema settings with fresh ids and nothing entered.
    /// Labels keep their text since it belongs to the schema.
    pub fn blank_copy_with(&self, next_id: &mut impl FnMut() -> Id) -> Column {
        let id = next_id();
        let kind = match &self.kind {
            ColumnKind::Label { content } => ColumnKind::Label {
                content: content.clone(),
            },
            ColumnKind::Text { placeholder, .. } => ColumnKind::Text {
                content: String::new(),
                placeholder: placeholder.clone(),
            },
            ColumnKind::LongText { placeholder, .. } => ColumnKind::LongText {
                content: String::new(),
                placeholder: placeholder.clone(),
            },
            ColumnKind::Tag { tag_id, .. } => ColumnKind::Tag {
                tag_id: *tag_id,
                value: None,
            },
            ColumnKind::List { rows } => ColumnKind::List {
                rows: blank_first_row(rows, next_id),
            },
            ColumnKind::Table { rows } => ColumnKind::Table {
                rows: rows.iter().map(|row| row.blank_copy_with(next_id)).collect(),
            },
            ColumnKind::Empty => ColumnKind::Empty,
            ColumnKind::File { .. } => ColumnKind::File { files: Vec::new() },
            ColumnKind::MultipleFiles { .. } => ColumnKind::MultipleFiles { files: Vec::new() },
        };
        Column { id, kind }
    }

    /// Nesting depth below this column: 0 for leaves.
    pub fn depth(&self) -> usize {
        self.nested_rows()
            .map(|rows| 1 + rows_depth(rows))
            .unwrap_or(0)
    }
}

/// A list repeats one item schema, so a blank list keeps a single item.
fn blank_first_row(rows: &[Row], next_id: &mut impl FnMut() -> Id) -> Vec<Row> {
    rows.first()
        .map(|row| vec![row.blank_copy_with(next_id)])
        .unwrap_or_default()
}

/// Deepest nesting found under a sequence of rows.
pub fn rows_depth(rows: &[Row]) -> usize {
    rows.iter()
        .flat_map(|row| row.columns.iter())
        .map(Column::depth)
        .max()
        .unwrap_or(0)
}

/// Visits every row and column id in document order.
pub fn visit_ids(rows: &[Row], visit: &mut impl FnMut(Id)) {
    for row in rows {
        visit(row.id);
        for column in &row.columns {
            visit(column.id);
            if let Some(nested) = column.nested_rows() {
                visit_ids(nested, visit);
            }
        }
    }
}

pub fn collect_ids(rows: &[Row]) -> Vec<Id> {
    let mut ids = Vec::new();
    visit_ids(rows, &mut |id| ids.push(id));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str) -> FileRef {
        FileRef {
            id: id.to_string(),
            name: format!("{id}.png"),
            bucket: "evidence".to_string(),
        }
    }

    #[test]
    fn retype_keeps_text_between_textual_types() {
        let mut column = Column::new(
            Id(1),
            ColumnKind::Text {
                content: "login".to_string(),
                placeholder: Some("step".to_string()),
            },
        );
        column.retype(ColumnType::LongText);
        assert_eq!(column.text_content(), Some("login"));
        assert_eq!(column.placeholder(), Some("step"));

        column.retype(ColumnType::Label);
        assert_eq!(column.text_content(), Some("login"));
        assert_eq!(column.placeholder(), None);
    }

    #[test]
    fn retype_to_list_narrows_rows_to_one_column() {
        let mut row = Row::new(Id(2), 1, 3);
        row.columns = vec![Column::blank_text(Id(3)), Column::blank_text(Id(4))];
        let mut column = Column::new(Id(1), ColumnKind::Table { rows: vec![row] });

        column.retype(ColumnType::List);

        let rows = column.nested_rows().unwrap();
        assert_eq!(rows[0].columns.len(), 1);
        assert_eq!(rows[0].max_column_count, 1);
        assert_eq!(rows[0].min_column_count, 1);
    }

    #[test]
    fn retype_to_single_file_keeps_first() {
        let mut column = Column::new(
            Id(1),
            ColumnKind::MultipleFiles {
                files: vec![file("a"), file("b")],
            },
        );
        column.retype(ColumnType::File);
        assert_eq!(column.files().unwrap(), &[file("a")]);
    }

    #[test]
    fn retype_to_unrelated_type_drops_payload() {
        let mut column = Column::new(
            Id(1),
            ColumnKind::File {
                files: vec![file("a")],
            },
        );
        column.retype(ColumnType::Tag);
        assert_eq!(
            column.kind,
            ColumnKind::Tag {
                tag_id: None,
                value: None
            }
        );
    }

    #[test]
    fn single_file_column_replaces_on_attach() {
        let mut column = Column::new(Id(1), ColumnKind::empty_of(ColumnType::File));
        assert!(column.attach_files(vec![file("a")]));
        assert!(column.attach_files(vec![file("b"), file("c")]));
        assert_eq!(column.files().unwrap(), &[file("c")]);
    }

    #[test]
    fn depth_counts_nested_tables() {
        let leaf = Column::blank_text(Id(10));
        assert_eq!(leaf.depth(), 0);

        let mut inner_row = Row::new(Id(11), 1, 1);
        inner_row.columns.push(leaf);
        let list = Column::new(Id(12), ColumnKind::List { rows: vec![inner_row] });
        assert_eq!(list.depth(), 1);

        let mut outer_row = Row::new(Id(13), 1, 2);
        outer_row.columns.push(list);
        let table = Column::new(Id(14), ColumnKind::Table { rows: vec![outer_row] });
        assert_eq!(table.depth(), 2);
    }
}
