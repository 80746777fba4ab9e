use thiserror::Error;

use crate::state::column::{Column, ColumnKind, ColumnType, MAX_NESTING_DEPTH};
use crate::state::reference::{ReferenceError, Tag};

pub fn content_editable(column_type: ColumnType) -> bool {
    matches!(column_type, ColumnType::Text | ColumnType::LongText | ColumnType::Label)
}

pub fn content_required(column_type: ColumnType) -> bool {
    column_type == ColumnType::Label
}

pub fn placeholder_editable(column_type: ColumnType) -> bool {
    matches!(column_type, ColumnType::Text | ColumnType::LongText)
}

/// Types offered for a column living in a table nested `depth` levels deep.
pub fn allowed_types(depth: usize) -> Vec<ColumnType> {
    ColumnType::all()
        .iter()
        .copied()
        .filter(|ty| !ty.is_nested() || depth < MAX_NESTING_DEPTH)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("content is required for this column type")]
    ContentRequired,
    #[error("choose a tag")]
    TagRequired,
    #[error("tags are still loading")]
    TagsLoading,
    #[error("column type {0:?} is not allowed here")]
    TypeNotAllowed(ColumnType),
}

impl DraftError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::ContentRequired => "error.content_required",
            Self::TagRequired => "error.tag_required",
            Self::TagsLoading => "error.tags_loading",
            Self::TypeNotAllowed(_) => "error.type_not_allowed",
        }
    }
}

/// Load state of the project tags offered for a `Tag` column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagOptions {
    #[default]
    Idle,
    Loading,
    Ready(Vec<Tag>),
    /// Loading failed; the list is empty and the user was told.
    Failed,
}

impl TagOptions {
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Ready(tags) => tags,
            _ => &[],
        }
    }
}

/// Uncommitted edits of one column's schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnTypeDraft {
    pub column_type: ColumnType,
    pub content: String,
    pub placeholder: String,
    pub tag_id: Option<u64>,
    pub tag_options: TagOptions,
    depth: usize,
}

impl ColumnTypeDraft {
    pub fn open(column: &Column, depth: usize) -> Self {
        Self {
            column_type: column.column_type(),
            content: column.text_content().unwrap_or_default().to_string(),
            placeholder: column.placeholder().unwrap_or_default().to_string(),
            tag_id: column.tag_id(),
            tag_options: TagOptions::Idle,
            depth,
        }
    }

    pub fn allowed_types(&self) -> Vec<ColumnType> {
        allowed_types(self.depth)
    }

    pub fn set_type(&mut self, column_type: ColumnType) {
        self.column_type = column_type;
    }

    pub fn shows_content(&self) -> bool {
        content_editable(self.column_type)
    }

    pub fn shows_placeholder(&self) -> bool {
        placeholder_editable(self.column_type)
    }

    /// True when the tag list should be fetched now.
    pub fn needs_tag_options(&self) -> bool {
        self.column_type == ColumnType::Tag && self.tag_options == TagOptions::Idle
    }

    pub fn begin_tag_load(&mut self) {
        self.tag_options = TagOptions::Loading;
    }

    pub fn finish_tag_load(&mut self, result: Result<Vec<Tag>, ReferenceError>) {
        self.tag_options = match result {
            Ok(tags) => TagOptions::Ready(tags),
            Err(err) => {
                tracing::warn!(error = %err, "could not load tags for the column editor");
                TagOptions::Failed
            }
        };
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if !self.allowed_types().contains(&self.column_type) {
            return Err(DraftError::TypeNotAllowed(self.column_type));
        }
        if content_required(self.column_type) && self.content.trim().is_empty() {
            return Err(DraftError::ContentRequired);
        }
        if self.column_type == ColumnType::Tag {
            if self.tag_options == TagOptions::Loading {
                return Err(DraftError::TagsLoading);
            }
            if self.tag_id.is_none() {
                return Err(DraftError::TagRequired);
            }
        }
        Ok(())
    }

    /// Writes the draft back into `column`. On error the column is untouched.
    pub fn apply(self, column: &mut Column) -> Result<(), DraftError> {
        self.validate()?;
        column.retype(self.column_type);
        match &mut column.kind {
            ColumnKind::Label { content } => *content = self.content,
            ColumnKind::Text {
                content,
                placeholder,
            }
            | ColumnKind::LongText {
                content,
                placeholder,
            } => {
                *content = self.content;
                let trimmed = self.placeholder.trim();
                *placeholder = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            ColumnKind::Tag { tag_id, value } => {
                if *tag_id != self.tag_id {
                    *value = None;
                }
                *tag_id = self.tag_id;
            }
            _ => {}
        }
        Ok(())
    }
}
