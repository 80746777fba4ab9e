use pretty_assertions::assert_eq;

use casesheet::state::column::{Column, ColumnKind, ColumnType, DEFAULT_NESTED_MAX_COLUMNS, MAX_NESTING_DEPTH};
use casesheet::state::ids::Id;
use casesheet::state::reference::{ReferenceError, Tag};
use casesheet::state::row::Row;
use casesheet::state::type_editor::{allowed_types, ColumnTypeDraft, DraftError, TagOptions};

fn text_column() -> Column {
    Column::new(
        Id(1),
        ColumnKind::Text {
            content: "Expected".to_string(),
            placeholder: Some("result".to_string()),
        },
    )
}

fn tag_column(tag_id: u64, value: Option<u64>) -> Column {
    Column::new(
        Id(2),
        ColumnKind::Tag {
            tag_id: Some(tag_id),
            value,
        },
    )
}

fn tags() -> Vec<Tag> {
    vec![
        Tag {
            id: 7,
            name: "Priority".to_string(),
        },
        Tag {
            id: 8,
            name: "Component".to_string(),
        },
    ]
}

#[test]
fn test_draft_starts_from_column() {
    let draft = ColumnTypeDraft::open(&text_column(), 0);

    assert_eq!(draft.column_type, ColumnType::Text);
    assert_eq!(draft.content, "Expected");
    assert_eq!(draft.placeholder, "result");
    assert_eq!(draft.tag_id, None);
    assert_eq!(draft.tag_options, TagOptions::Idle);
    assert!(draft.shows_content());
    assert!(draft.shows_placeholder());
}

#[test]
fn test_label_requires_content() {
    let mut column = text_column();
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::Label);
    draft.content = "   ".to_string();

    assert_eq!(draft.clone().apply(&mut column), Err(DraftError::ContentRequired));
    assert_eq!(column, text_column());

    draft.content = "Step".to_string();
    draft.apply(&mut column).unwrap();
    assert_eq!(
        column.kind,
        ColumnKind::Label {
            content: "Step".to_string()
        }
    );
}

#[test]
fn test_blank_placeholder_is_cleared() {
    let mut column = text_column();
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::LongText);
    draft.placeholder = "  ".to_string();

    draft.apply(&mut column).unwrap();

    assert_eq!(
        column.kind,
        ColumnKind::LongText {
            content: "Expected".to_string(),
            placeholder: None,
        }
    );
    assert_eq!(column.id, Id(1));
}

#[test]
fn test_tag_type_needs_loaded_tag_choice() {
    let mut column = text_column();
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::Tag);
    assert!(draft.needs_tag_options());
    assert!(!draft.shows_content());

    draft.begin_tag_load();
    assert!(!draft.needs_tag_options());
    assert_eq!(draft.validate(), Err(DraftError::TagsLoading));

    draft.finish_tag_load(Ok(tags()));
    assert_eq!(draft.tag_options.tags().len(), 2);
    assert_eq!(draft.validate(), Err(DraftError::TagRequired));

    draft.tag_id = Some(8);
    draft.apply(&mut column).unwrap();
    assert_eq!(column.tag_id(), Some(8));
    assert_eq!(column.tag_value(), None);
}

#[test]
fn test_failed_tag_load_leaves_empty_choice() {
    let mut draft = ColumnTypeDraft::open(&text_column(), 0);
    draft.set_type(ColumnType::Tag);
    draft.begin_tag_load();

    draft.finish_tag_load(Err(ReferenceError::Unavailable("offline".to_string())));

    assert_eq!(draft.tag_options, TagOptions::Failed);
    assert!(draft.tag_options.tags().is_empty());
    assert!(!draft.needs_tag_options());
    assert_eq!(draft.validate(), Err(DraftError::TagRequired));
}

#[test]
fn test_changing_tag_resets_selected_value() {
    let mut column = tag_column(7, Some(70));
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.finish_tag_load(Ok(tags()));
    draft.apply(&mut column).unwrap();
    assert_eq!(column.tag_value(), Some(70));

    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.finish_tag_load(Ok(tags()));
    draft.tag_id = Some(8);
    draft.apply(&mut column).unwrap();
    assert_eq!(column.tag_id(), Some(8));
    assert_eq!(column.tag_value(), None);
}

#[test]
fn test_nested_types_hidden_at_depth_limit() {
    let shallow = allowed_types(MAX_NESTING_DEPTH - 1);
    assert!(shallow.contains(&ColumnType::Table));
    assert!(shallow.contains(&ColumnType::List));

    let deepest = allowed_types(MAX_NESTING_DEPTH);
    assert!(!deepest.contains(&ColumnType::Table));
    assert!(!deepest.contains(&ColumnType::List));
    assert!(deepest.contains(&ColumnType::Text));

    let mut draft = ColumnTypeDraft::open(&text_column(), MAX_NESTING_DEPTH);
    draft.set_type(ColumnType::Table);
    assert_eq!(draft.validate(), Err(DraftError::TypeNotAllowed(ColumnType::Table)));
}

#[test]
fn test_table_to_list_narrows_rows() {
    let wide = Row::new(Id(10), 1, 8).with_columns(vec![Column::blank_text(Id(11)), Column::blank_text(Id(12))]);
    let mut column = Column::new(Id(3), ColumnKind::Table { rows: vec![wide] });
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::List);

    draft.apply(&mut column).unwrap();

    let rows = column.nested_rows().unwrap();
    assert_eq!(column.column_type(), ColumnType::List);
    assert_eq!(rows[0].id, Id(10));
    assert_eq!(rows[0].max_column_count, 1);
    assert_eq!(rows[0].columns.len(), 1);
    assert_eq!(rows[0].columns[0].id, Id(11));
}

#[test]
fn test_list_to_table_lifts_list_limit() {
    let item = Row::new(Id(20), 1, 1).with_columns(vec![Column::blank_text(Id(21))]);
    let mut column = Column::new(Id(4), ColumnKind::List { rows: vec![item] });
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::Table);

    draft.apply(&mut column).unwrap();

    assert_eq!(column.column_type(), ColumnType::Table);
    let rows = column.nested_rows_mut().unwrap();
    assert_eq!(rows[0].max_column_count, DEFAULT_NESTED_MAX_COLUMNS);
    assert_eq!(rows[0].add_column(), Ok(1));
    assert_eq!(rows[0].columns[0].id, Id(21));
}

#[test]
fn test_switching_to_unrelated_type_drops_payload() {
    let mut column = text_column();
    let mut draft = ColumnTypeDraft::open(&column, 0);
    draft.set_type(ColumnType::MultipleFiles);

    draft.apply(&mut column).unwrap();

    assert_eq!(column.kind, ColumnKind::MultipleFiles { files: Vec::new() });
}

#[test]
fn test_draft_errors_have_message_keys() {
    assert_eq!(DraftError::ContentRequired.message_key(), "error.content_required");
    assert_eq!(DraftError::TagRequired.message_key(), "error.tag_required");
    assert_eq!(DraftError::TagsLoading.message_key(), "error.tags_loading");
    assert_eq!(
        DraftError::TypeNotAllowed(ColumnType::List).message_key(),
        "error.type_not_allowed"
    );
}
