use dioxus::prelude::*;

use crate::state::column::{Column, ColumnKind, ColumnType, FileRef};
use crate::state::messages;
use crate::state::mode::{capability, OperationMode};
use crate::state::reference::values_or_empty;
use crate::state::row::Row;
use crate::ui::app::{notify_error, use_notice, Services};
use crate::ui::files::FileCell;
use crate::ui::table::{CustomTable, TableHandle};

/// One column of a row, rendered according to its type and the mode.
#[component]
pub fn ColumnCell(
    column: Column,
    row_index: usize,
    column_index: usize,
    mode: OperationMode,
    depth: usize,
    can_remove: bool,
    table: TableHandle,
) -> Element {
    let column_type = column.column_type();
    let cap = capability(mode, column_type);
    let affordances = table.config.affordances(mode);
    let (row, col) = (row_index, column_index);
    let column_id = column.id;

    let body = match &column.kind {
        ColumnKind::Label { content } => rsx! {
            span { class: "cell-label", "{content}" }
        },
        ColumnKind::Empty => rsx! {
            div { class: "cell-spacer" }
        },
        ColumnKind::Text { content, placeholder } => rsx! {
            input {
                class: "cell-input",
                id: "cell-{column.id}",
                value: "{content}",
                placeholder: placeholder.clone().unwrap_or_default(),
                disabled: !cap.input_enabled,
                required: cap.input_required,
                oninput: move |evt| {
                    let value = evt.value();
                    table.apply(|state| state.set_column_content(row, col, value));
                },
            }
        },
        ColumnKind::LongText { content, placeholder } => rsx! {
            textarea {
                class: "cell-textarea",
                id: "cell-{column.id}",
                value: "{content}",
                placeholder: placeholder.clone().unwrap_or_default(),
                disabled: !cap.input_enabled,
                required: cap.input_required,
                oninput: move |evt| {
                    let value = evt.value();
                    table.apply(|state| state.set_column_content(row, col, value));
                },
            }
        },
        ColumnKind::Tag { tag_id: Some(tag_id), value } => rsx! {
            TagSelect {
                key: "{tag_id}",
                tag_id: *tag_id,
                value: *value,
                enabled: cap.input_enabled,
                required: cap.input_required,
                on_select: move |selected: Option<u64>| {
                    table.apply(|state| state.set_tag_value(row, col, selected));
                },
            }
        },
        ColumnKind::Tag { tag_id: None, .. } => rsx! {
            select { class: "cell-select", disabled: true }
        },
        ColumnKind::List { rows } | ColumnKind::Table { rows } => {
            let nested_config = table.config.nested_for(mode, column_type);
            rsx! {
                CustomTable {
                    rows: rows.clone(),
                    mode,
                    config: nested_config,
                    depth: depth + 1,
                    on_change: move |nested: Vec<Row>| {
                        table.apply(|state| state.set_nested_rows(row, col, nested));
                    },
                }
            }
        }
        ColumnKind::File { files } | ColumnKind::MultipleFiles { files } => rsx! {
            FileCell {
                files: files.clone(),
                multiple: column_type == ColumnType::MultipleFiles,
                capability: cap,
                on_uploaded: move |uploaded: Vec<FileRef>| {
                    table.apply(|state| state.attach_files(column_id, uploaded));
                },
                on_remove: move |file_id: String| {
                    table.apply(|state| state.remove_file(column_id, &file_id));
                },
            }
        },
    };

    let type_code = column_type.code();
    let edit_label = messages::tr("table.edit_column");
    let remove_label = messages::tr("table.remove_column");

    rsx! {
        div { class: "cell cell-{type_code}", id: "column-{column.id}",
            {body}
            if affordances.edit_columns {
                div { class: "cell-actions",
                    button {
                        class: "cell-btn",
                        title: "{edit_label}",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            table.apply(|state| state.open_column_editor(row, col));
                        },
                        "\u{270E}"
                    }
                    button {
                        class: "cell-btn cell-btn-danger",
                        title: "{remove_label}",
                        disabled: !can_remove,
                        onclick: move |evt| {
                            evt.stop_propagation();
                            table.apply(|state| state.remove_column(row, col).map(|_| ()));
                        },
                        "\u{2715}"
                    }
                }
            }
        }
    }
}

/// Selector over the values of one external tag. Remounted (by key) when
/// the tag changes; while values load the selector is covered and inert.
#[component]
fn TagSelect(
    tag_id: u64,
    value: Option<u64>,
    enabled: bool,
    required: bool,
    on_select: EventHandler<Option<u64>>,
) -> Element {
    let services = use_context::<Services>();
    let notice = use_notice();
    let values = use_resource(move || {
        let services = services.clone();
        async move {
            let (values, error) = values_or_empty(&services.tags, tag_id).await;
            if error.is_some() {
                notify_error(notice, messages::tr("error.tag_values_unavailable"));
            }
            values
        }
    });

    let loaded = values.read().clone();
    let selected = value.map(|id| id.to_string()).unwrap_or_default();
    let choose_label = messages::tr("tag.choose_value");
    let archived_label = messages::tr("tag.archived");
    let loading_label = messages::tr("table.loading");

    rsx! {
        div { class: "tag-select",
            if let Some(loaded) = loaded {
                select {
                    class: "cell-select",
                    value: "{selected}",
                    disabled: !enabled,
                    required,
                    onchange: move |evt| {
                        on_select.call(evt.value().parse::<u64>().ok());
                    },
                    option { value: "", "{choose_label}" }
                    for tag_value in loaded.values {
                        option {
                            value: "{tag_value.id}",
                            disabled: !tag_value.is_selectable(),
                            title: tag_value.commentary.clone().unwrap_or_default(),
                            if tag_value.is_selectable() {
                                "{tag_value.name}"
                            } else {
                                "{tag_value.name} ({archived_label})"
                            }
                        }
                    }
                }
            } else {
                div { class: "loading-overlay", "{loading_label}" }
            }
        }
    }
}
