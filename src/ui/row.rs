use dioxus::prelude::*;

use crate::state::column::Column;
use crate::state::messages;
use crate::state::mode::OperationMode;
use crate::state::row::Row;
use crate::state::table_state::ColumnTarget;
use crate::ui::cell::ColumnCell;
use crate::ui::column_editor::ColumnTypeEditor;
use crate::ui::table::TableHandle;

#[component]
pub fn TableRow(
    row: Row,
    index: usize,
    row_count: usize,
    mode: OperationMode,
    depth: usize,
    table: TableHandle,
) -> Element {
    let affordances = table.config.affordances(mode);
    let is_open = *table.open_row.read() == Some(index);
    let editing = table.open_column.read().filter(|target| target.row == index);
    let editing_column = editing.and_then(|target| row.columns.get(target.column).cloned());
    let can_add_column = row.can_add_column();
    let can_remove_column = row.can_remove_column();

    let duplicate_label = messages::tr("table.duplicate_row");
    let remove_label = messages::tr("table.remove_row");
    let add_column_label = messages::tr("table.add_column");
    let drag_label = messages::tr("table.drag_handle");

    let mut row_class = if index % 2 == 0 { "table-row even" } else { "table-row odd" }.to_string();
    if is_open {
        row_class.push_str(" open-row");
    }

    rsx! {
        div {
            class: "{row_class}",
            id: "row-{row.id}",
            ondragover: move |evt| {
                if affordances.reorder_rows {
                    evt.prevent_default();
                }
            },
            ondrop: move |evt| {
                evt.prevent_default();
                let mut drag_from = table.drag_from;
                let from = *drag_from.peek();
                drag_from.set(None);
                if let Some(from) = from {
                    table.apply(|state| state.reorder_rows(mode, from, index));
                }
            },
            if affordances.reorder_rows && row_count > 1 {
                span {
                    class: "drag-handle",
                    title: "{drag_label}",
                    draggable: "true",
                    ondragstart: move |_| {
                        let mut drag_from = table.drag_from;
                        drag_from.set(Some(index));
                    },
                    ondragend: move |_| {
                        let mut drag_from = table.drag_from;
                        drag_from.set(None);
                    },
                    "\u{2630}"
                }
            }
            div {
                class: "row-columns",
                onclick: move |_| {
                    if affordances.edit_columns {
                        table.apply(|state| {
                            state.toggle_row(index);
                            Ok(())
                        });
                    }
                },
                for (column_index, column) in row.columns.iter().cloned().enumerate() {
                    ColumnCell {
                        key: "{column.id}",
                        column,
                        row_index: index,
                        column_index,
                        mode,
                        depth,
                        can_remove: can_remove_column,
                        table,
                    }
                }
            }
            if affordances.edit_columns {
                button {
                    class: "table-btn add-column",
                    disabled: !can_add_column,
                    onclick: move |evt| {
                        evt.stop_propagation();
                        table.apply(|state| state.add_column(index).map(|_| ()));
                    },
                    "+ {add_column_label}"
                }
            }
            if affordances.duplicate_row || affordances.remove_row {
                div { class: "row-actions",
                    if affordances.duplicate_row {
                        button {
                            class: "table-btn",
                            title: "{duplicate_label}",
                            onclick: move |_| table.apply(|state| state.duplicate_row(index).map(|_| ())),
                            "\u{2398}"
                        }
                    }
                    if affordances.remove_row {
                        button {
                            class: "table-btn table-btn-danger",
                            title: "{remove_label}",
                            onclick: move |_| table.apply(|state| state.remove_row(index).map(|_| ())),
                            "\u{1F5D1}"
                        }
                    }
                }
            }
        }
        if let (Some(target), Some(column)) = (editing, editing_column) {
            ColumnTypeEditor {
                key: "{column.id}",
                column,
                depth,
                on_close: move |result: Option<Column>| {
                    close_editor(table, target, result);
                },
            }
        }
    }
}

fn close_editor(table: TableHandle, target: ColumnTarget, result: Option<Column>) {
    match result {
        Some(column) => table.apply(|state| {
            state.replace_column(target.row, target.column, column)?;
            state.close_column_editor();
            Ok(())
        }),
        None => {
            let mut open_column = table.open_column;
            open_column.set(None);
        }
    }
}
