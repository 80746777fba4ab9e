use dioxus::prelude::*;
use tracing::debug;

use crate::state::messages;
use crate::state::mode::{OperationMode, TableConfig};
use crate::state::rejection::Rejection;
use crate::state::row::Row;
use crate::state::table_state::{ColumnTarget, TableState};
use crate::ui::app::{notify_error, use_notice, Notice};
use crate::ui::row::TableRow;

/// Everything a row or cell needs to fold an edit back into its table.
#[derive(Clone, Copy, PartialEq)]
pub struct TableHandle {
    pub rows: ReadOnlySignal<Vec<Row>>,
    pub config: TableConfig,
    pub open_row: Signal<Option<usize>>,
    pub open_column: Signal<Option<ColumnTarget>>,
    pub drag_from: Signal<Option<usize>>,
    pub on_change: EventHandler<Vec<Row>>,
    pub notice: Signal<Option<Notice>>,
}

impl TableHandle {
    /// Runs `op` against the current rows. On success the new rows go to
    /// the owner; a rejection leaves everything as is and tells the user.
    pub fn apply(self, op: impl FnOnce(&mut TableState) -> Result<(), Rejection>) {
        let mut open_row = self.open_row;
        let mut open_column = self.open_column;
        let mut table = TableState::from_parts(self.rows.peek().clone(), self.config)
            .with_editing(*open_row.peek(), *open_column.peek());

        match op(&mut table) {
            Ok(()) => {
                open_row.set(table.open_row());
                open_column.set(table.open_column());
                self.on_change.call(table.into_rows());
            }
            Err(rejection) => {
                debug!(%rejection, "table edit rejected");
                notify_error(self.notice, messages::tr(rejection.message_key()));
            }
        }
    }
}

/// A table of rows at any nesting depth. The owner holds the rows and gets
/// every change back through `on_change`.
#[component]
pub fn CustomTable(
    rows: ReadOnlySignal<Vec<Row>>,
    mode: OperationMode,
    config: TableConfig,
    depth: usize,
    on_change: EventHandler<Vec<Row>>,
) -> Element {
    let open_row = use_signal::<Option<usize>>(|| None);
    let open_column = use_signal::<Option<ColumnTarget>>(|| None);
    let drag_from = use_signal::<Option<usize>>(|| None);
    let notice = use_notice();

    use_effect(move || {
        if rows.peek().is_empty() && config.effective_mode(mode) == OperationMode::Edit {
            let seeded = TableState::new(Vec::new(), mode, config);
            on_change.call(seeded.into_rows());
        }
    });

    let handle = TableHandle {
        rows,
        config,
        open_row,
        open_column,
        drag_from,
        on_change,
        notice,
    };
    let mode = config.effective_mode(mode);
    let affordances = config.affordances(mode);
    let snapshot = rows.read().clone();
    let row_count = snapshot.len();
    let add_row_label = messages::tr("table.add_row");

    rsx! {
        div { class: if depth == 0 { "custom-table" } else { "custom-table nested" },
            for (index, row) in snapshot.into_iter().enumerate() {
                TableRow {
                    key: "{row.id}",
                    row,
                    index,
                    row_count,
                    mode,
                    depth,
                    table: handle,
                }
            }
            if affordances.add_row {
                button {
                    class: "table-btn add-row",
                    onclick: move |_| {
                        handle.apply(|table| {
                            table.add_row(mode);
                            Ok(())
                        })
                    },
                    "\u{2795} {add_row_label}"
                }
            }
        }
    }
}
