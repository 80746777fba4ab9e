use std::collections::HashSet;

use pretty_assertions::assert_eq;

use casesheet::state::column::{collect_ids, Column, ColumnKind, FileRef};
use casesheet::state::ids::Id;
use casesheet::state::mode::TableConfig;
use casesheet::state::row::Row;
use casesheet::state::table_state::TableState;

fn nested_scenario_row() -> Row {
    let inner = Row::new(Id(10), 1, 8).with_columns(vec![Column::new(
        Id(100),
        ColumnKind::Text {
            content: "expected result".to_string(),
            placeholder: Some("describe".to_string()),
        },
    )]);
    Row::new(Id(1), 1, 6).with_columns(vec![Column::new(
        Id(2),
        ColumnKind::Table { rows: vec![inner] },
    )])
}

fn fresh(next: &mut u64) -> Id {
    *next += 1;
    Id(*next)
}

/// Table nested `levels` deep, each level holding two rows.
fn deep_rows(levels: usize, next: &mut u64) -> Vec<Row> {
    let mut rows = Vec::new();
    for _ in 0..2 {
        let row_id = fresh(next);
        let mut columns = vec![Column::new(
            fresh(next),
            ColumnKind::Label {
                content: "step".to_string(),
            },
        )];
        if levels > 0 {
            let table_id = fresh(next);
            columns.push(Column::new(
                table_id,
                ColumnKind::Table {
                    rows: deep_rows(levels - 1, next),
                },
            ));
        }
        rows.push(Row::new(row_id, 1, 8).with_columns(columns));
    }
    rows
}

fn shape(rows: &[Row]) -> Vec<String> {
    let mut out = Vec::new();
    for row in rows {
        out.push(format!("row {}..{}", row.min_column_count, row.max_column_count));
        for column in &row.columns {
            out.push(format!("{:?} {:?}", column.column_type(), column.text_content()));
            if let Some(nested) = column.nested_rows() {
                out.extend(shape(nested).into_iter().map(|line| format!("  {line}")));
            }
        }
    }
    out
}

#[test]
fn test_duplicate_regenerates_every_id_in_subtree() {
    let source = nested_scenario_row();

    let copy = source.duplicate();

    let source_ids: HashSet<Id> = collect_ids(std::slice::from_ref(&source)).into_iter().collect();
    let copy_ids = collect_ids(std::slice::from_ref(&copy));
    assert_eq!(copy_ids.len(), 4);
    for id in &copy_ids {
        assert!(!source_ids.contains(id), "id {id} reused from the source row");
    }
    let unique: HashSet<Id> = copy_ids.iter().copied().collect();
    assert_eq!(unique.len(), copy_ids.len());
}

#[test]
fn test_duplicate_assigns_ids_top_down() {
    let source = nested_scenario_row();
    let mut counter = 1000;
    let mut next = || {
        counter += 1;
        Id(counter)
    };

    let copy = source.duplicate_with(&mut next);

    assert_eq!(
        collect_ids(std::slice::from_ref(&copy)),
        vec![Id(1001), Id(1002), Id(1003), Id(1004)]
    );
}

#[test]
fn test_duplicate_preserves_content_and_bounds() {
    let source = nested_scenario_row();

    let copy = source.duplicate();

    assert_eq!(shape(std::slice::from_ref(&copy)), shape(std::slice::from_ref(&source)));
    let nested = copy.columns[0].nested_rows().unwrap();
    assert_eq!(nested[0].columns[0].placeholder(), Some("describe"));
    assert_eq!(source.columns[0].nested_rows().unwrap()[0].id, Id(10));
}

#[test]
fn test_duplicate_keeps_ids_unique_across_deep_table() {
    let mut next = 0;
    let rows = deep_rows(4, &mut next);
    let mut state = TableState::from_parts(rows, TableConfig::default());

    state.duplicate_row(0).unwrap();
    state.duplicate_row(2).unwrap();

    let ids = collect_ids(state.rows());
    let unique: HashSet<Id> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(shape(&state.rows()[0..1]), shape(&state.rows()[1..2]));
}

#[test]
fn test_duplicate_shares_file_references() {
    let files = vec![FileRef {
        id: "f1".to_string(),
        name: "screenshot.png".to_string(),
        bucket: "attachments".to_string(),
    }];
    let source = Row::new(Id(1), 1, 6).with_columns(vec![Column::new(
        Id(2),
        ColumnKind::MultipleFiles {
            files: files.clone(),
        },
    )]);

    let copy = source.duplicate();

    assert_ne!(copy.columns[0].id, Id(2));
    assert_eq!(copy.columns[0].files(), Some(files.as_slice()));
}
