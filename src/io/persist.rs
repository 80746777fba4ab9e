//! Keyed persistence shape of a table.
//!
//! The backend addresses rows by id, so a table's rows are stored as a map
//! from row id to row. Map iteration order is not something to rely on, so
//! the writer also stores the display order explicitly:
//!
//! ```json
//! { "order": ["17", "12"], "rows": { "12": { ... }, "17": { ... } } }
//! ```
//!
//! Documents written without `order` (a bare `{ "<id>": row }` map) are still
//! read. Columns, and the rows of tables nested inside columns, are plain
//! arrays.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::io::DocumentError;
use crate::state::column::{
    Column, ColumnKind, ColumnType, FileRef, DEFAULT_NESTED_MAX_COLUMNS, MAX_NESTING_DEPTH,
};
use crate::state::ids::{self, Id};
use crate::state::mode::DEFAULT_MAX_COLUMNS;
use crate::state::row::Row;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedColumn {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type", default)]
    pub column_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<PersistedRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRef>>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub min_column_count: Option<usize>,
    #[serde(default)]
    pub max_column_count: Option<usize>,
    #[serde(default)]
    pub columns: Vec<PersistedColumn>,
}

/// Rows of a table keyed by id, with the display order alongside.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct KeyedRows {
    pub order: Vec<String>,
    pub rows: BTreeMap<String, PersistedRow>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyedRowsRepr {
    Ordered {
        #[serde(default)]
        order: Vec<String>,
        rows: BTreeMap<String, PersistedRow>,
    },
    Bare(BTreeMap<String, PersistedRow>),
}

impl<'de> Deserialize<'de> for KeyedRows {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match KeyedRowsRepr::deserialize(deserializer)? {
            KeyedRowsRepr::Ordered { order, rows } => KeyedRows { order, rows },
            KeyedRowsRepr::Bare(rows) => KeyedRows {
                order: legacy_order(rows.keys()),
                rows,
            },
        })
    }
}

/// Order of a map written without `order`: integer keys ascending, then the
/// rest by key. Clock-based row ids make the first part creation order.
fn legacy_order<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<String> {
    let (mut numeric, mut other): (Vec<&String>, Vec<&String>) =
        keys.partition(|key| key.parse::<u64>().is_ok());
    numeric.sort_by_key(|key| key.parse::<u64>().unwrap_or(u64::MAX));
    other.sort();
    numeric.into_iter().chain(other).cloned().collect()
}

pub fn rows_to_keyed(rows: &[Row]) -> KeyedRows {
    let mut keyed = KeyedRows::default();
    for row in rows {
        let key = row.id.key();
        keyed.order.push(key.clone());
        keyed.rows.insert(key, row_to_persisted(row));
    }
    keyed
}

/// Rebuilds the ordered rows. Keys listed in `order` come first, rows the
/// order does not mention are appended, unknown keys in `order` are skipped.
pub fn rows_from_keyed(mut keyed: KeyedRows) -> Result<Vec<Row>, DocumentError> {
    let mut rows = Vec::with_capacity(keyed.rows.len());

    let mut ordered_keys: Vec<String> = Vec::with_capacity(keyed.rows.len());
    for key in keyed.order.drain(..) {
        if keyed.rows.contains_key(&key) && !ordered_keys.contains(&key) {
            ordered_keys.push(key);
        } else if !keyed.rows.contains_key(&key) {
            warn!(%key, "row order names a missing row, skipping");
        }
    }
    let leftovers: Vec<String> = legacy_order(
        keyed
            .rows
            .keys()
            .filter(|key| !ordered_keys.contains(*key)),
    );
    ordered_keys.extend(leftovers);

    for key in ordered_keys {
        if let Some(persisted) = keyed.rows.remove(&key) {
            let fallback = Id::parse_key(&key);
            let row = row_from_persisted(persisted, fallback, 0)?;
            rows.push(row);
        }
    }

    rekey_duplicate_rows(&mut rows, &mut HashSet::new());
    Ok(rows)
}

pub fn row_to_persisted(row: &Row) -> PersistedRow {
    PersistedRow {
        id: Value::from(row.id.as_u64()),
        min_column_count: Some(row.min_column_count),
        max_column_count: Some(row.max_column_count),
        columns: row.columns.iter().map(column_to_persisted).collect(),
    }
}

pub fn column_to_persisted(column: &Column) -> PersistedColumn {
    let mut persisted = PersistedColumn {
        id: Value::from(column.id.as_u64()),
        column_type: Some(column.column_type().code().to_string()),
        ..PersistedColumn::default()
    };
    match &column.kind {
        ColumnKind::Label { content } => persisted.content = Some(Value::from(content.as_str())),
        ColumnKind::Text {
            content,
            placeholder,
        }
        | ColumnKind::LongText {
            content,
            placeholder,
        } => {
            persisted.content = Some(Value::from(content.as_str()));
            persisted.placeholder = placeholder.clone();
        }
        ColumnKind::Tag { tag_id, value } => {
            persisted.tag_id = *tag_id;
            persisted.content = value.map(Value::from);
        }
        ColumnKind::List { rows } | ColumnKind::Table { rows } => {
            persisted.rows = Some(rows.iter().map(row_to_persisted).collect());
        }
        ColumnKind::File { files } | ColumnKind::MultipleFiles { files } => {
            persisted.files = Some(files.clone());
        }
        ColumnKind::Empty => {}
    }
    persisted
}

fn row_from_persisted(persisted: PersistedRow, fallback: Option<Id>, depth: usize) -> Result<Row, DocumentError> {
    let id = parse_id(&persisted.id).or(fallback).unwrap_or_else(ids::next_id);
    let mut columns = persisted
        .columns
        .into_iter()
        .map(|column| column_from_persisted(column, depth))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for column in &mut columns {
        if !seen.insert(column.id) {
            let fresh = ids::next_id();
            warn!(row = %id, duplicate = %column.id, %fresh, "re-keying duplicate column id");
            column.id = fresh;
        }
    }

    let default_max = if depth > 0 {
        DEFAULT_NESTED_MAX_COLUMNS
    } else {
        DEFAULT_MAX_COLUMNS
    };
    let max = persisted
        .max_column_count
        .unwrap_or(default_max)
        .max(columns.len())
        .max(1);
    let min = persisted.min_column_count.unwrap_or(1).min(max);
    Ok(Row {
        id,
        min_column_count: min,
        max_column_count: max,
        columns,
    })
}

fn column_from_persisted(persisted: PersistedColumn, depth: usize) -> Result<Column, DocumentError> {
    let id = parse_id(&persisted.id).unwrap_or_else(ids::next_id);
    let column_type = match persisted.column_type.as_deref().map(ColumnType::from_code) {
        Some(Some(ty)) => ty,
        other => {
            warn!(column = %id, raw = ?persisted.column_type, parsed = ?other, "unknown column type, treating as Empty");
            ColumnType::Empty
        }
    };
    let text = persisted.content.as_ref().map(value_text).unwrap_or_default();

    let kind = match column_type {
        ColumnType::Label => ColumnKind::Label { content: text },
        ColumnType::Text => ColumnKind::Text {
            content: text,
            placeholder: persisted.placeholder,
        },
        ColumnType::LongText => ColumnKind::LongText {
            content: text,
            placeholder: persisted.placeholder,
        },
        ColumnType::Tag => ColumnKind::Tag {
            tag_id: persisted.tag_id,
            value: persisted.content.as_ref().and_then(parse_u64),
        },
        ColumnType::List | ColumnType::Table => {
            if depth + 1 > MAX_NESTING_DEPTH {
                return Err(DocumentError::TooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            let mut rows = persisted
                .rows
                .unwrap_or_default()
                .into_iter()
                .map(|row| row_from_persisted(row, None, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            rekey_duplicate_rows(&mut rows, &mut HashSet::new());
            if column_type == ColumnType::List {
                rows.iter_mut().for_each(Row::narrow_to_list);
                ColumnKind::List { rows }
            } else {
                ColumnKind::Table { rows }
            }
        }
        ColumnType::Empty => ColumnKind::Empty,
        ColumnType::File => {
            let mut files = persisted.files.unwrap_or_default();
            files.truncate(1);
            ColumnKind::File { files }
        }
        ColumnType::MultipleFiles => ColumnKind::MultipleFiles {
            files: persisted.files.unwrap_or_default(),
        },
    };
    Ok(Column { id, kind })
}

fn rekey_duplicate_rows(rows: &mut [Row], seen: &mut HashSet<Id>) {
    for row in rows {
        if !seen.insert(row.id) {
            let fresh = ids::next_id();
            warn!(duplicate = %row.id, %fresh, "re-keying duplicate row id");
            row.id = fresh;
        }
    }
}

fn parse_id(value: &Value) -> Option<Id> {
    parse_u64(value).map(Id)
}

fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_order_puts_integer_keys_first_numerically() {
        let keys = ["10".to_string(), "9".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(legacy_order(keys.iter()), vec!["9", "10", "a", "b"]);
    }

    #[test]
    fn parse_u64_accepts_numeric_strings_and_floats() {
        assert_eq!(parse_u64(&Value::from("42")), Some(42));
        assert_eq!(parse_u64(&serde_json::json!(1700000000000.0)), Some(1_700_000_000_000));
        assert_eq!(parse_u64(&serde_json::json!(-1)), None);
        assert_eq!(parse_u64(&Value::Null), None);
    }
}
