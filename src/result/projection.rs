//! First-row projection into nested objects.
//!
//! Column names act as paths: `profile.city` is written to
//! `{"profile": {"city": ...}}`. Paths are the lowercased raw column names,
//! not their camelCase forms.

use crate::models::{NestedRow, RawResult};
use serde_json::Value as JsonValue;

/// Path delimiter used by [`get_first_row`].
pub const DEFAULT_PATH_DELIMITER: char = '.';

/// Project the first row of `result` into a nested object, splitting column
/// names on [`DEFAULT_PATH_DELIMITER`].
///
/// Returns `None` when the result has no rows, so callers can tell "no data"
/// apart from a row without columns.
pub fn get_first_row<R: RawResult + ?Sized>(result: &R) -> Option<NestedRow> {
    get_first_row_with(result, DEFAULT_PATH_DELIMITER)
}

/// Same as [`get_first_row`] with a caller-chosen path delimiter.
///
/// Columns are visited in metadata order. Segments before the last one name
/// nested objects, created on first use and shared by later columns with the
/// same prefix. If an earlier column left a non-object value where an object
/// is needed, the object replaces it. A column missing from the row projects
/// as `null`.
pub fn get_first_row_with<R: RawResult + ?Sized>(result: &R, delimiter: char) -> Option<NestedRow> {
    let row = result.rows().first()?;
    let mut out = NestedRow::new();

    for column in result.columns() {
        let value = row.get(&column.name).cloned().unwrap_or(JsonValue::Null);
        let path = column.name.to_lowercase();
        insert_path(&mut out, &path, delimiter, value);
    }

    Some(out)
}

fn insert_path(target: &mut NestedRow, path: &str, delimiter: char, value: JsonValue) {
    let mut segments: Vec<&str> = path.split(delimiter).collect();
    // split always yields at least one segment
    let leaf = segments.pop().unwrap_or_default();

    let mut node = target;
    for segment in segments {
        let slot = node
            .entry(segment.to_string())
            .or_insert_with(|| JsonValue::Object(NestedRow::new()));
        if !slot.is_object() {
            *slot = JsonValue::Object(NestedRow::new());
        }
        let JsonValue::Object(map) = slot else {
            return;
        };
        node = map;
    }

    node.insert(leaf.to_string(), value);
}
