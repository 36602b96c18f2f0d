//! Result normalization.
//!
//! Turns raw driver results into the shapes framework callers consume:
//! affected-row counts, row sets, canonical [`Field`] lists and nested
//! first-row projections. All functions accept any [`RawResult`], so they
//! work on both [`ExecResult`](crate::models::ExecResult) and
//! [`QueryResult`](crate::models::QueryResult).

pub mod naming;
pub mod projection;

pub use naming::to_camel_case;
pub use projection::{DEFAULT_PATH_DELIMITER, get_first_row, get_first_row_with};

use crate::models::{Field, FieldType, RawResult, Row};

/// Affected-row count reported by the server. Row-returning results report 0.
pub fn get_affect_rows<R: RawResult + ?Sized>(result: &R) -> u64 {
    result.affected_rows().unwrap_or(0)
}

/// Raw rows, unchanged.
pub fn get_row_set<R: RawResult + ?Sized>(result: &R) -> &[Row] {
    result.rows()
}

/// One text-typed [`Field`] per column, in column order, named in camelCase.
pub fn get_fields<R: RawResult + ?Sized>(result: &R) -> Vec<Field> {
    result
        .columns()
        .iter()
        .map(|col| Field::new(to_camel_case(&col.name), FieldType::Text))
        .collect()
}

/// Id generated by an INSERT, if the statement produced one.
pub fn get_last_insert_id<R: RawResult + ?Sized>(result: &R) -> Option<u64> {
    result.last_insert_id()
}
