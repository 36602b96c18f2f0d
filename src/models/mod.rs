//! Data models for the MySQL adapter.
//!
//! This module re-exports all model types used throughout the crate.

pub mod field;
pub mod query;

// Re-export commonly used types
pub use field::{Field, FieldType};
pub use query::{ColumnMetadata, ExecResult, NestedRow, QueryParam, QueryResult, RawResult, Row};
