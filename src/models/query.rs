//! Query-related data models.
//!
//! This module defines bind parameters and the raw result shapes produced by
//! statement execution.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// One result row, keyed by the raw driver column name.
pub type Row = serde_json::Map<String, JsonValue>;

/// First-row projection with delimiter-separated column names expanded into
/// nested objects.
pub type NestedRow = serde_json::Map<String, JsonValue>;

/// A positional bind value for a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integer (BIGINT UNSIGNED range)
    UInt(u64),
    Float(f64),
    String(String),
    /// Binary data (base64 encoded when serialized)
    #[serde(serialize_with = "serialize_base64")]
    Bytes(Vec<u8>),
    /// Bound as a MySQL JSON value
    Json(JsonValue),
}

fn serialize_base64<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    STANDARD.encode(bytes).serialize(serializer)
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Json(_) => "json",
        }
    }
}

impl From<JsonValue> for QueryParam {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    // serde_json numbers are always representable as f64
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Self::String(s),
            other @ (JsonValue::Array(_) | JsonValue::Object(_)) => Self::Json(other),
        }
    }
}

impl From<bool> for QueryParam {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for QueryParam {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for QueryParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for QueryParam {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for QueryParam {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for QueryParam {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for QueryParam {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<QueryParam>> From<Option<T>> for QueryParam {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Column metadata exactly as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// MySQL type name (e.g., "BIGINT", "VARCHAR", "JSON")
    pub type_name: String,
    pub ordinal: usize,
}

impl ColumnMetadata {
    /// Create new column metadata.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ordinal,
        }
    }
}

/// Outcome of a single statement execution.
///
/// The variant is decided by the statement kind before the statement is
/// dispatched, so normalization never has to guess at the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecResult {
    Rows {
        rows: Vec<Row>,
        fields: Vec<ColumnMetadata>,
    },
    Mutation {
        affected_rows: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_insert_id: Option<u64>,
    },
}

impl ExecResult {
    /// Build a mutation result. MySQL reports a last insert id of 0 when the
    /// statement generated none.
    pub fn mutation(affected_rows: u64, last_insert_id: u64) -> Self {
        Self::Mutation {
            affected_rows,
            last_insert_id: (last_insert_id != 0).then_some(last_insert_id),
        }
    }

    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows { .. })
    }
}

/// The externally visible shape of a read query. Both collections stay in
/// raw driver form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub fields: Vec<ColumnMetadata>,
}

impl QueryResult {
    /// Get the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<ExecResult> for QueryResult {
    fn from(result: ExecResult) -> Self {
        match result {
            ExecResult::Rows { rows, fields } => Self { rows, fields },
            ExecResult::Mutation { .. } => Self::default(),
        }
    }
}

/// Uniform read access to a raw driver result.
pub trait RawResult {
    fn rows(&self) -> &[Row];
    fn columns(&self) -> &[ColumnMetadata];
    /// `None` for results that carry rows instead of a mutation summary.
    fn affected_rows(&self) -> Option<u64>;
    fn last_insert_id(&self) -> Option<u64> {
        None
    }
}

impl RawResult for ExecResult {
    fn rows(&self) -> &[Row] {
        match self {
            Self::Rows { rows, .. } => rows,
            Self::Mutation { .. } => &[],
        }
    }

    fn columns(&self) -> &[ColumnMetadata] {
        match self {
            Self::Rows { fields, .. } => fields,
            Self::Mutation { .. } => &[],
        }
    }

    fn affected_rows(&self) -> Option<u64> {
        match self {
            Self::Rows { .. } => None,
            Self::Mutation { affected_rows, .. } => Some(*affected_rows),
        }
    }

    fn last_insert_id(&self) -> Option<u64> {
        match self {
            Self::Rows { .. } => None,
            Self::Mutation { last_insert_id, .. } => *last_insert_id,
        }
    }
}

impl RawResult for QueryResult {
    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn columns(&self) -> &[ColumnMetadata] {
        &self.fields
    }

    fn affected_rows(&self) -> Option<u64> {
        None
    }
}
