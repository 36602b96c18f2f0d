//! Framework-facing field descriptors.

use serde::{Deserialize, Serialize};

/// Semantic type tag attached to a [`Field`].
///
/// The adapter does not introspect column types when normalizing fields,
/// so every field it produces carries [`FieldType::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Decimal,
    Float,
    Boolean,
    Binary,
    Json,
    DateTime,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Binary => "binary",
            Self::Json => "json",
            Self::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A result column as seen by framework callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// camelCase form of the driver column name
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Create a field with the generic text tag.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_defaults_to_text() {
        assert_eq!(FieldType::default(), FieldType::Text);
        assert_eq!(Field::text("userId").field_type, FieldType::Text);
    }

    #[test]
    fn test_field_serializes_type_key() {
        let json = serde_json::to_value(Field::text("firstName")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "firstName", "type": "text" }));
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Text.to_string(), "text");
        assert_eq!(FieldType::DateTime.to_string(), "datetime");
    }
}
