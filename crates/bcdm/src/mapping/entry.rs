//! Core types loaded from the mapping tables.

use serde::{Deserialize, Serialize};

/// Declared datatype of a BCDM field, from the `data_type` column of the
/// definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Free text. Also the fallback for unrecognized datatype strings.
    String,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Calendar dates, optionally with a time component.
    Date,
    /// Exactly one character.
    Char,
    /// Latitude/longitude pair, comma-separated.
    GeoPoint,
    /// Comma-separated list of values.
    Array,
    /// Comma-separated list of strings.
    StringArray,
    /// Embedded JSON document.
    Json,
}

impl DataType {
    /// Parse a `data_type` column value. Unrecognized strings load as
    /// [`DataType::String`] so that a schema typo never rejects data the
    /// pipeline would otherwise accept.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "int" | "integer" => DataType::Integer,
            "float" | "number" => DataType::Float,
            "string:date" | "date" => DataType::Date,
            "char" => DataType::Char,
            "geopoint" => DataType::GeoPoint,
            "array" => DataType::Array,
            "array of string" => DataType::StringArray,
            "json" => DataType::Json,
            _ => DataType::String,
        }
    }
}

/// A (table, field) pair identifying where a value is written.
///
/// Neither part is ever the empty string; the loaders reject rows that
/// would produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub table: String,
    pub field: String,
}

impl Destination {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.field)
    }
}

/// One row of the conversion mapping: a canonical BCDM field and its
/// destination in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub canonical_field: String,
    pub destination: Destination,
    /// True when the source path had more than two dot segments and went
    /// through the foreign-key decomposition.
    pub is_foreign_key: bool,
}

/// One row of the definition table: datatype and format for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub field: String,
    pub data_type: DataType,
    /// Format spec; `"default"` means no format constraint.
    pub format: String,
}
