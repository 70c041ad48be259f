//! Error types for the bcdm library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bcdm operations.
#[derive(Debug, Error)]
pub enum BcdmError {
    /// Mapping or definition file missing before any input was read.
    #[error("Mapping file path not found: {0}")]
    MappingNotFound(PathBuf),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading from or writing to a standard stream.
    #[error("Stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// Error parsing a tab-separated mapping table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Mapping table is structurally unusable (missing column, bad row).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable record identifier in a submission packet.
    #[error("{} is required", .accepted.join(" or "))]
    MissingIdentifier {
        request_id: String,
        accepted: Vec<String>,
    },

    /// All-or-nothing batch rejected because a record was invalid.
    #[error("all-or-nothing: detected invalid record")]
    BatchAborted,
}

/// Result type alias for bcdm operations.
pub type Result<T> = std::result::Result<T, BcdmError>;
