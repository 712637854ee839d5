//! Error types for the DataSense library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for DataSense operations.
#[derive(Debug, Error)]
pub enum DataSenseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A workbook could not be opened or read.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The source has no columns or no data rows.
    #[error("Empty source: {0}")]
    EmptySource(String),

    /// No table with this ID in the workspace.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Saving or loading a table failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for DataSense operations.
pub type Result<T> = std::result::Result<T, DataSenseError>;
