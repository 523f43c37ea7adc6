//! Error types for loading venue data.
//!
//! Load failures are fatal: `main` logs them and exits before any UI starts.

use std::path::PathBuf;

/// Why a venue dataset could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0} (expected csv, parquet or json)")]
    UnsupportedFormat(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow conversion failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document is valid but not an array of objects.
    #[error("unexpected JSON layout: {0}")]
    JsonLayout(String),

    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    /// A required numeric cell is empty, not a number, or not finite.
    /// `row` is the 1-based data row (header excluded).
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("the file contains no venue records")]
    NoRecords,
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
