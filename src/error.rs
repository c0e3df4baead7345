use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset resolution
// ---------------------------------------------------------------------------

/// The dataset could not be located or downloaded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no cache directory available on this platform")]
    NoCacheDir,

    #[error("invalid dataset URL (must start with http:// or https://): {0}")]
    InvalidUrl(String),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("downloaded dataset from {0} is empty")]
    EmptyDownload(String),

    #[error("failed to write dataset cache at {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Table loading
// ---------------------------------------------------------------------------

/// The tabular file could not be turned into a [`Table`](crate::data::model::Table).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("{0} has no header row")]
    MissingHeader(PathBuf),

    #[error("CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// The loaded table does not have the shape the analyses need.
#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("row {row}: column '{column}' has invalid value {value}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}
