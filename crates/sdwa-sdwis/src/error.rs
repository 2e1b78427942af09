//! Lookup error types.

use std::path::PathBuf;

/// Errors from [`SystemLookup`](crate::SystemLookup) implementations.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No record exists for the identifier.
    #[error("no system record for {0}")]
    NotFound(String),

    /// The record store could not be read.
    #[error("failed to read system record {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The record is not valid JSON.
    #[error("failed to parse system record {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The record parsed but holds no system entry (e.g. an empty array).
    #[error("system record for {0} is empty")]
    Empty(String),
}
