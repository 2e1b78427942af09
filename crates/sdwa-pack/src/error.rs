//! Errors raised while loading a regulatory pack.

use std::path::PathBuf;

use sdwa_core::ValidationError;
use thiserror::Error;

/// Result alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;

/// Failure to read, parse, or accept a regulatory pack.
#[derive(Error, Debug)]
pub enum PackError {
    /// The pack file could not be read.
    #[error("failed to read pack file {path}: {source}")]
    Io {
        /// Path of the pack file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The pack file is not valid YAML for the pack schema.
    #[error("failed to parse pack YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A domain primitive inside the pack failed validation.
    #[error("invalid pack entry: {0}")]
    Entry(#[from] ValidationError),

    /// A threshold override names a parameter with no limit entry.
    #[error("threshold override for unregulated parameter {0:?}")]
    UnknownParameter(String),

    /// The assembled pack failed validation.
    #[error("pack validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
