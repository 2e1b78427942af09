//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation errors carry the offending input verbatim.
//! - Nothing in the detection pipeline itself returns these errors: bad
//!   samples degrade to "fewer findings". Errors surface only when loading
//!   configuration or parsing identifiers at the boundary.

use thiserror::Error;

/// Top-level error type for the workspace.
#[derive(Error, Debug)]
pub enum SdwaError {
    /// A domain primitive failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SdwaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Validation failure for a domain primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// PWSID does not match the two-letter + seven-digit format.
    #[error("invalid PWSID {0:?}: expected two letters followed by seven digits")]
    InvalidPwsid(String),

    /// Parameter name is empty after trimming.
    #[error("parameter name must not be empty")]
    EmptyParameter,

    /// Unrecognized notification tier.
    #[error("unknown notification tier: {0:?}")]
    InvalidTier(String),

    /// Unrecognized severity level.
    #[error("unknown severity level: {0:?}")]
    InvalidSeverity(String),

    /// Deadline string is not `<count> <hours|days|years>`.
    #[error("invalid notification deadline {0:?}: expected e.g. \"24 hours\" or \"30 days\"")]
    InvalidDeadline(String),
}
