//! Error types for accessor operations and store I/O.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors returned by accessor operations and the backing stores.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A strict read addressed a path with no value, or a nested descent
    /// had segments left below a non-section value.
    #[error("path not found: {path}")]
    PathNotFound { path: String },
    /// The stored value's runtime tag differs from the requested type.
    #[error("type mismatch at {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        actual: ValueKind,
    },
    /// An asserted value was absent, mistyped, or unequal.
    #[error("invalid value at {path}")]
    InvalidValue { path: String },
    /// Reading the durable store failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing the durable store contents failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// Encoding the tree for persistence failed.
    #[error("failed to encode config: {0}")]
    EncodeFailed(#[from] serde_json::Error),
    /// Generic store-level failure.
    #[error("invalid config: {0}")]
    Invalid(String),
}
