//! Cache error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors that can occur when reading or writing the flag cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache from {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to write cache to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("failed to parse cache from {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to serialize cache: {reason}")]
    Serialize { reason: String },

    #[error("cache schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}
