//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring instance state
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Bundle version is not supported by this version
    #[error("Unsupported bundle version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A state slot exists but does not hold a known state
    #[error("Saved state under '{key}' is corrupt")]
    CorruptState { key: String },
}
