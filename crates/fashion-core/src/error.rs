//! Error types for the AI Fashion state layer.

use thiserror::Error;

/// A shared error type for the state layer.
///
/// Store actions themselves never surface these: storage adapters return
/// them and the store logs and absorbs them. They are public so adapters,
/// configuration loading and the application context can propagate them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FashionError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable medium refused or failed the operation
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Storage key that the adapter cannot address
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON"
        message: String,
    },

    /// Persisted record was written by a different schema version
    #[error("Version mismatch for '{key}': stored {found}, expected {expected}")]
    VersionMismatch {
        key: String,
        found: u32,
        expected: u32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FashionError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a version mismatch
    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, Self::VersionMismatch { .. })
    }

    /// Check if this is an invalid key error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true when the error means "stored data cannot be used".
    ///
    /// Covers malformed blobs and schema version mismatches. Callers treat
    /// these exactly like a missing record.
    pub fn is_unusable_data(&self) -> bool {
        self.is_serialization() || self.is_version_mismatch()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FashionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FashionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FashionError>`.
pub type Result<T> = std::result::Result<T, FashionError>;
