//! Error types for gridline-store.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while persisting or importing grids.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed, unversioned or inconsistent grid document.
    #[error("Invalid grid document: {reason}")]
    ImportFormat { reason: String },

    /// File backend I/O failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while writing a document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a non-file backend.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create an import format error.
    pub fn format(reason: impl Into<String>) -> Self {
        Self::ImportFormat {
            reason: reason.into(),
        }
    }
}
