//! Error types shared by the gridline crates.

use thiserror::Error;

/// Errors raised by grid computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A unit tag outside the closed `percent` / `absolute` set.
    #[error("Unrecognized unit tag: {tag:?}")]
    InvalidUnit { tag: String },

    /// The scaler was given a reference rectangle it cannot divide by.
    #[error("Reference size must be positive, got {width} x {height}")]
    InvalidReferenceSize { width: f64, height: f64 },

    /// A configuration that violates the grid invariants.
    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },
}

impl GridError {
    /// Create an invalid grid error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
