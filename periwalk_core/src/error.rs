//! Error types for the random-walk engine.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, WalkError>;

/// Errors raised while building or querying the engine.
///
/// Every variant is raised synchronously before any mutable state exists,
/// so the caller can fix its parameters and retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalkError {
    /// Invalid parameter (extents, counts, step length, non-finite positions)
    #[error("Validation error: {0}")]
    Validation(String),

    /// x/y position sequences disagree in length, or with the particle count
    #[error("Shape mismatch: x has {x_len} values, y has {y_len}, expected {expected}")]
    ShapeMismatch {
        x_len: usize,
        y_len: usize,
        expected: usize,
    },
}

impl WalkError {
    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a shape mismatch error.
    pub fn shape(x_len: usize, y_len: usize, expected: usize) -> Self {
        Self::ShapeMismatch { x_len, y_len, expected }
    }
}
