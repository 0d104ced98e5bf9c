//! Error types for k-d tree operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KdError {
    /// A rectangle with a lower bound above its upper bound, or a NaN bound.
    #[error("invalid rectangle: x in [{x_min}, {x_max}], y in [{y_min}, {y_max}]")]
    InvalidRect {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    /// A boundary tolerance that is negative, NaN or infinite.
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KdError>;
