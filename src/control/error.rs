//! Error types for model construction and propagation.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or stepping a state-space model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A physical parameter or the sample interval is out of range.
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    /// A vector or matrix does not have the dimension the model expects.
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The matrix exponential failed or produced non-finite entries.
    #[error("Numerical instability: {what}")]
    NumericalInstability { what: String },
}

impl ModelError {
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> ModelResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(ModelError::ShapeMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}
