//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Invalid search interval.
    #[error("Invalid bracket: lower bound {lower} is not below upper bound {upper}")]
    InvalidBracket {
        /// Lower bound of the interval.
        lower: f64,
        /// Upper bound of the interval.
        upper: f64,
    },

    /// A value that must be finite was NaN or infinite.
    #[error("Non-finite value for {name}: {value}")]
    NonFiniteValue {
        /// Name of the offending quantity.
        name: &'static str,
        /// The value itself.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a non-finite value error.
    #[must_use]
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFiniteValue { name, value }
    }
}
