//! Error types for option pricing.

use thiserror::Error;

use binomia_config::ConfigError;
use binomia_math::MathError;

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur during option pricing.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A pricing input is outside its domain (e.g. negative spot).
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What the parameter must satisfy.
        reason: &'static str,
    },

    /// The closed form is undefined for these inputs (zero volatility or maturity).
    #[error("numerical domain error: {0}")]
    NumericalDomain(String),

    /// Error raised by a numerical primitive.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Invalid solver or lattice configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PricingError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Creates a numerical domain error.
    pub fn numerical_domain(msg: impl Into<String>) -> Self {
        Self::NumericalDomain(msg.into())
    }
}
