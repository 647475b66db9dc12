//! Option and market parameter types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// When the option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// At maturity only.
    #[default]
    European,
    /// At any time up to maturity.
    American,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::European => write!(f, "european"),
            Self::American => write!(f, "american"),
        }
    }
}

/// Immutable inputs shared by every pricing model.
///
/// Rates and maturity are continuously compounded / in years. Volatility is
/// annualised; zero is allowed and handled by the lattice as a deterministic
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Price of the underlying today.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Risk-free rate, may be negative.
    pub rate: f64,
    /// Volatility of the underlying.
    pub volatility: f64,
    /// Time to maturity in years.
    pub maturity: f64,
}

impl PricingParams {
    /// Creates a parameter bundle. No validation is performed here; see
    /// [`PricingParams::validate`].
    #[must_use]
    pub fn new(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
        }
    }

    /// Returns a copy with a different volatility.
    #[must_use]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Discount factor to maturity, `exp(-r t)`.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Deterministic forward price of the underlying, `S exp(r t)`.
    #[must_use]
    pub fn forward(&self) -> f64 {
        self.spot * (self.rate * self.maturity).exp()
    }

    /// Checks that every input lies in its domain.
    ///
    /// Spot, strike and maturity must be positive, volatility non-negative,
    /// and all values finite.
    pub fn validate(&self) -> PricingResult<()> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("maturity", self.maturity)?;

        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                self.rate,
                "must be finite",
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(PricingError::invalid_parameter(
                "volatility",
                self.volatility,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}
