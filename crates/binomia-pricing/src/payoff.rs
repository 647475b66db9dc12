//! Terminal payoffs.

use serde::{Deserialize, Serialize};

use crate::types::OptionKind;

/// Intrinsic value of a vanilla option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payoff {
    /// `max(0, S - K)`
    Call,
    /// `max(0, K - S)`
    Put,
}

impl Payoff {
    /// Value of exercising immediately with the underlying at `spot`.
    #[inline]
    #[must_use]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl From<OptionKind> for Payoff {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => Self::Call,
            OptionKind::Put => Self::Put,
        }
    }
}
