//! Cox-Ross-Rubinstein tree parameters.

use crate::lattice::NodeKey;
use crate::types::PricingParams;

/// Per-step quantities of a CRR tree.
///
/// ```text
/// dt   = t / n
/// u    = exp(sigma * sqrt(dt)),  d = 1 / u
/// p_u  = (exp(r dt) - d) / (u - d),  p_d = 1 - p_u
/// disc = exp(-r dt)
/// ```
///
/// `u * d == 1` makes the tree recombine. The probabilities are only a valid
/// measure when `d < exp(r dt) < u`; see [`CrrParameters::is_arbitrage_free`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrParameters {
    /// Number of time steps.
    pub steps: usize,
    /// Length of one step in years.
    pub dt: f64,
    /// Up factor.
    pub up: f64,
    /// Down factor.
    pub down: f64,
    /// Risk-neutral probability of an up move.
    pub prob_up: f64,
    /// Risk-neutral probability of a down move.
    pub prob_down: f64,
    /// One-step discount factor.
    pub discount: f64,
}

impl CrrParameters {
    /// Computes the tree parameters. Requires `volatility > 0` and `steps >= 1`.
    #[must_use]
    pub fn new(params: &PricingParams, steps: usize) -> Self {
        let dt = params.maturity / steps as f64;
        let up = (params.volatility * dt.sqrt()).exp();
        let down = (-params.volatility * dt.sqrt()).exp();
        let growth = (params.rate * dt).exp();
        let prob_up = (growth - down) / (up - down);

        Self {
            steps,
            dt,
            up,
            down,
            prob_up,
            prob_down: 1.0 - prob_up,
            discount: (-params.rate * dt).exp(),
        }
    }

    /// True when both probabilities lie in `[0, 1]`.
    #[must_use]
    pub fn is_arbitrage_free(&self) -> bool {
        (0.0..=1.0).contains(&self.prob_up) && (0.0..=1.0).contains(&self.prob_down)
    }

    /// Underlying price at `key`: `S * u^up * d^down`.
    ///
    /// Evaluated as `S * u^(up - down)` since `u * d == 1`; the separate
    /// powers overflow to `inf * 0` on deep, high-volatility trees.
    #[must_use]
    pub fn underlying_at(&self, spot: f64, key: NodeKey) -> f64 {
        let net = key.up() as i32 - key.down() as i32;
        spot * self.up.powi(net)
    }
}
