//! Backward-induction pricing on a CRR tree.

use tracing::{debug, trace, warn};

use crate::error::{PricingError, PricingResult};
use crate::lattice::{CrrParameters, Lattice, NodeKey};
use crate::payoff::Payoff;
use crate::types::PricingParams;
use crate::valuation::{NodeContext, ValuationRule};

/// A fully valued tree together with the parameters that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedLattice {
    /// Option value at every node.
    pub lattice: Lattice,
    /// Tree parameters.
    pub parameters: CrrParameters,
}

impl ValuedLattice {
    /// Option price, the value at the root.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.lattice.root()
    }
}

/// Cox-Ross-Rubinstein binomial pricing engine.
///
/// The engine is stateless apart from its step count; every call owns its
/// lattice.
///
/// # Example
///
/// ```rust
/// use binomia_pricing::prelude::*;
///
/// let engine = BinomialEngine::new(100);
/// let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);
///
/// let put = engine
///     .price(&params, Payoff::Put, ValuationRule::European)
///     .unwrap();
/// assert!((put - 0.81).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialEngine {
    steps: usize,
}

impl BinomialEngine {
    /// Creates an engine with `steps` time steps.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Number of time steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Prices an option.
    ///
    /// With zero volatility the underlying follows its forward deterministically,
    /// so the tree is skipped and the result is
    /// `exp(-r t) * payoff(S exp(r t), K)` for any step count.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if the parameters are outside
    /// their domain or the step count is zero.
    pub fn price(
        &self,
        params: &PricingParams,
        payoff: Payoff,
        rule: ValuationRule,
    ) -> PricingResult<f64> {
        self.check(params)?;

        if params.volatility == 0.0 {
            let price = params.discount_factor() * payoff.intrinsic(params.forward(), params.strike);
            trace!(?payoff, price, "zero volatility, pricing off the forward");
            return Ok(price);
        }

        Ok(self.induct(params, payoff, rule).price())
    }

    /// Builds and values the full tree, retaining every node.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] for invalid inputs, including
    /// zero volatility, where no tree exists.
    pub fn build_lattice(
        &self,
        params: &PricingParams,
        payoff: Payoff,
        rule: ValuationRule,
    ) -> PricingResult<ValuedLattice> {
        self.check(params)?;

        if params.volatility == 0.0 {
            return Err(PricingError::invalid_parameter(
                "volatility",
                params.volatility,
                "must be positive to build a lattice",
            ));
        }

        Ok(self.induct(params, payoff, rule))
    }

    /// Checks the engine's own settings.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if the step count is zero.
    pub fn validate(&self) -> PricingResult<()> {
        if self.steps == 0 {
            return Err(PricingError::invalid_parameter(
                "steps",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    fn check(&self, params: &PricingParams) -> PricingResult<()> {
        params.validate()?;
        self.validate()
    }

    fn induct(&self, params: &PricingParams, payoff: Payoff, rule: ValuationRule) -> ValuedLattice {
        let n = self.steps;
        let crr = CrrParameters::new(params, n);

        debug!(
            steps = n,
            up = crr.up,
            down = crr.down,
            prob_up = crr.prob_up,
            "building binomial lattice"
        );
        if !crr.is_arbitrage_free() {
            warn!(
                prob_up = crr.prob_up,
                rate = params.rate,
                volatility = params.volatility,
                steps = n,
                "risk-neutral probability outside [0, 1]; use more steps or a higher volatility"
            );
        }

        let mut lattice = Lattice::new(n);

        // Terminal layer
        for up in 0..=n {
            let key = NodeKey::at(n, up);
            let spot = crr.underlying_at(params.spot, key);
            lattice.set(key, payoff.intrinsic(spot, params.strike));
        }

        // Children at i + 1 are complete before any node at i is visited
        for i in (0..n).rev() {
            for up in 0..=i {
                let key = NodeKey::at(i, up);
                let ctx = NodeContext {
                    key,
                    prob_up: crr.prob_up,
                    prob_down: crr.prob_down,
                    discount: crr.discount,
                    up_value: lattice.get(key.up_child()),
                    down_value: lattice.get(key.down_child()),
                    payoff,
                    strike: params.strike,
                    underlying: crr.underlying_at(params.spot, key),
                };
                lattice.set(key, rule.value(&ctx));
            }
        }

        ValuedLattice {
            lattice,
            parameters: crr,
        }
    }
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self::new(binomia_config::LatticeConfig::default().default_steps)
    }
}
