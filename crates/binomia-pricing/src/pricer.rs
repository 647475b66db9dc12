//! Pricing models behind a common interface.
//!
//! [`OptionPricer`] is the seam the implied volatility solver works against:
//! anything that maps [`PricingParams`] to a price can be inverted for
//! volatility.

use binomia_config::{LatticeConfig, Validate};

use crate::analytic::black_scholes_price;
use crate::error::PricingResult;
use crate::lattice::BinomialEngine;
use crate::types::{ExerciseStyle, OptionKind, PricingParams};

/// A model that prices one option contract from market parameters.
pub trait OptionPricer: Send + Sync {
    /// Prices the option.
    fn price(&self, params: &PricingParams) -> PricingResult<f64>;

    /// Returns the name of the model.
    fn name(&self) -> &'static str;

    /// Checks the model's own settings, independent of any parameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PricingError::InvalidParameter`] if the model cannot
    /// price anything as configured.
    fn validate(&self) -> PricingResult<()> {
        Ok(())
    }
}

/// European option under the Black-Scholes closed form.
///
/// # Example
///
/// ```rust
/// use binomia_pricing::prelude::*;
///
/// let pricer = BlackScholesPricer::new(OptionKind::Put);
/// let put = pricer
///     .price(&PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5))
///     .unwrap();
/// assert!((put - 0.81).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackScholesPricer {
    kind: OptionKind,
}

impl BlackScholesPricer {
    /// Creates a closed-form pricer.
    #[must_use]
    pub fn new(kind: OptionKind) -> Self {
        Self { kind }
    }

    /// Call or put.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }
}

impl OptionPricer for BlackScholesPricer {
    fn price(&self, params: &PricingParams) -> PricingResult<f64> {
        black_scholes_price(self.kind, params)
    }

    fn name(&self) -> &'static str {
        "Black-Scholes"
    }
}

/// European or American option on a CRR binomial lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialPricer {
    kind: OptionKind,
    exercise: ExerciseStyle,
    engine: BinomialEngine,
}

impl BinomialPricer {
    /// Creates a lattice pricer with `steps` time steps.
    #[must_use]
    pub fn new(kind: OptionKind, exercise: ExerciseStyle, steps: usize) -> Self {
        Self {
            kind,
            exercise,
            engine: BinomialEngine::new(steps),
        }
    }

    /// Creates a lattice pricer using the configured default step count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PricingError::Config`] if the configuration is invalid.
    pub fn from_config(
        kind: OptionKind,
        exercise: ExerciseStyle,
        config: &LatticeConfig,
    ) -> PricingResult<Self> {
        config.validate_or_error()?;
        Ok(Self::new(kind, exercise, config.default_steps))
    }

    /// Builder method to change the step count.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.engine = BinomialEngine::new(steps);
        self
    }

    /// Call or put.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Exercise style.
    #[must_use]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Number of lattice steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.engine.steps()
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &BinomialEngine {
        &self.engine
    }
}

impl OptionPricer for BinomialPricer {
    fn price(&self, params: &PricingParams) -> PricingResult<f64> {
        self.engine
            .price(params, self.kind.into(), self.exercise.into())
    }

    fn name(&self) -> &'static str {
        match self.exercise {
            ExerciseStyle::European => "Binomial (European)",
            ExerciseStyle::American => "Binomial (American)",
        }
    }

    fn validate(&self) -> PricingResult<()> {
        self.engine.validate()
    }
}

/// Prices an option on a CRR lattice with `steps` time steps.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or `steps` is zero.
pub fn price_lattice(
    kind: OptionKind,
    exercise: ExerciseStyle,
    params: &PricingParams,
    steps: usize,
) -> PricingResult<f64> {
    BinomialPricer::new(kind, exercise, steps).price(params)
}

/// Prices a European option with the Black-Scholes closed form.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, or volatility or maturity
/// is zero.
pub fn price_black_scholes(kind: OptionKind, params: &PricingParams) -> PricingResult<f64> {
    BlackScholesPricer::new(kind).price(params)
}

/// Put-call parity residual for European prices.
///
/// ```text
/// gap = (C - P) - (S - K exp(-r t))
/// ```
///
/// Zero for arbitrage-free European prices; lattice prices satisfy it to
/// rounding error since both legs share one tree.
#[must_use]
pub fn put_call_parity_gap(call: f64, put: f64, params: &PricingParams) -> f64 {
    (call - put) - (params.spot - params.strike * params.discount_factor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use approx::assert_relative_eq;

    fn hull() -> PricingParams {
        PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5)
    }

    #[test]
    fn test_pricers_agree_on_hull_example() {
        let params = hull();
        let lattice = BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 100);
        let closed = BlackScholesPricer::new(OptionKind::Put);

        let diff = lattice.price(&params).unwrap() - closed.price(&params).unwrap();
        assert!(diff.abs() < 0.01, "lattice vs closed form: {diff}");
    }

    #[test]
    fn test_free_functions_match_pricers() {
        let params = hull();
        assert_eq!(
            price_lattice(OptionKind::Call, ExerciseStyle::American, &params, 50).unwrap(),
            BinomialPricer::new(OptionKind::Call, ExerciseStyle::American, 50)
                .price(&params)
                .unwrap()
        );
        assert_eq!(
            price_black_scholes(OptionKind::Call, &params).unwrap(),
            BlackScholesPricer::new(OptionKind::Call).price(&params).unwrap()
        );
    }

    #[test]
    fn test_lattice_parity_gap() {
        let params = PricingParams::new(50.0, 53.0, 0.2, 0.3, 5.0);
        let call = price_lattice(OptionKind::Call, ExerciseStyle::European, &params, 30).unwrap();
        let put = price_lattice(OptionKind::Put, ExerciseStyle::European, &params, 30).unwrap();

        assert_relative_eq!(put_call_parity_gap(call, put, &params), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_from_config() {
        let pricer = BinomialPricer::from_config(
            OptionKind::Put,
            ExerciseStyle::American,
            &LatticeConfig::default(),
        )
        .unwrap();
        assert_eq!(pricer.steps(), 100);
        assert_eq!(pricer.with_steps(25).steps(), 25);

        let bad = LatticeConfig::default().with_default_steps(0);
        assert!(matches!(
            BinomialPricer::from_config(OptionKind::Put, ExerciseStyle::American, &bad),
            Err(PricingError::Config(_))
        ));
    }

    #[test]
    fn test_names() {
        assert_eq!(BlackScholesPricer::new(OptionKind::Call).name(), "Black-Scholes");
        assert_eq!(
            BinomialPricer::new(OptionKind::Call, ExerciseStyle::American, 10).name(),
            "Binomial (American)"
        );
    }

    #[test]
    fn test_validate() {
        assert!(BlackScholesPricer::new(OptionKind::Call).validate().is_ok());
        assert!(BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 30)
            .validate()
            .is_ok());
        assert!(matches!(
            BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 0).validate(),
            Err(PricingError::InvalidParameter { name: "steps", .. })
        ));
    }

    #[test]
    fn test_pricers_are_object_safe() {
        let pricers: Vec<Box<dyn OptionPricer>> = vec![
            Box::new(BlackScholesPricer::new(OptionKind::Call)),
            Box::new(BinomialPricer::new(OptionKind::Call, ExerciseStyle::European, 200)),
        ];
        let prices: Vec<f64> = pricers.iter().map(|p| p.price(&hull()).unwrap()).collect();
        assert!((prices[0] - prices[1]).abs() < 0.01);
    }
}
