//! Implied volatility by bounded least squares.
//!
//! The solver finds the volatility `sigma >= 0` minimizing
//!
//! ```text
//! (model_price(sigma) - target)^2
//! ```
//!
//! for any model that is roughly monotone in volatility. It brackets a
//! minimum starting from the configured initial guess (0.2 by default) and
//! refines it with Brent's method or golden-section search.
//!
//! A solve that does not meet its tolerance is not an error: the best point
//! found is returned with `converged == false` and a warning is logged.
//!
//! # Example
//!
//! ```rust
//! use binomia_pricing::prelude::*;
//!
//! let params = PricingParams::new(50.0, 53.0, 0.2, 0.3, 5.0);
//! let pricer = BlackScholesPricer::new(OptionKind::Call);
//! let target = pricer.price(&params).unwrap();
//!
//! let result = ImpliedVolSolver::default()
//!     .solve(&pricer, &params, target)
//!     .unwrap();
//! assert!(result.converged);
//! assert!((result.volatility - 0.3).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use binomia_config::{ImpliedVolConfig, MinimizerMethod, Validate};
use binomia_math::optimization::{
    minimize_bounded_with, BrentMinimizer, GoldenSectionMinimizer, MinimizerResult,
};

use crate::error::{PricingError, PricingResult};
use crate::pricer::OptionPricer;
use crate::types::PricingParams;

/// Outcome of an implied volatility solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolResult {
    /// Best volatility found.
    pub volatility: f64,
    /// Whether the minimizer met its tolerance.
    pub converged: bool,
    /// Minimizer iterations used.
    pub iterations: u32,
    /// Squared pricing error at `volatility`.
    pub objective_value: f64,
}

impl ImpliedVolResult {
    /// Absolute pricing error at the solution.
    #[must_use]
    pub fn pricing_error(&self) -> f64 {
        self.objective_value.sqrt()
    }
}

impl From<MinimizerResult> for ImpliedVolResult {
    fn from(result: MinimizerResult) -> Self {
        Self {
            volatility: result.x,
            converged: result.converged,
            iterations: result.iterations,
            objective_value: result.objective_value,
        }
    }
}

/// Implied volatility solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Config`] if the configuration is invalid.
    pub fn with_config(config: ImpliedVolConfig) -> PricingResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for the volatility at which `pricer` reproduces `target`.
    ///
    /// Every field of `params` except volatility is held fixed.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if `pricer` or the fixed
    /// fields of `params` are invalid, or `target` is not finite. Pricer
    /// failures at individual trial volatilities are not errors.
    pub fn solve<P>(
        &self,
        pricer: &P,
        params: &PricingParams,
        target: f64,
    ) -> PricingResult<ImpliedVolResult>
    where
        P: OptionPricer + ?Sized,
    {
        // Either failure would make every trial price an error
        pricer.validate()?;
        params.with_volatility(self.config.initial_guess).validate()?;

        debug!(pricer = pricer.name(), target, "solving for implied volatility");
        self.solve_with(|sigma| pricer.price(&params.with_volatility(sigma)), target)
    }

    /// Solves for the volatility at which `price_fn` returns `target`.
    ///
    /// A trial volatility at which `price_fn` fails (the closed form at
    /// `sigma = 0`, for instance) scores an infinite objective, steering the
    /// search away from it. If it fails everywhere the search visits, the
    /// result has `converged == false` and an infinite objective.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not finite or the minimizer rejects its
    /// inputs.
    pub fn solve_with<F>(&self, price_fn: F, target: f64) -> PricingResult<ImpliedVolResult>
    where
        F: Fn(f64) -> PricingResult<f64>,
    {
        if !target.is_finite() {
            return Err(PricingError::invalid_parameter(
                "target_price",
                target,
                "must be finite",
            ));
        }

        let objective = |sigma: f64| match price_fn(sigma) {
            Ok(price) => (price - target).powi(2),
            Err(_) => f64::INFINITY,
        };

        let bounds = self.config.bounds();
        let optimization = self.config.optimization();
        let guess = self.config.initial_guess;

        let mut result: ImpliedVolResult = match self.config.method {
            MinimizerMethod::Brent => {
                minimize_bounded_with(&BrentMinimizer, objective, guess, bounds, &optimization)?
            }
            MinimizerMethod::GoldenSection => minimize_bounded_with(
                &GoldenSectionMinimizer,
                objective,
                guess,
                bounds,
                &optimization,
            )?,
        }
        .into();
        if !result.objective_value.is_finite() {
            result.converged = false;
        }

        if result.converged {
            debug!(
                volatility = result.volatility,
                iterations = result.iterations,
                objective = result.objective_value,
                "implied volatility solved"
            );
        } else {
            warn!(
                volatility = result.volatility,
                iterations = result.iterations,
                objective = result.objective_value,
                target,
                "implied volatility solve did not converge"
            );
        }

        Ok(result)
    }

    /// Solves one implied volatility per target price.
    ///
    /// Targets are independent; with the `parallel` feature they are solved
    /// on the rayon thread pool. Results are in the order of `targets`.
    #[cfg(feature = "parallel")]
    pub fn solve_batch<P>(
        &self,
        pricer: &P,
        params: &PricingParams,
        targets: &[f64],
    ) -> Vec<PricingResult<ImpliedVolResult>>
    where
        P: OptionPricer + ?Sized,
    {
        use rayon::prelude::*;

        targets
            .par_iter()
            .map(|&target| self.solve(pricer, params, target))
            .collect()
    }

    /// Solves one implied volatility per target price.
    ///
    /// Results are in the order of `targets`.
    #[cfg(not(feature = "parallel"))]
    pub fn solve_batch<P>(
        &self,
        pricer: &P,
        params: &PricingParams,
        targets: &[f64],
    ) -> Vec<PricingResult<ImpliedVolResult>>
    where
        P: OptionPricer + ?Sized,
    {
        targets
            .iter()
            .map(|&target| self.solve(pricer, params, target))
            .collect()
    }
}

/// Implied volatility with the default solver settings.
///
/// # Errors
///
/// See [`ImpliedVolSolver::solve`].
pub fn implied_volatility<P>(
    pricer: &P,
    params: &PricingParams,
    target: f64,
) -> PricingResult<ImpliedVolResult>
where
    P: OptionPricer + ?Sized,
{
    ImpliedVolSolver::default().solve(pricer, params, target)
}

/// Implied volatilities for a batch of target prices with the default solver
/// settings.
pub fn implied_volatilities<P>(
    pricer: &P,
    params: &PricingParams,
    targets: &[f64],
) -> Vec<PricingResult<ImpliedVolResult>>
where
    P: OptionPricer + ?Sized,
{
    ImpliedVolSolver::default().solve_batch(pricer, params, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricer::{BinomialPricer, BlackScholesPricer};
    use crate::types::{ExerciseStyle, OptionKind};
    use approx::assert_relative_eq;

    fn params() -> PricingParams {
        PricingParams::new(50.0, 53.0, 0.2, 0.3, 5.0)
    }

    #[test]
    fn test_round_trip_closed_form_call() {
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        let target = pricer.price(&params()).unwrap();

        let result = implied_volatility(&pricer, &params(), target).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.volatility, 0.3, epsilon = 1e-6);
        assert!(result.objective_value < 1e-12);
    }

    #[test]
    fn test_round_trip_lattice_put() {
        let pricer = BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 30);
        let target = pricer.price(&params()).unwrap();

        let result = implied_volatility(&pricer, &params(), target).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.volatility, 0.3, epsilon = 1e-4);
    }

    #[test]
    fn test_golden_section_method() {
        let config = ImpliedVolConfig::default().with_method(MinimizerMethod::GoldenSection);
        let solver = ImpliedVolSolver::with_config(config).unwrap();
        let pricer = BlackScholesPricer::new(OptionKind::Put);
        let target = pricer.price(&params().with_volatility(0.45)).unwrap();

        let result = solver.solve(&pricer, &params(), target).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.volatility, 0.45, epsilon = 1e-5);
    }

    #[test]
    fn test_solve_with_closure() {
        let result = ImpliedVolSolver::new()
            .solve_with(|sigma| Ok(100.0 * sigma), 12.5)
            .unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.volatility, 0.125, epsilon = 1e-7);
    }

    #[test]
    fn test_pricer_errors_are_avoided() {
        // Fails at sigma = 0, like the closed form
        let price_fn = |sigma: f64| {
            if sigma == 0.0 {
                Err(PricingError::numerical_domain("zero volatility"))
            } else {
                Ok(sigma)
            }
        };
        let result = ImpliedVolSolver::new().solve_with(price_fn, 0.01).unwrap();

        assert!(result.volatility > 0.0);
        assert!(result.objective_value.is_finite());
    }

    #[test]
    fn test_invalid_params_rejected_before_search() {
        let pricer = BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 30);
        let bad_spot = PricingParams::new(-50.0, 53.0, 0.2, 0.3, 5.0);

        assert!(matches!(
            implied_volatility(&pricer, &bad_spot, 5.0),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
    }

    #[test]
    fn test_zero_step_pricer_rejected_before_search() {
        let pricer = BinomialPricer::new(OptionKind::Put, ExerciseStyle::European, 0);

        assert!(matches!(
            implied_volatility(&pricer, &params(), 5.0),
            Err(PricingError::InvalidParameter { name: "steps", .. })
        ));
    }

    #[test]
    fn test_failing_everywhere_is_not_converged() {
        let result = ImpliedVolSolver::new()
            .solve_with(|_| Err(PricingError::numerical_domain("always fails")), 5.0)
            .unwrap();

        assert!(!result.converged);
        assert!(result.objective_value.is_infinite());
    }

    #[test]
    fn test_caller_volatility_is_ignored() {
        // Only the fixed fields are checked; the solver supplies volatility
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        let target = pricer.price(&params()).unwrap();
        let stale = params().with_volatility(-1.0);

        let result = implied_volatility(&pricer, &stale, target).unwrap();
        assert_relative_eq!(result.volatility, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_unreachable_target_pins_to_lower_bound() {
        // The call is worth at least S - K exp(-r t) ~ 30.5 at any volatility
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        let result = implied_volatility(&pricer, &params(), 10.0).unwrap();

        // The price is flat at its lower limit for small volatilities
        let floor = 50.0 - 53.0 * (-1.0_f64).exp();
        assert!(result.volatility > 0.0);
        assert!(result.volatility < 0.1);
        assert_relative_eq!(result.pricing_error(), floor - 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iteration_budget_exhausted_is_not_an_error() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("binomia_pricing=debug")
            .with_test_writer()
            .try_init();

        let config = ImpliedVolConfig::default().with_max_iterations(2);
        let solver = ImpliedVolSolver::with_config(config).unwrap();
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        let target = pricer.price(&params().with_volatility(0.37)).unwrap();

        let result = solver.solve(&pricer, &params(), target).unwrap();

        assert!(!result.converged);
        assert!(result.iterations <= 2);
        assert!(result.volatility > 0.0);
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        assert!(matches!(
            implied_volatility(&pricer, &params(), f64::NAN),
            Err(PricingError::InvalidParameter { name: "target_price", .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ImpliedVolConfig::default().with_tolerance(-1.0);
        assert!(matches!(
            ImpliedVolSolver::with_config(config),
            Err(PricingError::Config(_))
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let pricer = BlackScholesPricer::new(OptionKind::Call);
        let vols = [0.15, 0.3, 0.6];
        let targets: Vec<f64> = vols
            .iter()
            .map(|&v| pricer.price(&params().with_volatility(v)).unwrap())
            .collect();

        let results = implied_volatilities(&pricer, &params(), &targets);

        assert_eq!(results.len(), vols.len());
        for (result, expected) in results.into_iter().zip(vols) {
            assert_relative_eq!(result.unwrap().volatility, expected, epsilon = 1e-6);
        }
    }
}
