//! Bounded scalar minimization.
//!
//! This module provides the one-dimensional minimizers used to invert
//! pricing models:
//!
//! - [`bracket_minimum`]: downhill walk from an initial guess that finds an
//!   interval containing a local minimum without leaving the bounds
//! - [`brent_minimize`]: Brent's method (parabolic interpolation with
//!   golden-section fallback) on a bracketed interval
//! - [`golden_section`]: plain golden-section search on a bracketed interval
//! - [`minimize_bounded`]: bracket + Brent, the usual entry point
//!
//! Non-convergence is not an error here. Every minimizer returns its best
//! estimate together with a `converged` flag; callers decide what to do.
//!
//! # Example
//!
//! ```rust
//! use binomia_math::optimization::{minimize_bounded, OptimizationConfig};
//!
//! // Minimize (x - 1.5)^2 on [0, inf) starting from 0.2
//! let f = |x: f64| (x - 1.5).powi(2);
//! let result = minimize_bounded(f, 0.2, (0.0, f64::INFINITY), &OptimizationConfig::default())
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((result.x - 1.5).abs() < 1e-8);
//! ```

mod bracket;
mod brent;
mod golden;

pub use bracket::{bracket_minimum, Bracket};
pub use brent::brent_minimize;
pub use golden::golden_section;

use std::cell::Cell;

use crate::error::{MathError, MathResult};

/// Default relative tolerance on the abscissa.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for a minimizer.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Default first step of the bracket search.
pub const DEFAULT_INITIAL_STEP: f64 = 0.1;

/// Configuration for minimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    /// Relative tolerance on the abscissa.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// First step taken by the bracket search.
    pub initial_step: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_step: DEFAULT_INITIAL_STEP,
        }
    }
}

impl OptimizationConfig {
    /// Creates a new optimization configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the first bracket search step.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }
}

/// Result of a minimization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizerResult {
    /// Abscissa of the best point found.
    pub x: f64,
    /// Objective value at `x`.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Number of objective evaluations.
    pub evaluations: u32,
    /// Whether the tolerance test was met.
    pub converged: bool,
}

/// Trait for bracketed scalar minimizers.
///
/// # Example
///
/// ```rust
/// use binomia_math::optimization::{BrentMinimizer, OptimizationConfig, ScalarMinimizer};
///
/// let minimizer = BrentMinimizer;
/// let f = |x: f64| (x - 2.0).powi(2) + 1.0;
///
/// let result = minimizer
///     .minimize(f, (0.0, 1.0, 5.0), &OptimizationConfig::default())
///     .unwrap();
/// assert!((result.x - 2.0).abs() < 1e-8);
/// ```
pub trait ScalarMinimizer: Send + Sync {
    /// Minimizes `f` on the bracket `(lower, start, upper)`.
    ///
    /// `start` must lie inside `[lower, upper]`.
    fn minimize<F>(
        &self,
        f: F,
        bracket: (f64, f64, f64),
        config: &OptimizationConfig,
    ) -> MathResult<MinimizerResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the minimizer.
    fn name(&self) -> &'static str;
}

/// Brent's method minimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentMinimizer;

impl ScalarMinimizer for BrentMinimizer {
    fn minimize<F>(
        &self,
        f: F,
        bracket: (f64, f64, f64),
        config: &OptimizationConfig,
    ) -> MathResult<MinimizerResult>
    where
        F: Fn(f64) -> f64,
    {
        let (a, x, b) = bracket;
        brent_minimize(f, a, x, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Golden-section minimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldenSectionMinimizer;

impl ScalarMinimizer for GoldenSectionMinimizer {
    fn minimize<F>(
        &self,
        f: F,
        bracket: (f64, f64, f64),
        config: &OptimizationConfig,
    ) -> MathResult<MinimizerResult>
    where
        F: Fn(f64) -> f64,
    {
        let (a, _, b) = bracket;
        golden_section(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Golden section"
    }
}

/// Minimizes `f` over `bounds` starting from `initial_guess`.
///
/// The search first brackets a minimum with [`bracket_minimum`] and then
/// refines it with Brent's method. The upper bound may be `f64::INFINITY`.
///
/// If no bracket is found (the objective keeps decreasing until the expansion
/// budget runs out, or is infinite around the initial guess) the best point
/// seen is returned with `converged == false` and `iterations` set to the
/// number of bracket expansions.
pub fn minimize_bounded<F>(
    f: F,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &OptimizationConfig,
) -> MathResult<MinimizerResult>
where
    F: Fn(f64) -> f64,
{
    minimize_bounded_with(&BrentMinimizer, f, initial_guess, bounds, config)
}

/// Same as [`minimize_bounded`] but with an explicit refinement minimizer.
pub fn minimize_bounded_with<M, F>(
    minimizer: &M,
    f: F,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &OptimizationConfig,
) -> MathResult<MinimizerResult>
where
    M: ScalarMinimizer,
    F: Fn(f64) -> f64,
{
    validate_config(config)?;

    let evaluations = Cell::new(0_u32);
    let counted = |x: f64| {
        evaluations.set(evaluations.get() + 1);
        sanitize(f(x))
    };

    let bracket = bracket_minimum(&counted, initial_guess, bounds, config)?;
    if !bracket.bracketed {
        tracing::debug!(
            x = bracket.mid,
            objective = bracket.f_mid,
            expansions = bracket.expansions,
            "minimum not bracketed inside bounds"
        );
        return Ok(MinimizerResult {
            x: bracket.mid,
            objective_value: bracket.f_mid,
            iterations: bracket.expansions,
            evaluations: evaluations.get(),
            converged: false,
        });
    }

    tracing::trace!(
        minimizer = minimizer.name(),
        lower = bracket.lower,
        mid = bracket.mid,
        upper = bracket.upper,
        "refining bracketed minimum"
    );

    let mut result = minimizer.minimize(
        &counted,
        (bracket.lower, bracket.mid, bracket.upper),
        config,
    )?;
    result.evaluations = evaluations.get();
    Ok(result)
}

pub(crate) fn validate_config(config: &OptimizationConfig) -> MathResult<()> {
    if !(config.tolerance > 0.0) || !config.tolerance.is_finite() {
        return Err(MathError::invalid_input(format!(
            "tolerance must be positive and finite, got {}",
            config.tolerance
        )));
    }
    if config.max_iterations == 0 {
        return Err(MathError::invalid_input("max_iterations must be at least 1"));
    }
    if !(config.initial_step > 0.0) || !config.initial_step.is_finite() {
        return Err(MathError::invalid_input(format!(
            "initial_step must be positive and finite, got {}",
            config.initial_step
        )));
    }
    Ok(())
}

/// NaN objectives are treated as +inf so comparisons stay meaningful.
#[inline]
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        value
    }
}
