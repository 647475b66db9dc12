//! Pricing configuration types.
//!
//! This module defines configuration structures for lattice pricing and
//! implied volatility solving.

use serde::{Deserialize, Serialize};

use binomia_math::optimization::OptimizationConfig;

use crate::error::{Validate, ValidationError};

// =============================================================================
// LATTICE CONFIGURATION
// =============================================================================

/// Upper limit on lattice depth accepted from configuration.
pub const MAX_LATTICE_STEPS: usize = 100_000;

/// Lattice pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Number of time steps used when the caller does not specify one.
    #[serde(default = "default_steps")]
    pub default_steps: usize,
}

fn default_steps() -> usize {
    100
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            default_steps: default_steps(),
        }
    }
}

impl LatticeConfig {
    /// Builder method to set the default step count.
    #[must_use]
    pub fn with_default_steps(mut self, steps: usize) -> Self {
        self.default_steps = steps;
        self
    }
}

impl Validate for LatticeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.default_steps == 0 || self.default_steps > MAX_LATTICE_STEPS {
            errors.push(ValidationError::with_rule(
                "default_steps",
                format!(
                    "Step count {} must be between 1 and {}",
                    self.default_steps, MAX_LATTICE_STEPS
                ),
                "valid_steps",
            ));
        }

        errors
    }
}

// =============================================================================
// IMPLIED VOLATILITY CONFIGURATION
// =============================================================================

/// Minimizer used to refine the implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimizerMethod {
    /// Brent's method (parabolic interpolation with golden-section fallback).
    #[default]
    Brent,
    /// Plain golden-section search.
    GoldenSection,
}

/// Implied volatility solver configuration.
///
/// The solver minimizes the squared pricing error over
/// `[lower_bound, upper_bound]`, starting at `initial_guess`. A missing
/// `upper_bound` means the search is only bounded below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolConfig {
    /// Starting volatility.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Smallest volatility the solver may try.
    #[serde(default)]
    pub lower_bound: f64,

    /// Largest volatility the solver may try, unbounded when absent.
    #[serde(default)]
    pub upper_bound: Option<f64>,

    /// First step of the bracket search.
    #[serde(default = "default_initial_step")]
    pub initial_step: f64,

    /// Relative tolerance on the volatility.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum minimizer iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Refinement method.
    #[serde(default)]
    pub method: MinimizerMethod,
}

fn default_initial_guess() -> f64 {
    0.2
}

fn default_initial_step() -> f64 {
    0.1
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    200
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            lower_bound: 0.0,
            upper_bound: None,
            initial_step: default_initial_step(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            method: MinimizerMethod::default(),
        }
    }
}

impl ImpliedVolConfig {
    /// Builder method to set the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Builder method to set the search bounds.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Builder method to set the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method to set the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method to set the refinement method.
    #[must_use]
    pub fn with_method(mut self, method: MinimizerMethod) -> Self {
        self.method = method;
        self
    }

    /// Search bounds as a pair, with `f64::INFINITY` for a missing upper bound.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound.unwrap_or(f64::INFINITY))
    }

    /// Minimizer settings derived from this configuration.
    pub fn optimization(&self) -> OptimizationConfig {
        OptimizationConfig::new(self.tolerance, self.max_iterations)
            .with_initial_step(self.initial_step)
    }
}

impl Validate for ImpliedVolConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.lower_bound.is_finite() || self.lower_bound < 0.0 {
            errors.push(ValidationError::with_rule(
                "lower_bound",
                "Lower bound must be a finite, non-negative volatility",
                "non_negative_volatility",
            ));
        }

        if let Some(upper) = self.upper_bound {
            if !(upper > self.lower_bound) {
                errors.push(ValidationError::with_rule(
                    "upper_bound",
                    format!(
                        "Upper bound {} must exceed lower bound {}",
                        upper, self.lower_bound
                    ),
                    "ordered_bounds",
                ));
            }
        }

        let (lower, upper) = self.bounds();
        if !self.initial_guess.is_finite()
            || self.initial_guess < lower
            || self.initial_guess > upper
        {
            errors.push(ValidationError::with_rule(
                "initial_guess",
                format!(
                    "Initial guess {} must lie within the search bounds",
                    self.initial_guess
                ),
                "guess_within_bounds",
            ));
        }

        if !(self.initial_step > 0.0) || !self.initial_step.is_finite() {
            errors.push(ValidationError::with_rule(
                "initial_step",
                "Initial step must be positive and finite",
                "positive_step",
            ));
        }

        if !(self.tolerance > 0.0) || self.tolerance > 1e-4 {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Solver tolerance must be between 0 and 1e-4",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }

        errors
    }
}
