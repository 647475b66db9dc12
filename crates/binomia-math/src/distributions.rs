//! Standard normal distribution helpers.
//!
//! Thin wrappers around [`statrs`] so pricing code does not construct a
//! distribution object at every call site.

use std::sync::OnceLock;

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

fn standard_normal() -> &'static Normal {
    static STANDARD_NORMAL: OnceLock<Normal> = OnceLock::new();
    STANDARD_NORMAL.get_or_init(Normal::standard)
}

/// Cumulative distribution function of the standard normal, `N(x)`.
///
/// # Example
///
/// ```rust
/// use binomia_math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    standard_normal().cdf(x)
}

/// Probability density function of the standard normal, `n(x)`.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    standard_normal().pdf(x)
}
