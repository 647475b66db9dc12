//! Golden-section search.

use crate::error::{MathError, MathResult};
use crate::optimization::{sanitize, validate_config, MinimizerResult, OptimizationConfig};

/// 1 / golden ratio.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Golden-section search on `[lower, upper]`.
///
/// Linear convergence (the interval shrinks by 0.618 per iteration) but needs
/// nothing beyond unimodality on the interval. Mostly useful as a reference
/// for [`brent_minimize`](super::brent_minimize).
pub fn golden_section<F>(
    f: F,
    lower: f64,
    upper: f64,
    config: &OptimizationConfig,
) -> MathResult<MinimizerResult>
where
    F: Fn(f64) -> f64,
{
    validate_config(config)?;
    if !(lower < upper) || !lower.is_finite() || !upper.is_finite() {
        return Err(MathError::InvalidBracket { lower, upper });
    }

    let eval = |x: f64| sanitize(f(x));

    let mut a = lower;
    let mut b = upper;
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = eval(c);
    let mut fd = eval(d);
    let mut evaluations = 2_u32;

    for iteration in 0..config.max_iterations {
        let x = 0.5 * (a + b);
        if (b - a) <= 2.0 * (config.tolerance * x.abs() + 1e-12) {
            let (x, fx) = best_of(a, b, c, fc, d, fd);
            return Ok(MinimizerResult {
                x,
                objective_value: fx,
                iterations: iteration,
                evaluations,
                converged: true,
            });
        }

        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = eval(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = eval(d);
        }
        evaluations += 1;
    }

    let (x, fx) = best_of(a, b, c, fc, d, fd);
    Ok(MinimizerResult {
        x,
        objective_value: fx,
        iterations: config.max_iterations,
        evaluations,
        converged: false,
    })
}

fn best_of(a: f64, b: f64, c: f64, fc: f64, d: f64, fd: f64) -> (f64, f64) {
    let (x, fx) = if fc <= fd { (c, fc) } else { (d, fd) };
    (x.clamp(a, b), fx)
}
