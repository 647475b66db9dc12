//! Brent's minimization algorithm.

use crate::error::{MathError, MathResult};
use crate::optimization::{sanitize, validate_config, MinimizerResult, OptimizationConfig};

/// Golden ratio complement, (3 - sqrt(5)) / 2.
const CGOLD: f64 = 0.381_966_011_250_105_1;

/// Absolute floor on the tolerance, for minima at zero.
const ZEPS: f64 = 1e-12;

/// Brent's method for one-dimensional minimization.
///
/// Combines golden-section steps with parabolic interpolation through the
/// three best points seen so far. Parabolic steps are only accepted when they
/// fall inside the bracket and shrink faster than the step before last; a
/// NaN interpolation falls back to a golden-section step.
///
/// The search never evaluates `f` outside `[lower, upper]`. `start` is the
/// first point evaluated and must lie within the interval; the minimum may
/// sit on either end.
///
/// # Arguments
///
/// * `f` - The objective
/// * `lower` - Lower end of the bracket
/// * `start` - Initial best point, typically from [`bracket_minimum`](super::bracket_minimum)
/// * `upper` - Upper end of the bracket
/// * `config` - Tolerance and iteration budget
///
/// # Example
///
/// ```rust
/// use binomia_math::optimization::{brent_minimize, OptimizationConfig};
///
/// let f = |x: f64| (x - 1.0).powi(4) + 0.25;
/// let result = brent_minimize(f, 0.0, 0.5, 3.0, &OptimizationConfig::default()).unwrap();
/// assert!(result.converged);
/// assert!((result.objective_value - 0.25).abs() < 1e-12);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent_minimize<F>(
    f: F,
    lower: f64,
    start: f64,
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
    if !(lower..=upper).contains(&start) {
        return Err(MathError::invalid_input(format!(
            "start {start} lies outside [{lower}, {upper}]"
        )));
    }

    let eval = |x: f64| sanitize(f(x));

    let mut a = lower;
    let mut b = upper;
    let mut x = start;
    let mut w = start;
    let mut v = start;
    let mut fx = eval(x);
    let mut fw = fx;
    let mut fv = fx;
    let mut evaluations = 1_u32;

    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for iteration in 0..config.max_iterations {
        let xm = 0.5 * (a + b);
        let tol1 = config.tolerance * x.abs() + ZEPS;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            return Ok(MinimizerResult {
                x,
                objective_value: fx,
                iterations: iteration,
                evaluations,
                converged: true,
            });
        }

        let mut golden = true;
        if e.abs() > tol1 {
            // Parabola through (x, fx), (w, fw), (v, fv)
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let e_prev = e;
            e = d;

            let acceptable =
                p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x);
            if acceptable {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                golden = false;
            }
        }

        if golden {
            e = if x >= xm { a - x } else { b - x };
            d = CGOLD * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let u = u.clamp(a, b);
        let fu = eval(u);
        evaluations += 1;

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    tracing::debug!(
        x,
        objective = fx,
        iterations = config.max_iterations,
        "Brent minimization hit iteration limit"
    );

    Ok(MinimizerResult {
        x,
        objective_value: fx,
        iterations: config.max_iterations,
        evaluations,
        converged: false,
    })
}
