//! Downhill bracket search inside bounds.

use crate::error::{MathError, MathResult};
use crate::optimization::{sanitize, OptimizationConfig};

/// Growth factor applied to the step after each successful downhill move.
const GROWTH: f64 = 1.618_033_988_749_895;

/// Maximum number of step expansions before giving up.
const MAX_EXPANSIONS: u32 = 100;

/// An interval known to contain a local minimum.
///
/// When `bracketed` is true, `lower <= mid <= upper` and `f(mid)` is not
/// larger than the objective at either end. A minimum sitting on one of the
/// bounds yields `mid == lower` or `mid == upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower end of the interval.
    pub lower: f64,
    /// Best point found so far.
    pub mid: f64,
    /// Upper end of the interval.
    pub upper: f64,
    /// Objective value at `mid`.
    pub f_mid: f64,
    /// False when the expansion budget ran out before the objective turned
    /// up, or when the objective is not finite anywhere the walk looked.
    pub bracketed: bool,
    /// Number of step expansions taken by the walk.
    pub expansions: u32,
}

/// Brackets a minimum of `f` starting from `initial_guess`.
///
/// The walk starts with `config.initial_step`, picks the downhill direction,
/// and grows the step geometrically until the objective increases or a bound
/// is hit. Every trial point stays within `bounds`; the upper bound may be
/// infinite.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] if the bounds are empty and
/// [`MathError::NonFiniteValue`] if the initial guess is NaN or infinite.
pub fn bracket_minimum<F>(
    f: F,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &OptimizationConfig,
) -> MathResult<Bracket>
where
    F: Fn(f64) -> f64,
{
    let (lower, upper) = bounds;
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(MathError::InvalidBracket { lower, upper });
    }
    if !initial_guess.is_finite() {
        return Err(MathError::non_finite("initial_guess", initial_guess));
    }

    let clamp = |x: f64| x.clamp(lower, upper);
    let eval = |x: f64| sanitize(f(x));

    let start = clamp(initial_guess);
    let f_start = eval(start);
    let step = config.initial_step;

    let right = clamp(start + step);
    let f_right = if right > start { eval(right) } else { f64::INFINITY };

    let (direction, mut cur, mut f_cur) = if f_right < f_start {
        (1.0, right, f_right)
    } else {
        let left = clamp(start - step);
        let f_left = if left < start { eval(left) } else { f64::INFINITY };
        if f_left < f_start {
            (-1.0, left, f_left)
        } else {
            // Neither neighbour improves: start point already brackets,
            // unless the objective is infinite on all three points.
            return Ok(Bracket {
                lower: left,
                mid: start,
                upper: right,
                f_mid: f_start,
                bracketed: f_start.is_finite(),
                expansions: 0,
            });
        }
    };

    let mut prev = start;
    let mut step = step * GROWTH;

    for expansions in 0..MAX_EXPANSIONS {
        let next = clamp(cur + direction * step);
        if next == cur {
            // Pinned against a bound; the minimum is on the boundary.
            return Ok(ordered(prev, cur, cur, f_cur, expansions));
        }

        let f_next = eval(next);
        if f_next >= f_cur {
            return Ok(ordered(prev, cur, next, f_cur, expansions + 1));
        }

        prev = cur;
        cur = next;
        f_cur = f_next;
        step *= GROWTH;
    }

    Ok(Bracket {
        lower: prev.min(cur),
        mid: cur,
        upper: prev.max(cur),
        f_mid: f_cur,
        bracketed: false,
        expansions: MAX_EXPANSIONS,
    })
}

fn ordered(a: f64, mid: f64, c: f64, f_mid: f64, expansions: u32) -> Bracket {
    Bracket {
        lower: a.min(c),
        mid,
        upper: a.max(c),
        f_mid,
        bracketed: true,
        expansions,
    }
}
