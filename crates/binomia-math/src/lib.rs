//! # Binomia Math
//!
//! Numerical primitives for the Binomia option pricing library.
//!
//! This crate provides:
//!
//! - **Distributions**: Standard normal CDF/PDF backed by `statrs`
//! - **Optimization**: Bounded one-dimensional minimization (bracket search,
//!   Brent, golden section)
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: NaN objectives are treated as +inf, bounds are
//!   never violated
//! - **Observable Convergence**: Minimizers report `converged` and iteration
//!   counts instead of failing silently

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod distributions;
pub mod error;
pub mod optimization;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{norm_cdf, norm_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        bracket_minimum, brent_minimize, golden_section, minimize_bounded, Bracket,
        BrentMinimizer, GoldenSectionMinimizer, MinimizerResult, OptimizationConfig,
        ScalarMinimizer,
    };
}

pub use error::{MathError, MathResult};
