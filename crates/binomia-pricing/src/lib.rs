//! # Binomia Pricing
//!
//! European and American option pricing on a Cox-Ross-Rubinstein binomial
//! lattice, the Black-Scholes-Merton closed form, and implied volatility.
//!
//! # Design Philosophy
//!
//! 1. **Pluggable strategies**: the lattice engine is parameterised by a
//!    [`Payoff`] (what exercise is worth) and a [`ValuationRule`] (how a node
//!    combines its children), so European and American pricing share one
//!    backward induction
//! 2. **Model agnostic inversion**: the implied volatility solver works with
//!    any [`OptionPricer`], or any closure from volatility to price
//! 3. **Typed failures**: invalid inputs and undefined closed-form cases are
//!    [`PricingError`]s; a solver that stops short reports
//!    `converged == false` instead of failing
//!
//! # Modules
//!
//! - [`lattice`]: Tree parameters, node storage and the backward induction engine
//! - [`payoff`], [`valuation`]: Strategies plugged into the engine
//! - [`analytic`]: Black-Scholes-Merton closed form
//! - [`pricer`]: [`OptionPricer`] implementations and convenience functions
//! - [`implied_vol`]: Implied volatility by bounded least squares
//!
//! # Example
//!
//! ```rust
//! use binomia_pricing::prelude::*;
//!
//! let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);
//!
//! let european = price_lattice(OptionKind::Put, ExerciseStyle::European, &params, 100).unwrap();
//! let american = price_lattice(OptionKind::Put, ExerciseStyle::American, &params, 100).unwrap();
//! let closed = price_black_scholes(OptionKind::Put, &params).unwrap();
//!
//! assert!(american >= european);
//! assert!((european - closed).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod analytic;
pub mod error;
pub mod implied_vol;
pub mod lattice;
pub mod payoff;
pub mod pricer;
pub mod types;
pub mod valuation;

pub use error::{PricingError, PricingResult};
pub use implied_vol::{implied_volatilities, implied_volatility, ImpliedVolResult, ImpliedVolSolver};
pub use lattice::{BinomialEngine, CrrParameters, Lattice, NodeKey, ValuedLattice};
pub use payoff::Payoff;
pub use pricer::{
    price_black_scholes, price_lattice, put_call_parity_gap, BinomialPricer, BlackScholesPricer,
    OptionPricer,
};
pub use types::{ExerciseStyle, OptionKind, PricingParams};
pub use valuation::{NodeContext, ValuationRule};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::analytic::black_scholes_price;
    pub use super::error::{PricingError, PricingResult};
    pub use super::implied_vol::{
        implied_volatilities, implied_volatility, ImpliedVolResult, ImpliedVolSolver,
    };
    pub use super::lattice::{BinomialEngine, NodeKey};
    pub use super::payoff::Payoff;
    pub use super::pricer::{
        price_black_scholes, price_lattice, put_call_parity_gap, BinomialPricer,
        BlackScholesPricer, OptionPricer,
    };
    pub use super::types::{ExerciseStyle, OptionKind, PricingParams};
    pub use super::valuation::ValuationRule;

    // Re-export configuration used to build solvers and pricers
    pub use binomia_config::{ImpliedVolConfig, LatticeConfig, MinimizerMethod};
}
