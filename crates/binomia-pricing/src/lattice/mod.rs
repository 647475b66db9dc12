//! Cox-Ross-Rubinstein binomial lattice.
//!
//! The tree is built from terminal payoffs and valued backwards one layer at
//! a time. Nodes are addressed by [`NodeKey`] `(time, up, down)` and stored in
//! a jagged [`Lattice`]; every node is kept so the tree can be inspected after
//! pricing.
//!
//! # Example
//!
//! ```rust
//! use binomia_pricing::lattice::{BinomialEngine, NodeKey};
//! use binomia_pricing::prelude::*;
//!
//! let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);
//! let valued = BinomialEngine::new(4)
//!     .build_lattice(&params, Payoff::Put, ValuationRule::American)
//!     .unwrap();
//!
//! let root = valued.lattice.value(NodeKey::ROOT).unwrap();
//! assert_eq!(root, valued.price());
//! ```

mod engine;
mod parameters;
mod tree;

pub use engine::{BinomialEngine, ValuedLattice};
pub use parameters::CrrParameters;
pub use tree::{Lattice, NodeKey};
