//! Binomia Configuration Layer
//!
//! This crate provides configuration management for the Binomia option
//! pricing library: lattice defaults and implied volatility solver settings.
//!
//! # Features
//!
//! - **Lattice Configuration**: Default step count for binomial pricing
//! - **Implied Volatility Configuration**: Initial guess, bounds, tolerance,
//!   iteration budget and minimizer choice
//! - **JSON Loading**: Every field has a default; documents are validated on load
//!
//! # Example
//!
//! ```rust
//! use binomia_config::{BinomiaConfig, MinimizerMethod, Validate};
//!
//! let config = BinomiaConfig::from_json_str(
//!     r#"{ "implied_vol": { "upper_bound": 3.0, "method": "golden_section" } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.lattice.default_steps, 100);
//! assert_eq!(config.implied_vol.method, MinimizerMethod::GoldenSection);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod pricing;
mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pricing::{ImpliedVolConfig, LatticeConfig, MinimizerMethod, MAX_LATTICE_STEPS};
pub use settings::BinomiaConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::pricing::{ImpliedVolConfig, LatticeConfig, MinimizerMethod};
    pub use crate::settings::BinomiaConfig;
}
