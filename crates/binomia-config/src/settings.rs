//! Top-level configuration document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::pricing::{ImpliedVolConfig, LatticeConfig};

/// Complete Binomia configuration.
///
/// Every section and field has a default, so `{}` is a valid document.
///
/// ```json
/// {
///   "lattice": { "default_steps": 200 },
///   "implied_vol": { "initial_guess": 0.2, "tolerance": 1e-10, "method": "brent" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinomiaConfig {
    /// Lattice pricing settings.
    #[serde(default)]
    pub lattice: LatticeConfig,

    /// Implied volatility solver settings.
    #[serde(default)]
    pub implied_vol: ImpliedVolConfig,
}

impl BinomiaConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Writes the configuration to a file as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Validate for BinomiaConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let lattice = self
            .lattice
            .validate()
            .into_iter()
            .map(|e| e.nested("lattice"));
        let implied_vol = self
            .implied_vol
            .validate()
            .into_iter()
            .map(|e| e.nested("implied_vol"));

        lattice.chain(implied_vol).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::MinimizerMethod;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BinomiaConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BinomiaConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let json = r#"{
            "lattice": { "default_steps": 250 },
            "implied_vol": { "upper_bound": 4.0, "method": "golden_section" }
        }"#;
        let config = BinomiaConfig::from_json_str(json).unwrap();

        assert_eq!(config.lattice.default_steps, 250);
        assert_eq!(config.implied_vol.upper_bound, Some(4.0));
        assert_eq!(config.implied_vol.method, MinimizerMethod::GoldenSection);
        assert!((config.implied_vol.initial_guess - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_document_rejected() {
        let json = r#"{ "lattice": { "default_steps": 0 } }"#;
        match BinomiaConfig::from_json_str(json) {
            Err(ConfigError::Validation { field, .. }) => {
                assert_eq!(field, "lattice.default_steps");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let result = BinomiaConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Deserialization(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = BinomiaConfig::from_file("/nonexistent/binomia.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
