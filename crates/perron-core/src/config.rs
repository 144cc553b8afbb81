//! Refinement configuration.
//!
//! Provides [`RefinementConfig`] with defaults for the height bound, the
//! per-call iteration budget, and primitivity checking. The configuration can
//! be built programmatically, deserialized, or overlaid from environment
//! variables with [`RefinementConfig::from_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_MAX_ITERATIONS, ENV_LOG_HEIGHT, ENV_MAX_ITERATIONS, ENV_MAX_TIME_MS,
    ENV_VERIFY_PRIMITIVE,
};
use crate::error::ConfigError;

/// Limits applied to a single refinement call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementBudget {
    /// Maximum number of power-iteration steps.
    pub max_iterations: u64,
    /// Optional wall-clock limit.
    pub max_time: Option<Duration>,
}

impl Default for RefinementBudget {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_time: None,
        }
    }
}

impl RefinementBudget {
    /// A budget capped only by iteration count.
    pub fn iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            max_time: None,
        }
    }
}

/// Configuration for the eigenvector driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    /// Decimal digits in the height bound of eigenvector coordinates.
    /// `None` derives the bound from the matrix.
    pub log_height: Option<u32>,
    /// Power-iteration cap per refinement call.
    pub max_iterations: u64,
    /// Wall-clock cap per refinement call.
    pub max_time: Option<Duration>,
    /// Reject imprimitive matrices before iterating.
    pub verify_primitive: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            log_height: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_time: None,
            verify_primitive: true,
        }
    }
}

impl RefinementConfig {
    /// The per-call budget described by this configuration.
    pub fn budget(&self) -> RefinementBudget {
        RefinementBudget {
            max_iterations: self.max_iterations,
            max_time: self.max_time,
        }
    }

    /// Defaults overlaid with any `PERRON_*` environment variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with the values `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LOG_HEIGHT) {
            config.log_height = Some(parse(ENV_LOG_HEIGHT, &value)?);
        }
        if let Some(value) = lookup(ENV_MAX_ITERATIONS) {
            config.max_iterations = parse(ENV_MAX_ITERATIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_TIME_MS) {
            let millis: u64 = parse(ENV_MAX_TIME_MS, &value)?;
            config.max_time = Some(Duration::from_millis(millis));
        }
        if let Some(value) = lookup(ENV_VERIFY_PRIMITIVE) {
            config.verify_primitive = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_VERIFY_PRIMITIVE,
                        value,
                    })
                }
            };
        }

        debug!(?config, "refinement config loaded");
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = RefinementConfig::default();
        assert_eq!(cfg.log_height, None);
        assert_eq!(cfg.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(cfg.max_time, None);
        assert!(cfg.verify_primitive);
    }

    #[test]
    fn budget_mirrors_config() {
        let cfg = RefinementConfig {
            max_iterations: 7,
            max_time: Some(Duration::from_secs(1)),
            ..RefinementConfig::default()
        };
        assert_eq!(
            cfg.budget(),
            RefinementBudget {
                max_iterations: 7,
                max_time: Some(Duration::from_secs(1))
            }
        );
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = RefinementConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, RefinementConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let cfg = RefinementConfig::from_lookup(lookup(&[
            (ENV_LOG_HEIGHT, "20"),
            (ENV_MAX_ITERATIONS, " 500 "),
            (ENV_MAX_TIME_MS, "250"),
            (ENV_VERIFY_PRIMITIVE, "false"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_height, Some(20));
        assert_eq!(cfg.max_iterations, 500);
        assert_eq!(cfg.max_time, Some(Duration::from_millis(250)));
        assert!(!cfg.verify_primitive);
    }

    #[test]
    fn malformed_values_rejected() {
        let err = RefinementConfig::from_lookup(lookup(&[(ENV_MAX_ITERATIONS, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: ENV_MAX_ITERATIONS,
                value: "lots".to_string()
            }
        );
        assert!(RefinementConfig::from_lookup(lookup(&[(ENV_VERIFY_PRIMITIVE, "maybe")])).is_err());
    }

    #[test]
    fn deserializes_partial_documents() {
        let cfg: RefinementConfig = serde_json::from_str(r#"{"log_height": 12}"#).unwrap();
        assert_eq!(cfg.log_height, Some(12));
        assert_eq!(cfg.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
