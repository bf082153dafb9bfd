//! Engine configuration: validation limits and scheduling cadence
//!
//! Defaults match the limits the calculator has always enforced. They can be
//! overridden from a JSON file and/or environment variables:
//!   NPV_MAX_CALCULATIONS, NPV_MAX_CASH_FLOWS, NPV_MIN_RATE_INCREMENT, NPV_YIELD_EVERY

use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Policy limits applied by the request validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Lowest lower bound rate accepted (percent)
    pub min_lower_bound_rate: Decimal,

    /// Highest upper bound rate accepted (percent)
    pub max_upper_bound_rate: Decimal,

    /// Smallest rate increment accepted (percent)
    pub min_rate_increment: Decimal,

    /// Cap on (upper - lower) / increment
    pub max_calculations: u32,

    /// Cap on the number of cash flows
    pub max_cash_flows: usize,

    /// Cap on the absolute value of any single cash flow
    pub max_cash_flow_magnitude: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_lower_bound_rate: dec!(-100),
            max_upper_bound_rate: dec!(1000),
            min_rate_increment: dec!(0.01),
            max_calculations: 10_000,
            max_cash_flows: 1_000,
            max_cash_flow_magnitude: dec!(1000000000000),
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: ValidationLimits,

    /// Suspend to the scheduler after this many rates (0 = never)
    pub yield_every: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: ValidationLimits::default(),
            yield_every: 5,
        }
    }
}

impl EngineConfig {
    /// Load config from a JSON file; fields missing from the file keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "NPV_MAX_CALCULATIONS")? {
            self.limits.max_calculations = v;
        }
        if let Some(v) = parse_var(&lookup, "NPV_MAX_CASH_FLOWS")? {
            self.limits.max_cash_flows = v;
        }
        if let Some(v) = parse_var(&lookup, "NPV_MIN_RATE_INCREMENT")? {
            self.limits.min_rate_increment = v;
        }
        if let Some(v) = parse_var(&lookup, "NPV_YIELD_EVERY")? {
            self.yield_every = v;
        }
        Ok(self)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.limits.max_calculations, 10_000);
        assert_eq!(config.limits.max_cash_flows, 1_000);
        assert_eq!(config.limits.min_lower_bound_rate, dec!(-100));
        assert_eq!(config.yield_every, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{"limits": {"max_cash_flows": 50}}"#).unwrap();
        assert_eq!(config.limits.max_cash_flows, 50);
        assert_eq!(config.limits.max_calculations, 10_000);
        assert_eq!(config.yield_every, 5);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [("NPV_MAX_CALCULATIONS", "250"), ("NPV_YIELD_EVERY", "10")]
            .into_iter()
            .collect();
        let config = EngineConfig::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.limits.max_calculations, 250);
        assert_eq!(config.yield_every, 10);
        assert_eq!(config.limits.max_cash_flows, 1_000);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let result = EngineConfig::default().with_overrides(|k| {
            (k == "NPV_MAX_CASH_FLOWS").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
