//! Planner configuration, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::DEFAULT_STEP_BUDGET;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Refinement-step bound per planning attempt.
    pub step_budget: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl PlannerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_budget() {
        assert_eq!(PlannerConfig::default().step_budget, 200);
    }

    #[test]
    fn test_parse_overrides_budget() {
        let config: PlannerConfig = toml::from_str("step_budget = 50").unwrap();
        assert_eq!(config.step_budget, 50);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config: PlannerConfig = toml::from_str("").unwrap();
        assert_eq!(config.step_budget, DEFAULT_STEP_BUDGET);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlannerConfig::load("/nonexistent/pop.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
