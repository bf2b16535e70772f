use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, InputError, Result},
    partition::SolverStrategy,
};

/// Main configuration for clip-partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Cost model settings
    #[serde(default)]
    pub partition: PartitionConfig,

    /// Solver and scheduling settings
    #[serde(default)]
    pub solver: SolverConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.partition.validate()?;
        self.solver.validate()?;
        Ok(())
    }
}

/// Cost model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Fixed cost charged for every clip produced
    pub penalty: f64,

    /// Weight for labels missing from `cost_table`
    pub default_cost: f64,

    /// Per-label skip weight
    pub cost_table: BTreeMap<String, f64>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            penalty: 2.0,
            default_cost: 1.0,
            cost_table: BTreeMap::new(),
        }
    }
}

impl PartitionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(InputError::InvalidPenalty { penalty: self.penalty }.into());
        }

        check_weight("default", self.default_cost)?;
        for (label, &weight) in &self.cost_table {
            check_weight(label, weight)?;
        }

        Ok(())
    }
}

fn check_weight(label: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(InputError::InvalidWeight {
            label: label.to_string(),
            weight,
        }
        .into());
    }
    Ok(())
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Shortest-path algorithm
    pub strategy: SolverStrategy,

    /// Score candidate segments on a thread pool
    pub parallel: bool,

    /// Minimum number of candidate segments before scoring goes parallel
    pub parallel_threshold: usize,

    /// Worker threads for parallel scoring
    pub threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SolverStrategy::default(),
            parallel: true,
            parallel_threshold: 2048,
            threads: num_cpus::get(),
        }
    }
}

impl SolverConfig {
    fn validate(&self) -> Result<()> {
        if self.parallel && self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "solver.threads".to_string(),
                value: self.threads.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartitionError;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.partition.penalty, 2.0);
        assert_eq!(config.partition.default_cost, 1.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.partition.cost_table.insert("person".to_string(), 4.0);
        original_config.solver.strategy = SolverStrategy::Dijkstra;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[partition]\npenalty = 20.0\n\n[partition.cost_table]\ncar = 0.5\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.partition.penalty, 20.0);
        assert_eq!(config.partition.default_cost, 1.0);
        assert_eq!(config.partition.cost_table.get("car"), Some(&0.5));
        assert_eq!(config.solver.strategy, SolverStrategy::Topological);
    }

    #[test]
    fn test_negative_penalty_is_rejected() {
        let mut config = Config::default();
        config.partition.penalty = -1.0;
        assert!(matches!(
            config.validate(),
            Err(PartitionError::InvalidInput(InputError::InvalidPenalty { .. }))
        ));
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let mut config = Config::default();
        config.partition.cost_table.insert("cat".to_string(), f64::NAN);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.partition.default_cost = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threads_rejected_when_parallel() {
        let mut config = Config::default();
        config.solver.threads = 0;
        assert!(config.validate().is_err());

        config.solver.parallel = false;
        assert!(config.validate().is_ok());
    }
}
