//! Policy file schema.
//!
//! An optional YAML file supplies the default complexity ceiling and the
//! per-function override rows. When absent, compiled defaults apply.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::policy::{ThresholdPolicy, DEFAULT_COMPLEXITY_CEILING};

/// Default policy file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["depthcheck.yaml", ".depthcheck.yaml"];

/// Errors loading a policy file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read policy file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid policy file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid policy file {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Top-level policy file definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Default complexity ceiling (15 when absent).
    #[serde(default)]
    pub max_complexity: Option<u32>,
    /// Per-function ceiling overrides.
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

/// One override row in the policy file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverrideEntry {
    /// Suffix matched against the reported file path.
    pub file: String,
    /// Exact qualified function name.
    pub function: String,
    /// Complexity ceiling for the matched function.
    pub limit: u32,
}

impl Config {
    /// Parse a policy file from YAML.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path_str.clone(),
            source: e,
        })?;
        config.validate(&path_str)?;
        Ok(config)
    }

    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        if self.max_complexity == Some(0) {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                reason: "max_complexity must be at least 1".to_string(),
            });
        }
        for entry in &self.overrides {
            if entry.function.is_empty() {
                return Err(ConfigError::Invalid {
                    path: path.to_string(),
                    reason: "override with empty function name".to_string(),
                });
            }
            if entry.limit == 0 {
                return Err(ConfigError::Invalid {
                    path: path.to_string(),
                    reason: format!("override for {:?} has a zero limit", entry.function),
                });
            }
        }
        Ok(())
    }

    /// Discover a policy file in the current directory.
    pub fn discover() -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Build the immutable threshold policy.
    ///
    /// A ceiling given on the command line wins over the file value.
    pub fn into_policy(self, cli_ceiling: Option<u32>) -> ThresholdPolicy {
        let default_ceiling = cli_ceiling
            .or(self.max_complexity)
            .unwrap_or(DEFAULT_COMPLEXITY_CEILING);

        let mut policy = ThresholdPolicy::new(default_ceiling);
        for entry in self.overrides {
            policy = policy.with_override(&entry.file, &entry.function, entry.limit);
        }
        policy
    }
}
