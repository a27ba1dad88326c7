//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{MappingError, Result};
use std::path::Path;
use tracing::debug;

/// Configuration file read when no path is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load an explicitly requested file, or fall back to `config.yaml` and
    /// then to built-in defaults when no path was given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Err(MappingError::Config("configuration file is empty".into()));
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}
