//! Configuration for the data layer and the combined config file

use crate::error::{DataError, Result};
use balmorel_scenario::ScenarioConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the symbol index treats the stores it scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Keep stores opened by the index scan in the cache instead of reopening
    /// them on first query
    #[serde(default)]
    pub retain_indexed_stores: bool,
}

/// Contents of a `balmorel.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalmorelConfig {
    #[serde(default)]
    pub scenarios: ScenarioConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

impl BalmorelConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataError::PathNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: BalmorelConfig =
            toml::from_str(&content).map_err(|e| DataError::Config(e.to_string()))?;
        config.scenarios.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DataError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
