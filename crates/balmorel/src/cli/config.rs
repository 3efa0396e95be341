//! Config file loading and registry setup shared by every command.

use crate::cli::error::{scenario_error, HelpfulError};
use anyhow::{Context, Result};
use balmorel_data::BalmorelConfig;
use balmorel_scenario::{expand_scan_path, ScenarioFilter, ScenarioRegistry};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options every command accepts.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub extension: Option<String>,
}

/// `--config` if given, defaults otherwise; `--extension` wins over the file.
pub fn load_config(global: &GlobalArgs) -> Result<BalmorelConfig> {
    let mut config = match &global.config {
        Some(path) => {
            let path = expand_scan_path(path);
            if !path.exists() {
                return Err(HelpfulError::path_not_found(&path)
                    .with_context("The --config file does not exist")
                    .into());
            }
            BalmorelConfig::load(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => BalmorelConfig::default(),
    };

    if let Some(extension) = &global.extension {
        config.scenarios.store_extension = extension.trim_start_matches('.').to_string();
    }
    config
        .scenarios
        .validate()
        .context("Invalid configuration")?;
    Ok(config)
}

pub fn parse_filter(option: Option<&str>) -> Result<ScenarioFilter> {
    match option {
        None => Ok(ScenarioFilter::All),
        Some(option) => option
            .parse()
            .map_err(|_| HelpfulError::invalid_filter(option).into()),
    }
}

/// Discover scenarios under `root` and apply `filter`.
pub fn open_registry(
    root: &Path,
    config: &BalmorelConfig,
    filter: Option<&str>,
) -> Result<ScenarioRegistry> {
    let filter = parse_filter(filter)?;
    let root = expand_scan_path(root);
    let mut registry = ScenarioRegistry::discover_with_config(&root, config.scenarios.clone())
        .map_err(scenario_error)?;
    if filter != ScenarioFilter::All {
        registry.filter(filter);
    }
    debug!(root = %root.display(), scenarios = registry.len(), "Registry ready");
    Ok(registry)
}
