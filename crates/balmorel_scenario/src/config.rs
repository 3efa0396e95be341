//! Configuration for scenario discovery

use crate::error::{Result, ScenarioError};
use crate::patterns::FileClassifier;
use serde::{Deserialize, Serialize};

/// Filesystem layout of a scenario tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Marker file whose presence makes a directory a scenario (matched case-insensitively)
    #[serde(default = "default_control_file")]
    pub control_file: String,

    /// Subdirectory holding the scenario's data files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extension of data files, without the leading dot
    #[serde(default = "default_store_extension")]
    pub store_extension: String,
}

fn default_control_file() -> String {
    "balopt.opt".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_store_extension() -> String {
    "gdx".to_string()
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            control_file: default_control_file(),
            output_dir: default_output_dir(),
            store_extension: default_store_extension(),
        }
    }
}

impl ScenarioConfig {
    /// Use a different data file extension (e.g. `json` for exported stores).
    pub fn with_store_extension(mut self, extension: impl Into<String>) -> Self {
        self.store_extension = extension.into();
        self
    }

    /// Reject configurations that could never match anything.
    pub fn validate(&self) -> Result<()> {
        if self.control_file.trim().is_empty() {
            return Err(ScenarioError::Config(
                "control_file must not be empty".to_string(),
            ));
        }
        if self.output_dir.trim().is_empty() {
            return Err(ScenarioError::Config(
                "output_dir must not be empty".to_string(),
            ));
        }
        if self.store_extension.trim().trim_start_matches('.').is_empty() {
            return Err(ScenarioError::Config(
                "store_extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the filename classifier for this layout.
    pub fn classifier(&self) -> Result<FileClassifier> {
        self.validate()?;
        FileClassifier::new(&self.store_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScenarioConfig::default();
        assert_eq!(config.control_file, "balopt.opt");
        assert_eq!(config.output_dir, "output");
        assert_eq!(config.store_extension, "gdx");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_extension_rejected() {
        let config = ScenarioConfig::default().with_store_extension(".");
        assert!(matches!(config.validate(), Err(ScenarioError::Config(_))));
        assert!(config.classifier().is_err());
    }

    #[test]
    fn test_empty_control_file_rejected() {
        let config = ScenarioConfig {
            control_file: "  ".to_string(),
            ..ScenarioConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
