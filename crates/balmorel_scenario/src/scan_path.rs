use crate::error::{Result, ScenarioError};
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory.
pub fn expand_scan_path(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.to_path_buf()
}

/// Root of a scenario tree must be an existing directory.
pub fn validate_root(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ScenarioError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ScenarioError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
