//! Error types for indexing and queries

use balmorel_scenario::{Role, ScenarioError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Symbol '{0}' not found in any scenario")]
    SymbolNotFound(String),

    #[error("Scenario(s) not found: {}", .missing.join(", "))]
    ScenarioNotFound { missing: Vec<String> },

    #[error("No {role} store registered for symbol '{symbol}'")]
    UnknownRoleForSymbol { symbol: String, role: Role },

    #[error("Store error in {}: {message}", .path.display())]
    Store { path: PathBuf, message: String },

    #[error("Table error: {0}")]
    Table(String),
}

impl DataError {
    pub(crate) fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DataError::Store {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DataError>;
