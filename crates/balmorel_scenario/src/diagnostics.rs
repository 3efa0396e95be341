//! Non-fatal conditions observed during discovery and indexing.
//!
//! Each diagnostic is logged once at `warn` when raised and kept so callers can
//! inspect it without a tracing subscriber.

use crate::types::Role;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A candidate directory without a control file was skipped
    ConfigurationMissing { path: PathBuf, control_file: String },

    /// A candidate directory could not be read and was skipped
    Unreadable { path: PathBuf, message: String },

    /// Discovery finished with no scenarios
    EmptyRegistry { root: PathBuf },

    /// A symbol name was found under a second role; the later role replaced the earlier one
    RoleCollision {
        symbol: String,
        previous: Role,
        current: Role,
    },
}

impl Diagnostic {
    /// Log at `warn` with structured fields.
    pub fn emit(&self) {
        match self {
            Diagnostic::ConfigurationMissing { path, control_file } => {
                tracing::warn!(
                    path = %path.display(),
                    control_file = %control_file,
                    "Skipping folder without control file"
                );
            }
            Diagnostic::Unreadable { path, message } => {
                tracing::warn!(path = %path.display(), error = %message, "Skipping unreadable folder");
            }
            Diagnostic::EmptyRegistry { root } => {
                tracing::warn!(root = %root.display(), "No valid scenarios found");
            }
            Diagnostic::RoleCollision {
                symbol,
                previous,
                current,
            } => {
                tracing::warn!(
                    symbol = %symbol,
                    previous = %previous,
                    current = %current,
                    "Symbol found under more than one role; keeping the later role"
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ConfigurationMissing { path, control_file } => write!(
                f,
                "Skipping folder '{}': no {} file found",
                path.display(),
                control_file
            ),
            Diagnostic::Unreadable { path, message } => {
                write!(f, "Skipping folder '{}': {}", path.display(), message)
            }
            Diagnostic::EmptyRegistry { root } => {
                write!(f, "No valid scenarios found in {}", root.display())
            }
            Diagnostic::RoleCollision {
                symbol,
                previous,
                current,
            } => write!(
                f,
                "Symbol '{}' found under {} and {}; using {}",
                symbol, previous, current, current
            ),
        }
    }
}
