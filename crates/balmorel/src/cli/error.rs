//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use balmorel_data::DataError;
use balmorel_scenario::{ScenarioError, ScenarioFilter};
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_context("The specified path does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("Expected a scenario folder or a folder of scenarios")
            .with_suggestion(format!(
                "TRY: Point at the parent directory: balmorel summary {}",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            ))
    }

    pub fn invalid_filter(option: &str) -> Self {
        Self::new(format!("Unknown filter: '{}'", option))
            .with_context("Filters keep scenarios by the files they contain")
            .with_suggestions([
                format!("TRY: Valid options: {}", ScenarioFilter::VALID_OPTIONS),
                "TRY: --filter inout keeps scenarios with both input and output files"
                    .to_string(),
            ])
    }

    pub fn symbol_not_found(symbol: &str, root: &Path) -> Self {
        Self::new(format!("Symbol '{}' not found in any scenario", symbol))
            .with_context("Only symbols with at least one record are indexed")
            .with_suggestions([
                format!("TRY: List indexed symbols: balmorel symbols {}", root.display()),
                "TRY: Symbol names are case sensitive".to_string(),
            ])
    }

    pub fn scenarios_not_found(missing: &[String], root: &Path) -> Self {
        Self::new(format!("Scenario(s) not found: {}", missing.join(", ")))
            .with_context(format!("No such scenario under {}", root.display()))
            .with_suggestions([
                format!("TRY: List scenarios: balmorel summary {}", root.display()),
                "TRY: Scenarios removed by --filter cannot be queried".to_string(),
            ])
    }

    pub fn unreadable_store(path: &Path, details: &str) -> Self {
        Self::new(format!("Cannot read data file: {}", path.display()))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Data commands read JSON exports; pass --extension json".to_string(),
                "TRY: Set store_extension under [scenarios] in the config file".to_string(),
            ])
    }

    /// Translate a data-layer error into its user-facing form.
    pub fn from_data_error(err: &DataError, root: &Path) -> Option<Self> {
        match err {
            DataError::Scenario(inner) => Self::from_scenario_error(inner),
            DataError::PathNotFound(path) => Some(Self::path_not_found(path)),
            DataError::SymbolNotFound(symbol) => Some(Self::symbol_not_found(symbol, root)),
            DataError::ScenarioNotFound { missing } => {
                Some(Self::scenarios_not_found(missing, root))
            }
            DataError::Store { path, message } => Some(Self::unreadable_store(path, message)),
            _ => None,
        }
    }

    pub fn from_scenario_error(err: &ScenarioError) -> Option<Self> {
        match err {
            ScenarioError::PathNotFound(path) => Some(Self::path_not_found(path)),
            ScenarioError::NotADirectory(path) => Some(Self::not_a_directory(path)),
            _ => None,
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Wrap a data-layer error, preferring the helpful form when there is one.
pub fn data_error(err: DataError, root: &Path) -> anyhow::Error {
    match HelpfulError::from_data_error(&err, root) {
        Some(helpful) => helpful.into(),
        None => err.into(),
    }
}

pub fn scenario_error(err: ScenarioError) -> anyhow::Error {
    match HelpfulError::from_scenario_error(&err) {
        Some(helpful) => helpful.into(),
        None => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While indexing")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While indexing"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_symbol_not_found_mentions_name() {
        let err = HelpfulError::from_data_error(
            &DataError::SymbolNotFound("G_CAP".to_string()),
            Path::new("/runs"),
        )
        .unwrap();
        let display = err.to_string();
        assert!(display.contains("'G_CAP'"));
        assert!(display.contains("balmorel symbols /runs"));
    }

    #[test]
    fn test_missing_scenarios_listed() {
        let err = HelpfulError::from_data_error(
            &DataError::ScenarioNotFound {
                missing: vec!["x".to_string(), "y".to_string()],
            },
            Path::new("/runs"),
        )
        .unwrap();
        assert!(err.message.ends_with("x, y"));
    }

    #[test]
    fn test_root_errors() {
        let path = PathBuf::from("/nonexistent/path");
        let err = HelpfulError::from_scenario_error(&ScenarioError::PathNotFound(path)).unwrap();
        assert!(err.to_string().contains("TRY:"));

        assert!(HelpfulError::from_scenario_error(&ScenarioError::Config("x".into())).is_none());
    }
}
