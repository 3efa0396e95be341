//! Core types for scenario discovery

use crate::error::ScenarioError;
use crate::patterns::{self, FileClass, FileClassifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Roles
// ============================================================================

/// Category a data file belongs to, decided by its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "BM")]
    Bm,
    Basis,
    Input,
    Output,
    OutputYear,
}

impl Role {
    /// Roles holding at most one file per scenario.
    pub const FIXED: [Role; 4] = [Role::Bm, Role::Basis, Role::Input, Role::Output];

    /// Order in which roles are scanned when the symbol index is built.
    pub const INDEX_ORDER: [Role; 5] = [
        Role::Input,
        Role::Bm,
        Role::Basis,
        Role::Output,
        Role::OutputYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Bm => "BM",
            Role::Basis => "Basis",
            Role::Input => "Input",
            Role::Output => "Output",
            Role::OutputYear => "OutputYear",
        }
    }

    /// True for the role whose files are keyed by year.
    pub fn is_yearly(&self) -> bool {
        matches!(self, Role::OutputYear)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bm" => Ok(Role::Bm),
            "basis" => Ok(Role::Basis),
            "input" => Ok(Role::Input),
            "output" => Ok(Role::Output),
            "outputyear" | "output_year" | "output-year" | "yearly" => Ok(Role::OutputYear),
            _ => Err(ScenarioError::InvalidArgument(format!(
                "Unknown role '{}'. Valid roles: bm, basis, input, output, output_year",
                s
            ))),
        }
    }
}

// ============================================================================
// Scenario descriptor
// ============================================================================

/// One scenario directory with its data files sorted into roles.
///
/// Built once during discovery and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDescriptor {
    name: String,
    path: PathBuf,
    control_file: PathBuf,
    role_paths: BTreeMap<Role, PathBuf>,
    year_paths: BTreeMap<String, PathBuf>,
    other_paths: BTreeMap<String, PathBuf>,
    #[serde(skip)]
    files: BTreeMap<String, PathBuf>,
    #[serde(skip)]
    extension: String,
}

impl ScenarioDescriptor {
    /// Classify `files` (filename -> path) into role slots.
    ///
    /// Unmatched files are kept under [`other_paths`](Self::other_paths); nothing
    /// is rejected. When two files claim the same slot the later filename wins.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        control_file: impl Into<PathBuf>,
        files: BTreeMap<String, PathBuf>,
        classifier: &FileClassifier,
    ) -> Self {
        let name = name.into();
        let mut role_paths = BTreeMap::new();
        let mut year_paths = BTreeMap::new();
        let mut other_paths = BTreeMap::new();

        for (filename, file_path) in &files {
            match classifier.classify(filename) {
                FileClass::Year(year) => {
                    if let Some(previous) = year_paths.insert(year.clone(), file_path.clone()) {
                        tracing::warn!(
                            scenario = %name,
                            year = %year,
                            replaced = %previous.display(),
                            kept = %file_path.display(),
                            "Multiple files for the same year"
                        );
                    }
                }
                FileClass::Role(role) => {
                    if let Some(previous) = role_paths.insert(role, file_path.clone()) {
                        tracing::warn!(
                            scenario = %name,
                            role = %role,
                            replaced = %previous.display(),
                            kept = %file_path.display(),
                            "Multiple files for the same role"
                        );
                    }
                }
                FileClass::Other => {
                    other_paths.insert(filename.clone(), file_path.clone());
                }
            }
        }

        Self {
            name,
            path: path.into(),
            control_file: control_file.into(),
            role_paths,
            year_paths,
            other_paths,
            files,
            extension: classifier.extension().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_file(&self) -> &Path {
        &self.control_file
    }

    /// File for a fixed role. Always `None` for [`Role::OutputYear`].
    pub fn role_path(&self, role: Role) -> Option<&Path> {
        self.role_paths.get(&role).map(PathBuf::as_path)
    }

    pub fn role_paths(&self) -> &BTreeMap<Role, PathBuf> {
        &self.role_paths
    }

    /// Year-tagged output files keyed by 4-digit year.
    pub fn year_paths(&self) -> &BTreeMap<String, PathBuf> {
        &self.year_paths
    }

    pub fn year_path(&self, year: &str) -> Option<&Path> {
        self.year_paths.get(year).map(PathBuf::as_path)
    }

    /// Years with a year-tagged output file, ascending.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.year_paths.keys().map(String::as_str)
    }

    /// Files that matched no classification rule.
    pub fn other_paths(&self) -> &BTreeMap<String, PathBuf> {
        &self.other_paths
    }

    /// Every data file of the scenario, whatever its role.
    pub fn files(&self) -> &BTreeMap<String, PathBuf> {
        &self.files
    }

    /// Exact filename lookup; the data file extension is appended when missing.
    pub fn lookup_file(&self, filename: &str) -> Option<&Path> {
        self.files
            .get(&patterns::with_extension(filename, &self.extension))
            .map(PathBuf::as_path)
    }

    pub fn has_input_and_output(&self) -> bool {
        self.role_paths.contains_key(&Role::Input) && self.role_paths.contains_key(&Role::Output)
    }

    pub fn has_yearly(&self) -> bool {
        !self.year_paths.is_empty()
    }
}

impl fmt::Display for ScenarioDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario '{}' ({} data files)", self.name, self.files.len())
    }
}
