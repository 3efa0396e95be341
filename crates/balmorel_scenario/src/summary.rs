//! Human-readable and JSON overview of a registry.

use crate::registry::ScenarioRegistry;
use crate::types::ScenarioDescriptor;
use serde::Serialize;
use std::fmt;
use std::path::Path;

const RULE: &str = "============================================================";

#[derive(Debug, Serialize)]
pub struct RegistrySummary<'a> {
    pub root: &'a Path,
    pub single_scenario: bool,
    pub scenarios: Vec<&'a ScenarioDescriptor>,
    pub common_years: Vec<String>,
}

impl<'a> RegistrySummary<'a> {
    pub fn new(registry: &'a ScenarioRegistry) -> Self {
        Self {
            root: registry.root(),
            single_scenario: registry.is_single_scenario(),
            scenarios: registry.scenarios().values().collect(),
            common_years: registry.common_years().into_iter().collect(),
        }
    }
}

impl fmt::Display for RegistrySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Scenario Summary")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Root Path: {}", self.root.display())?;
        writeln!(
            f,
            "Type: {}",
            if self.single_scenario {
                "Single Scenario"
            } else {
                "Multiple Scenarios"
            }
        )?;
        writeln!(f, "Total Scenarios: {}", self.scenarios.len())?;
        writeln!(f)?;

        if self.scenarios.is_empty() {
            writeln!(f, "No scenarios detected.")?;
            return write!(f, "{}", RULE);
        }

        writeln!(f, "Scenarios:")?;
        for scenario in &self.scenarios {
            writeln!(f, "  - {}", scenario.name())?;
            writeln!(f, "    Path: {}", scenario.path().display())?;
            writeln!(f, "    Data files: {}", scenario.files().len())?;

            for (role, path) in scenario.role_paths() {
                writeln!(f, "      {} file: {}", role, file_name(path))?;
            }

            if scenario.has_yearly() {
                writeln!(f, "      Output-year files: {}", scenario.year_paths().len())?;
                for (year, path) in scenario.year_paths() {
                    writeln!(f, "        {}: {}", year, file_name(path))?;
                }
            }

            if !scenario.other_paths().is_empty() {
                writeln!(f, "      Other files: {}", scenario.other_paths().len())?;
                for filename in scenario.other_paths().keys() {
                    writeln!(f, "        {}", filename)?;
                }
            }
        }

        if !self.common_years.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Common years across all scenarios ({}):",
                self.common_years.len()
            )?;
            for year in &self.common_years {
                writeln!(f, "  - {}", year)?;
            }
        }

        write!(f, "{}", RULE)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
