//! Files command - data files by role, year, or exact name across scenarios

use crate::cli::config::{load_config, open_registry, GlobalArgs};
use crate::cli::output::{print_json, print_table};
use anyhow::Result;
use balmorel_scenario::{Role, ScenarioRegistry};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelector {
    Role(Role),
    Years,
    Name(String),
}

#[derive(Debug)]
pub struct FilesArgs {
    pub root: PathBuf,
    pub selector: FileSelector,
    pub filter: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    pub scenario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub path: PathBuf,
}

pub fn run(args: FilesArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let registry = open_registry(&args.root, &config, args.filter.as_deref())?;
    let entries = collect(&registry, &args.selector);

    if args.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No matching files in {} scenario(s)", registry.len());
        return Ok(());
    }

    let with_years = matches!(args.selector, FileSelector::Years);
    let headers: &[&str] = if with_years {
        &["Scenario", "Year", "Path"]
    } else {
        &["Scenario", "Path"]
    };
    let rows = entries
        .into_iter()
        .map(|entry| {
            let mut row = vec![entry.scenario];
            if let Some(year) = entry.year {
                row.push(year);
            }
            row.push(entry.path.display().to_string());
            row
        })
        .collect();
    print_table(headers, rows);
    Ok(())
}

pub fn collect(registry: &ScenarioRegistry, selector: &FileSelector) -> Vec<FileEntry> {
    match selector {
        FileSelector::Role(Role::OutputYear) | FileSelector::Years => registry
            .yearly_paths()
            .into_iter()
            .flat_map(|(scenario, years)| {
                years.into_iter().map(move |(year, path)| FileEntry {
                    scenario: scenario.clone(),
                    year: Some(year),
                    path,
                })
            })
            .collect(),
        FileSelector::Role(role) => registry
            .paths_for_role(*role)
            .into_iter()
            .map(|(scenario, path)| FileEntry {
                scenario,
                year: None,
                path,
            })
            .collect(),
        FileSelector::Name(name) => registry
            .paths_for_file(name)
            .into_iter()
            .map(|(scenario, path)| FileEntry {
                scenario,
                year: None,
                path,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balmorel_test_utils::ScenarioTree;

    fn registry(tree: &ScenarioTree) -> ScenarioRegistry {
        tree.scenario("a", &["a-input.gdx", "a-output-2030.gdx"]);
        tree.scenario("b", &["b-input.gdx", "shared.gdx"]);
        ScenarioRegistry::discover(tree.root()).unwrap()
    }

    #[test]
    fn test_collect_by_role() {
        let tree = ScenarioTree::new();
        let entries = collect(&registry(&tree), &FileSelector::Role(Role::Input));
        assert_eq!(
            entries.iter().map(|e| e.scenario.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert!(entries.iter().all(|e| e.year.is_none()));
    }

    #[test]
    fn test_collect_years() {
        let tree = ScenarioTree::new();
        let entries = collect(&registry(&tree), &FileSelector::Years);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].year.as_deref(), Some("2030"));
    }

    #[test]
    fn test_collect_by_name() {
        let tree = ScenarioTree::new();
        let entries = collect(&registry(&tree), &FileSelector::Name("shared".to_string()));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scenario, "b");
    }
}
