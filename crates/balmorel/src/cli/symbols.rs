//! Symbols command - list indexed symbols with their role and coverage

use crate::cli::config::{load_config, open_registry, GlobalArgs};
use crate::cli::error::data_error;
use crate::cli::output::{print_json, print_table};
use anyhow::Result;
use balmorel_data::{DataManager, JsonStoreOpener, ScenarioKey, StoreOpener};
use balmorel_scenario::Role;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SymbolsArgs {
    pub root: PathBuf,
    pub role: Option<Role>,
    pub filter: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub role: Role,
    /// Scenarios where the symbol has records
    pub scenarios: Vec<String>,
}

pub fn run(args: SymbolsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let registry = open_registry(&args.root, &config, args.filter.as_deref())?;
    let total = registry.len();
    let manager = DataManager::with_config(registry, JsonStoreOpener, config.index.clone())
        .map_err(|e| data_error(e, &args.root))?;

    let entries = collect(&manager, args.role);

    if args.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No symbols with records in {} scenario(s)", total);
        return Ok(());
    }

    let rows = entries
        .into_iter()
        .map(|entry| {
            vec![
                entry.symbol,
                entry.role.to_string(),
                format!("{}/{}", entry.scenarios.len(), total),
            ]
        })
        .collect();
    print_table(&["Symbol", "Role", "Scenarios"], rows);
    Ok(())
}

pub fn collect<O: StoreOpener>(manager: &DataManager<O>, role: Option<Role>) -> Vec<SymbolEntry> {
    let registry = manager.registry();
    let years = registry.all_years();

    manager
        .symbols()
        .iter()
        .filter(|(_, symbol_role)| role.map_or(true, |r| r == **symbol_role))
        .map(|(symbol, symbol_role)| {
            let scenarios = registry
                .scenario_names()
                .filter(|name| {
                    if symbol_role.is_yearly() {
                        years
                            .iter()
                            .any(|year| manager.is_present(&ScenarioKey::yearly(*name, year), symbol))
                    } else {
                        manager.is_present(&ScenarioKey::scenario(*name), symbol)
                    }
                })
                .map(str::to_string)
                .collect();
            SymbolEntry {
                symbol: symbol.clone(),
                role: *symbol_role,
                scenarios,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use balmorel_data::{MemoryOpener, MemoryStore};
    use balmorel_scenario::ScenarioRegistry;
    use balmorel_test_utils::{symbol_batch, ScenarioTree};

    #[test]
    fn test_collect_coverage() {
        let tree = ScenarioTree::new();
        let mut opener = MemoryOpener::new();
        for (name, rows) in [("a", 1usize), ("b", 0)] {
            let dir = tree.scenario(name, &[&format!("{}-output.gdx", name)]);
            let data: Vec<(&[&str], f64)> = (0..rows).map(|_| (&["DK1"][..], 1.0)).collect();
            opener.insert(
                dir.join("output").join(format!("{}-output.gdx", name)),
                MemoryStore::new()
                    .with_symbol("G_CAP", symbol_batch(&["AAA"], &data))
                    .with_symbol("X", symbol_batch(&["AAA"], &[(&["DK1"], 1.0)])),
            );
        }
        let registry = ScenarioRegistry::discover(tree.root()).unwrap();
        let manager = DataManager::new(registry, opener).unwrap();

        let entries = collect(&manager, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "G_CAP");
        assert_eq!(entries[0].scenarios, vec!["a"]);
        assert_eq!(entries[1].scenarios, vec!["a", "b"]);

        assert!(collect(&manager, Some(Role::Input)).is_empty());
    }
}
