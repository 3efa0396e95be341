//! DataManager: symbol index plus cross-scenario queries.
//!
//! Construction scans every store the registry knows about once, in role order
//! Input, BM, Basis, Output, OutputYear, and records which symbols carry
//! records where. Queries then open only the stores they need and keep them
//! open for the lifetime of the manager.
//!
//! Queries take `&mut self`; a manager shared across threads needs an
//! external lock.

use crate::cache::{ScenarioKey, StoreCache, StoreKey};
use crate::config::IndexConfig;
use crate::error::{DataError, Result};
use crate::index::SymbolIndex;
use crate::store::{RecordStore, StoreOpener, SymbolInfo};
use crate::table::{concat_tables, tag_provenance};
use arrow::array::RecordBatch;
use balmorel_scenario::{Diagnostic, Role, ScenarioRegistry};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info};

/// Which scenarios a query covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScenarioSelection {
    /// Every scenario in the registry, in name order
    #[default]
    All,
    /// The named scenarios, in the given order
    Named(Vec<String>),
}

impl From<&str> for ScenarioSelection {
    fn from(name: &str) -> Self {
        ScenarioSelection::Named(vec![name.to_string()])
    }
}

impl From<String> for ScenarioSelection {
    fn from(name: String) -> Self {
        ScenarioSelection::Named(vec![name])
    }
}

impl From<Vec<String>> for ScenarioSelection {
    fn from(names: Vec<String>) -> Self {
        ScenarioSelection::Named(names)
    }
}

impl From<Vec<&str>> for ScenarioSelection {
    fn from(names: Vec<&str>) -> Self {
        ScenarioSelection::Named(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ScenarioSelection {
    fn from(names: &[&str]) -> Self {
        ScenarioSelection::Named(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<T: Into<ScenarioSelection>> From<Option<T>> for ScenarioSelection {
    fn from(selection: Option<T>) -> Self {
        selection.map(Into::into).unwrap_or_default()
    }
}

/// Result of a query along with the keys that contributed nothing.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub symbol: String,
    pub role: Role,
    pub table: RecordBatch,
    /// Keys where the symbol has no records, in iteration order
    pub skipped: Vec<ScenarioKey>,
}

pub struct DataManager<O: StoreOpener> {
    registry: ScenarioRegistry,
    opener: O,
    config: IndexConfig,
    index: SymbolIndex,
    cache: StoreCache<O::Store>,
    diagnostics: Vec<Diagnostic>,
}

impl<O: StoreOpener> DataManager<O> {
    /// Build the symbol index over every store in `registry`.
    pub fn new(registry: ScenarioRegistry, opener: O) -> Result<Self> {
        Self::with_config(registry, opener, IndexConfig::default())
    }

    pub fn with_config(registry: ScenarioRegistry, opener: O, config: IndexConfig) -> Result<Self> {
        let mut manager = Self {
            registry,
            opener,
            config,
            index: SymbolIndex::new(),
            cache: StoreCache::new(),
            diagnostics: Vec::new(),
        };
        manager.build_index()?;
        Ok(manager)
    }

    fn build_index(&mut self) -> Result<()> {
        for role in Role::INDEX_ORDER {
            for (key, path) in self.role_sources(role) {
                let store_key = StoreKey::new(role, key.clone());
                let store = self.opener.open(&path)?;

                let mut indexed = 0usize;
                for symbol in store.symbol_names() {
                    if !store.has_records(&symbol) {
                        continue;
                    }
                    indexed += 1;
                    if let Some(previous) = self.index.record(&symbol, role, &key) {
                        let diagnostic = Diagnostic::RoleCollision {
                            symbol,
                            previous,
                            current: role,
                        };
                        diagnostic.emit();
                        self.diagnostics.push(diagnostic);
                    }
                }
                debug!(role = %role, key = %key, symbols = indexed, "Indexed store");

                if self.config.retain_indexed_stores {
                    self.cache.insert_open(store_key, path, store);
                } else {
                    self.cache.register(store_key, path);
                }
            }
        }

        info!(
            scenarios = self.registry.len(),
            stores = self.cache.len(),
            symbols = self.index.len(),
            "Built symbol index"
        );
        Ok(())
    }

    /// Every (key, path) the registry lists for `role`.
    fn role_sources(&self, role: Role) -> Vec<(ScenarioKey, PathBuf)> {
        if role.is_yearly() {
            self.registry
                .yearly_paths()
                .into_iter()
                .flat_map(|(scenario, years)| {
                    years.into_iter().map(move |(year, path)| {
                        (ScenarioKey::yearly(scenario.clone(), year), path)
                    })
                })
                .collect()
        } else {
            self.registry
                .paths_for_role(role)
                .into_iter()
                .map(|(scenario, path)| (ScenarioKey::scenario(scenario), path))
                .collect()
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Records of `symbol` across the selected scenarios as one table.
    ///
    /// With more than one scenario key the table starts with a `Scenario`
    /// column (and `Year` for yearly symbols). Scenarios without records are
    /// skipped; if none has records the table is empty.
    pub fn query(
        &mut self,
        symbol: &str,
        scenarios: impl Into<ScenarioSelection>,
    ) -> Result<RecordBatch> {
        Ok(self.query_detailed(symbol, scenarios)?.table)
    }

    pub fn query_detailed(
        &mut self,
        symbol: &str,
        scenarios: impl Into<ScenarioSelection>,
    ) -> Result<QueryOutcome> {
        let names = self.resolve_scenarios(scenarios.into())?;
        let role = self
            .index
            .role_of(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let keys: Vec<ScenarioKey> = if role.is_yearly() {
            let years = self.registry.all_years();
            names
                .iter()
                .flat_map(|name| years.iter().map(move |year| ScenarioKey::yearly(name, year)))
                .collect()
        } else {
            names.iter().map(ScenarioKey::scenario).collect()
        };
        let tag = keys.len() > 1;

        let mut fragments = Vec::new();
        let mut skipped = Vec::new();
        for key in keys {
            if !self.index.is_present_as(role, &key, symbol) {
                debug!(symbol = %symbol, key = %key, "No records, skipping");
                skipped.push(key);
                continue;
            }

            let store_key = StoreKey::new(role, key.clone());
            let store = self
                .cache
                .get_or_open(&store_key, &self.opener)?
                .ok_or_else(|| DataError::UnknownRoleForSymbol {
                    symbol: symbol.to_string(),
                    role,
                })?;

            let records = store.records(symbol)?;
            fragments.push(if tag {
                tag_provenance(&records, &key)?
            } else {
                records
            });
        }

        let table = concat_tables(&fragments)?;
        info!(
            symbol = %symbol,
            role = %role,
            rows = table.num_rows(),
            fragments = fragments.len(),
            skipped = skipped.len(),
            "Query complete"
        );

        Ok(QueryOutcome {
            symbol: symbol.to_string(),
            role,
            table,
            skipped,
        })
    }

    /// Validate and order the scenario names a query covers.
    fn resolve_scenarios(&self, selection: ScenarioSelection) -> Result<Vec<String>> {
        match selection {
            ScenarioSelection::All => Ok(self
                .registry
                .scenario_names()
                .map(str::to_string)
                .collect()),
            ScenarioSelection::Named(names) => {
                let mut seen = HashSet::new();
                let names: Vec<String> = names
                    .into_iter()
                    .filter(|name| seen.insert(name.clone()))
                    .collect();

                let missing: Vec<String> = names
                    .iter()
                    .filter(|name| !self.registry.contains(name))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(DataError::ScenarioNotFound { missing });
                }
                Ok(names)
            }
        }
    }

    /// Metadata for `symbol` from one scenario's store (and year, for yearly symbols).
    pub fn symbol_info(
        &mut self,
        symbol: &str,
        scenario: &str,
        year: Option<&str>,
    ) -> Result<Option<SymbolInfo>> {
        if !self.registry.contains(scenario) {
            return Err(DataError::ScenarioNotFound {
                missing: vec![scenario.to_string()],
            });
        }
        let role = self
            .index
            .role_of(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let key = match (role.is_yearly(), year) {
            (true, Some(year)) => ScenarioKey::yearly(scenario, year),
            (true, None) => return Ok(None),
            (false, _) => ScenarioKey::scenario(scenario),
        };

        let store_key = StoreKey::new(role, key);
        Ok(self
            .cache
            .get_or_open(&store_key, &self.opener)?
            .and_then(|store| store.symbol_info(symbol)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Indexed symbol name -> role.
    pub fn symbols(&self) -> &BTreeMap<String, Role> {
        self.index.symbols()
    }

    pub fn role_of(&self, symbol: &str) -> Option<Role> {
        self.index.role_of(symbol)
    }

    pub fn is_present(&self, key: &ScenarioKey, symbol: &str) -> bool {
        self.index.is_present(key, symbol)
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    /// Stores currently held open.
    pub fn open_store_count(&self) -> usize {
        self.cache.open_count()
    }

    pub fn is_store_open(&self, role: Role, key: &ScenarioKey) -> bool {
        self.cache.is_open(&StoreKey::new(role, key.clone()))
    }

    /// Role collisions raised while building the index.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<O: StoreOpener> Drop for DataManager<O> {
    fn drop(&mut self) {
        let open = self.cache.open_count();
        if open > 0 {
            debug!(stores = open, "Releasing open stores");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_conversions() {
        assert_eq!(ScenarioSelection::from(None::<&str>), ScenarioSelection::All);
        assert_eq!(
            ScenarioSelection::from("a"),
            ScenarioSelection::Named(vec!["a".to_string()])
        );
        assert_eq!(
            ScenarioSelection::from(Some(vec!["a", "b"])),
            ScenarioSelection::Named(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            ScenarioSelection::from(&["a"][..]),
            ScenarioSelection::Named(vec!["a".to_string()])
        );
    }
}
