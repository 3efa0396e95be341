//! Symbol index: which role a symbol belongs to and where it has records.

use crate::cache::ScenarioKey;
use balmorel_scenario::Role;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    roles: BTreeMap<String, Role>,
    presence: HashMap<(Role, ScenarioKey), HashSet<String>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `symbol` has records in the `role` store of `key`.
    ///
    /// Returns the symbol's previous role when it differs from `role`; the new
    /// role replaces it either way.
    pub fn record(&mut self, symbol: &str, role: Role, key: &ScenarioKey) -> Option<Role> {
        let previous = self.roles.insert(symbol.to_string(), role);
        self.presence
            .entry((role, key.clone()))
            .or_default()
            .insert(symbol.to_string());
        previous.filter(|previous| *previous != role)
    }

    pub fn role_of(&self, symbol: &str) -> Option<Role> {
        self.roles.get(symbol).copied()
    }

    /// True if `symbol` has records for `key` under its current role.
    pub fn is_present(&self, key: &ScenarioKey, symbol: &str) -> bool {
        self.role_of(symbol)
            .map(|role| self.is_present_as(role, key, symbol))
            .unwrap_or(false)
    }

    pub fn is_present_as(&self, role: Role, key: &ScenarioKey, symbol: &str) -> bool {
        self.presence
            .get(&(role, key.clone()))
            .map(|symbols| symbols.contains(symbol))
            .unwrap_or(false)
    }

    /// Symbol name -> role, ascending by name.
    pub fn symbols(&self) -> &BTreeMap<String, Role> {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
