//! Lazily opened stores, keyed by role and scenario.

use crate::error::Result;
use crate::store::StoreOpener;
use balmorel_scenario::Role;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A scenario, or a (scenario, year) pair for yearly data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScenarioKey {
    pub scenario: String,
    pub year: Option<String>,
}

impl ScenarioKey {
    pub fn scenario(name: impl Into<String>) -> Self {
        Self {
            scenario: name.into(),
            year: None,
        }
    }

    pub fn yearly(name: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            scenario: name.into(),
            year: Some(year.into()),
        }
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.year {
            Some(year) => write!(f, "{}/{}", self.scenario, year),
            None => f.write_str(&self.scenario),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub role: Role,
    pub key: ScenarioKey,
}

impl StoreKey {
    pub fn new(role: Role, key: ScenarioKey) -> Self {
        Self { role, key }
    }
}

#[derive(Debug)]
enum StoreSlot<S> {
    /// Known from the registry, not opened since indexing
    Indexed(PathBuf),
    Open { path: PathBuf, store: S },
}

impl<S> StoreSlot<S> {
    fn path(&self) -> &Path {
        match self {
            StoreSlot::Indexed(path) => path,
            StoreSlot::Open { path, .. } => path,
        }
    }
}

/// Open stores grow monotonically; nothing is evicted until the cache is dropped.
#[derive(Debug)]
pub struct StoreCache<S> {
    slots: HashMap<StoreKey, StoreSlot<S>>,
}

impl<S> Default for StoreCache<S> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<S> StoreCache<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember where the store for `key` lives without opening it.
    pub fn register(&mut self, key: StoreKey, path: PathBuf) {
        self.slots.entry(key).or_insert(StoreSlot::Indexed(path));
    }

    pub fn insert_open(&mut self, key: StoreKey, path: PathBuf, store: S) {
        self.slots.insert(key, StoreSlot::Open { path, store });
    }

    /// The store for `key`, opening it on first use. `None` if `key` was never registered.
    pub fn get_or_open<O>(&mut self, key: &StoreKey, opener: &O) -> Result<Option<&S>>
    where
        O: StoreOpener<Store = S>,
    {
        let Some(slot) = self.slots.get_mut(key) else {
            return Ok(None);
        };

        if let StoreSlot::Indexed(path) = &mut *slot {
            debug!(role = %key.role, key = %key.key, path = %path.display(), "Opening store");
            let store = opener.open(path)?;
            let path = std::mem::take(path);
            *slot = StoreSlot::Open { path, store };
        }

        match slot {
            StoreSlot::Open { store, .. } => Ok(Some(&*store)),
            StoreSlot::Indexed(_) => Ok(None),
        }
    }

    pub fn is_open(&self, key: &StoreKey) -> bool {
        matches!(self.slots.get(key), Some(StoreSlot::Open { .. }))
    }

    pub fn is_registered(&self, key: &StoreKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn open_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, StoreSlot::Open { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn path(&self, key: &StoreKey) -> Option<&Path> {
        self.slots.get(key).map(StoreSlot::path)
    }
}
