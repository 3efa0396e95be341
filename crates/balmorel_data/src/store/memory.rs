//! In-process stores of prebuilt record batches, keyed by file path.

use super::{RecordStore, StoreOpener, SymbolInfo, SymbolKind};
use crate::error::{DataError, Result};
use arrow::array::RecordBatch;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct MemorySymbol {
    batch: RecordBatch,
    domains: Vec<String>,
    description: Option<String>,
    kind: Option<SymbolKind>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    symbols: BTreeMap<String, MemorySymbol>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol. Every Utf8 column is treated as a domain.
    pub fn with_symbol(self, name: impl Into<String>, batch: RecordBatch) -> Self {
        let domains = batch
            .schema()
            .fields()
            .iter()
            .filter(|field| field.data_type() == &arrow::datatypes::DataType::Utf8)
            .map(|field| field.name().clone())
            .collect();
        self.with_described_symbol(name, batch, domains, None)
    }

    pub fn with_described_symbol(
        mut self,
        name: impl Into<String>,
        batch: RecordBatch,
        domains: Vec<String>,
        description: Option<String>,
    ) -> Self {
        self.symbols.insert(
            name.into(),
            MemorySymbol {
                batch,
                domains,
                description,
                kind: None,
            },
        );
        self
    }

    /// Set the type of an already added symbol.
    pub fn with_kind(mut self, name: &str, kind: SymbolKind) -> Self {
        if let Some(symbol) = self.symbols.get_mut(name) {
            symbol.kind = Some(kind);
        }
        self
    }
}

impl RecordStore for MemoryStore {
    fn symbol_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }

    fn has_records(&self, symbol: &str) -> bool {
        self.symbols
            .get(symbol)
            .map(|s| s.batch.num_rows() > 0)
            .unwrap_or(false)
    }

    fn records(&self, symbol: &str) -> Result<RecordBatch> {
        self.symbols
            .get(symbol)
            .map(|s| s.batch.clone())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    fn symbol_info(&self, symbol: &str) -> Option<SymbolInfo> {
        self.symbols.get(symbol).map(|s| SymbolInfo {
            name: symbol.to_string(),
            kind: s.kind,
            dimension: s.domains.len(),
            domains: s.domains.clone(),
            records: s.batch.num_rows(),
            description: s.description.clone(),
        })
    }
}

/// Hands out clones of registered stores; unknown paths fail with `PathNotFound`.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    stores: HashMap<PathBuf, MemoryStore>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, store: MemoryStore) {
        self.stores.insert(path.into(), store);
    }

    pub fn with_store(mut self, path: impl Into<PathBuf>, store: MemoryStore) -> Self {
        self.insert(path, store);
        self
    }
}

impl StoreOpener for MemoryOpener {
    type Store = MemoryStore;

    fn open(&self, path: &Path) -> Result<MemoryStore> {
        self.stores
            .get(path)
            .cloned()
            .ok_or_else(|| DataError::PathNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(rows: &[(&str, f64)]) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("AAA", DataType::Utf8, true),
            Field::new("value", DataType::Float64, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(
                    rows.iter().map(|(a, _)| *a).collect::<Vec<_>>(),
                )),
                Arc::new(Float64Array::from(
                    rows.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
                )),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_store_reports_records() {
        let store = MemoryStore::new()
            .with_symbol("FULL", batch(&[("DK1", 1.0)]))
            .with_symbol("EMPTY", batch(&[]));

        assert_eq!(store.symbol_names(), vec!["EMPTY", "FULL"]);
        assert!(store.has_records("FULL"));
        assert!(!store.has_records("EMPTY"));
        assert!(!store.has_records("MISSING"));
        assert_eq!(store.records("FULL").unwrap().num_rows(), 1);
        assert!(matches!(
            store.records("MISSING"),
            Err(DataError::SymbolNotFound(_))
        ));

        let info = store.symbol_info("FULL").unwrap();
        assert_eq!(info.dimension, 1);
        assert_eq!(info.domains, vec!["AAA"]);
        assert_eq!(info.records, 1);
        assert_eq!(info.kind, None);

        let typed = store.with_kind("FULL", SymbolKind::Parameter);
        assert_eq!(
            typed.symbol_info("FULL").unwrap().kind,
            Some(SymbolKind::Parameter)
        );
    }

    #[test]
    fn test_opener_unknown_path() {
        let opener = MemoryOpener::new().with_store("/a.gdx", MemoryStore::new());
        assert!(opener.open(Path::new("/a.gdx")).is_ok());
        assert!(matches!(
            opener.open(Path::new("/b.gdx")),
            Err(DataError::PathNotFound(_))
        ));
    }
}
