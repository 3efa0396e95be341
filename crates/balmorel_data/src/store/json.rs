//! Stores read from JSON exports of model data files.
//!
//! ```json
//! {
//!   "symbols": {
//!     "AREARESULTS": {
//!       "type": "parameter",
//!       "description": "Area results",
//!       "domains": ["AAA", "YYY"],
//!       "columns": ["AAA", "YYY", "value"],
//!       "records": [["DK1", "2030", 12.5], ["DK2", "2030", "Eps"]]
//!     }
//!   }
//! }
//! ```
//!
//! Domain columns are always Utf8, so set elements such as `NA` keep their
//! label. Any other column becomes Float64 when every non-null cell is a number
//! or a GAMS special value (`Inf`, `-Inf`, `NA`, `UNDF`, `Eps`), Boolean when
//! every non-null cell is a boolean, and Utf8 otherwise.

use super::{RecordStore, StoreOpener, SymbolInfo, SymbolKind};
use crate::error::{DataError, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, RecordBatch, RecordBatchOptions, StringArray};
use arrow::datatypes::{Field, Schema};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    symbols: BTreeMap<String, JsonSymbol>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonSymbol {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    domains: Vec<String>,
    columns: Vec<String>,
    #[serde(default)]
    records: Vec<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    symbols: BTreeMap<String, JsonSymbol>,
}

impl JsonStore {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataError::PathNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_str(path, &content)
    }

    /// Parse a document already in memory; `path` is only used in errors.
    pub fn from_str(path: &Path, content: &str) -> Result<Self> {
        let document: JsonDocument = serde_json::from_str(content)
            .map_err(|e| DataError::store(path, format!("invalid JSON export: {}", e)))?;

        for (name, symbol) in &document.symbols {
            validate_symbol(path, name, symbol)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            symbols: document.symbols,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_symbol(path: &Path, name: &str, symbol: &JsonSymbol) -> Result<()> {
    if let Some(kind) = &symbol.kind {
        kind.parse::<SymbolKind>()
            .map_err(|e| DataError::store(path, format!("symbol '{}': {}", name, e)))?;
    }
    let mut seen = HashSet::new();
    for column in &symbol.columns {
        if !seen.insert(column.as_str()) {
            return Err(DataError::store(
                path,
                format!("symbol '{}' has duplicate column '{}'", name, column),
            ));
        }
    }
    for (row, record) in symbol.records.iter().enumerate() {
        if record.len() != symbol.columns.len() {
            return Err(DataError::store(
                path,
                format!(
                    "symbol '{}' record {} has {} values, expected {}",
                    name,
                    row,
                    record.len(),
                    symbol.columns.len()
                ),
            ));
        }
    }
    Ok(())
}

impl RecordStore for JsonStore {
    fn symbol_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }

    fn has_records(&self, symbol: &str) -> bool {
        self.symbols
            .get(symbol)
            .map(|s| !s.records.is_empty())
            .unwrap_or(false)
    }

    fn records(&self, symbol: &str) -> Result<RecordBatch> {
        let data = self
            .symbols
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
        to_record_batch(data)
    }

    fn symbol_info(&self, symbol: &str) -> Option<SymbolInfo> {
        self.symbols.get(symbol).map(|s| SymbolInfo {
            name: symbol.to_string(),
            kind: s.kind.as_deref().and_then(|kind| kind.parse().ok()),
            dimension: s.domains.len(),
            domains: s.domains.clone(),
            records: s.records.len(),
            description: s.description.clone(),
        })
    }
}

/// Opens [`JsonStore`]s from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStoreOpener;

impl StoreOpener for JsonStoreOpener {
    type Store = JsonStore;

    fn open(&self, path: &Path) -> Result<JsonStore> {
        JsonStore::open(path)
    }
}

fn to_record_batch(symbol: &JsonSymbol) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(symbol.columns.len());
    let mut arrays = Vec::with_capacity(symbol.columns.len());

    for (idx, name) in symbol.columns.iter().enumerate() {
        let cells: Vec<&Value> = symbol.records.iter().map(|record| &record[idx]).collect();
        let array = if symbol.domains.contains(name) {
            text_array(&cells)
        } else {
            column_array(&cells)
        };
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(symbol.records.len()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

fn column_array(cells: &[&Value]) -> ArrayRef {
    let has_values = cells.iter().any(|v| !v.is_null());

    if has_values && cells.iter().all(|v| v.is_null() || numeric_value(v).is_some()) {
        return Arc::new(Float64Array::from(
            cells.iter().map(|v| numeric_value(v)).collect::<Vec<_>>(),
        ));
    }

    if has_values && cells.iter().all(|v| v.is_null() || v.is_boolean()) {
        return Arc::new(BooleanArray::from(
            cells.iter().map(|v| v.as_bool()).collect::<Vec<_>>(),
        ));
    }

    text_array(cells)
}

fn text_array(cells: &[&Value]) -> ArrayRef {
    Arc::new(StringArray::from(
        cells.iter().map(|v| text_value(v)).collect::<Vec<_>>(),
    ))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "inf" | "+inf" => Some(f64::INFINITY),
            "-inf" => Some(f64::NEG_INFINITY),
            "na" | "undf" => Some(f64::NAN),
            "eps" => Some(-0.0),
            _ => None,
        },
        _ => None,
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
