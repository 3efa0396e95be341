//! Record store seam.
//!
//! A store is one opened data file exposing named symbols, each carrying zero
//! or more records. The index and query layers only ever talk to stores through
//! these traits, so the file format stays pluggable.

pub mod json;
pub mod memory;

use crate::error::Result;
use arrow::array::RecordBatch;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use json::{JsonStore, JsonStoreOpener};
pub use memory::{MemoryOpener, MemoryStore};

/// GAMS symbol type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Set,
    Alias,
    Parameter,
    Variable,
    Equation,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Set => "set",
            SymbolKind::Alias => "alias",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Variable => "variable",
            SymbolKind::Equation => "equation",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(SymbolKind::Set),
            "alias" => Ok(SymbolKind::Alias),
            "parameter" | "par" => Ok(SymbolKind::Parameter),
            "variable" | "var" => Ok(SymbolKind::Variable),
            "equation" | "equ" => Ok(SymbolKind::Equation),
            other => Err(format!(
                "unknown symbol type '{}' (expected set, alias, parameter, variable or equation)",
                other
            )),
        }
    }
}

/// Metadata about one symbol in a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub name: String,
    /// Symbol type, when the store records it
    pub kind: Option<SymbolKind>,
    /// Number of domain columns
    pub dimension: usize,
    pub domains: Vec<String>,
    /// Number of records
    pub records: usize,
    pub description: Option<String>,
}

/// One opened data file.
pub trait RecordStore {
    /// Every symbol name in the store, empty ones included.
    fn symbol_names(&self) -> Vec<String>;

    /// True if `symbol` exists and carries at least one record.
    fn has_records(&self, symbol: &str) -> bool;

    /// Records of `symbol` as a table, rows in file order.
    fn records(&self, symbol: &str) -> Result<RecordBatch>;

    fn symbol_info(&self, symbol: &str) -> Option<SymbolInfo>;
}

/// Opens stores from paths.
pub trait StoreOpener {
    type Store: RecordStore;

    fn open(&self, path: &Path) -> Result<Self::Store>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Parameter".parse::<SymbolKind>().unwrap(), SymbolKind::Parameter);
        assert_eq!(" VAR ".parse::<SymbolKind>().unwrap(), SymbolKind::Variable);
        assert_eq!("equ".parse::<SymbolKind>().unwrap(), SymbolKind::Equation);
        assert!("table".parse::<SymbolKind>().is_err());
        assert_eq!(SymbolKind::Set.to_string(), "set");
    }
}
