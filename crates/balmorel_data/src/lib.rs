//! Balmorel Data - Symbol Index & Queries
//!
//! Indexes the symbols held in every scenario's data files and answers
//! symbol queries with a single Arrow table across scenarios.
//!
//! # Example
//!
//! ```no_run
//! use balmorel_data::{DataManager, JsonStoreOpener};
//! use balmorel_scenario::ScenarioRegistry;
//!
//! # fn main() -> balmorel_data::Result<()> {
//! let registry = ScenarioRegistry::discover("/runs/balmorel")?;
//! let mut manager = DataManager::new(registry, JsonStoreOpener)?;
//!
//! // All scenarios, tagged with a Scenario column
//! let capacity = manager.query("G_CAP_YCRAF", None::<&str>)?;
//!
//! // One scenario, no provenance columns
//! let base = manager.query("G_CAP_YCRAF", "base")?;
//! # let _ = (capacity, base);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod manager;
pub mod store;
pub mod table;

pub use cache::{ScenarioKey, StoreCache, StoreKey};
pub use config::{BalmorelConfig, IndexConfig};
pub use error::{DataError, Result};
pub use index::SymbolIndex;
pub use manager::{DataManager, QueryOutcome, ScenarioSelection};
pub use store::{
    JsonStore, JsonStoreOpener, MemoryOpener, MemoryStore, RecordStore, StoreOpener, SymbolInfo,
    SymbolKind,
};
pub use table::{concat_tables, empty_table, tag_provenance, SCENARIO_COLUMN, YEAR_COLUMN};
