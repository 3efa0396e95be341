//! Balmorel Test Utilities
//!
//! Fixtures shared by the integration tests of the Balmorel crates.
//!
//! # Usage
//!
//! ```rust,ignore
//! use balmorel_test_utils::{CountingOpener, ScenarioTree};
//!
//! let tree = ScenarioTree::new();
//! tree.scenario("base", &["base-input.gdx", "base-output.gdx"]);
//! tree.folder("notes", &[]); // skipped: no control file
//!
//! let registry = ScenarioRegistry::discover(tree.root()).unwrap();
//! ```

pub mod opener;
pub mod tables;
pub mod tree;

// Re-exports for convenience
pub use opener::CountingOpener;
pub use tables::{column_names, float_values, string_values, symbol_batch, JsonExport};
pub use tree::{ScenarioTree, CONTROL_FILE, OUTPUT_DIR};
