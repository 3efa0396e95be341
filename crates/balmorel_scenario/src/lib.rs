//! Balmorel Scenario - Discovery & Classification
//!
//! Finds scenario folders under a root and sorts each scenario's data files
//! into roles by filename.
//!
//! # Layout
//!
//! ```text
//! root/                         root/ (single scenario)
//! ├── scen_a/                   ├── balopt.opt
//! │   ├── balopt.opt            └── output/
//! │   └── output/                   ├── x-input.gdx
//! │       ├── x-input.gdx           └── x-output.gdx
//! │       ├── x-output.gdx
//! │       └── x-output-2030.gdx
//! └── notes/   (no balopt.opt, skipped)
//! ```
//!
//! # Core Concepts
//!
//! - **Scenario**: a folder holding the control file, data files under `output/`
//! - **Role**: BM, Basis, Input, Output or OutputYear, decided by filename
//! - **Registry**: every scenario under a root, narrowed by capability filters

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod patterns;
pub mod registry;
pub mod scan_path;
pub mod summary;
pub mod types;

// Re-exports for convenience
pub use config::ScenarioConfig;
pub use diagnostics::Diagnostic;
pub use error::{Result, ScenarioError};
pub use filter::ScenarioFilter;
pub use patterns::{ClassificationRule, FileClass, FileClassifier};
pub use registry::ScenarioRegistry;
pub use scan_path::{expand_scan_path, validate_root};
pub use summary::RegistrySummary;
pub use types::{Role, ScenarioDescriptor};
