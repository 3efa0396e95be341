//! Query command - one symbol across scenarios as a single table

use crate::cli::config::{load_config, open_registry, GlobalArgs};
use crate::cli::error::data_error;
use crate::cli::output::{print_batch, OutputFormat};
use anyhow::Result;
use balmorel_data::{DataManager, JsonStoreOpener, ScenarioSelection};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct QueryArgs {
    pub root: PathBuf,
    pub symbol: String,
    pub scenarios: Vec<String>,
    pub filter: Option<String>,
    pub format: OutputFormat,
    pub limit: Option<usize>,
}

pub fn run(args: QueryArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let registry = open_registry(&args.root, &config, args.filter.as_deref())?;
    let mut manager = DataManager::with_config(registry, JsonStoreOpener, config.index.clone())
        .map_err(|e| data_error(e, &args.root))?;

    let selection = if args.scenarios.is_empty() {
        ScenarioSelection::All
    } else {
        ScenarioSelection::Named(args.scenarios.clone())
    };
    let outcome = manager
        .query_detailed(&args.symbol, selection)
        .map_err(|e| data_error(e, &args.root))?;

    for key in &outcome.skipped {
        info!(symbol = %args.symbol, key = %key, "No records");
    }

    let total = outcome.table.num_rows();
    if total == 0 {
        eprintln!("No records for '{}'", args.symbol);
        return Ok(());
    }

    let table = match args.limit {
        Some(limit) if limit < total => outcome.table.slice(0, limit),
        _ => outcome.table,
    };
    print_batch(&table, args.format)?;

    if table.num_rows() < total && args.format == OutputFormat::Table {
        eprintln!("Showing {} of {} rows", table.num_rows(), total);
    }
    Ok(())
}
