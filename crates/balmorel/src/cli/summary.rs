//! Summary command - overview of the scenarios under a root

use crate::cli::config::{load_config, open_registry, GlobalArgs};
use crate::cli::output::print_json;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SummaryArgs {
    pub root: PathBuf,
    pub filter: Option<String>,
    pub json: bool,
}

pub fn run(args: SummaryArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let registry = open_registry(&args.root, &config, args.filter.as_deref())?;

    if args.json {
        print_json(&registry.summary())?;
    } else {
        println!("{}", registry.summary());
        for diagnostic in registry.diagnostics() {
            println!("  note: {}", diagnostic);
        }
    }
    Ok(())
}
