//! `balmorel` - inspect and query Balmorel scenario results from the shell.

use balmorel_logging::{init_logging, LogConfig};
use balmorel_scenario::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod cli;

use cli::config::GlobalArgs;
use cli::files::{FileSelector, FilesArgs};
use cli::output::OutputFormat;
use cli::query::QueryArgs;
use cli::summary::SummaryArgs;
use cli::symbols::SymbolsArgs;

#[derive(Parser, Debug)]
#[command(name = "balmorel", version, about = "Inspect and query Balmorel scenario results")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// TOML config file (layout, data file extension, index options)
    #[arg(long, global = true, env = "BALMOREL_CONFIG")]
    config: Option<PathBuf>,

    /// Data file extension, overriding the config file (e.g. json)
    #[arg(long, global = true)]
    extension: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Overview of the scenarios under a root
    Summary {
        /// Scenario folder, or a folder of scenarios
        root: PathBuf,

        /// Keep only scenarios with: inout, yearly, both, all
        #[arg(short, long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List data files across scenarios
    #[command(group(
        clap::ArgGroup::new("selector")
            .required(true)
            .args(["role", "years", "name"])
    ))]
    Files {
        root: PathBuf,

        /// Files of one role: bm, basis, input, output, output_year
        #[arg(short, long)]
        role: Option<Role>,

        /// Year-tagged output files
        #[arg(long)]
        years: bool,

        /// Files with this exact name (extension optional)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        filter: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List symbols that have records, with their role
    Symbols {
        root: PathBuf,

        /// Only symbols of this role
        #[arg(short, long)]
        role: Option<Role>,

        #[arg(short, long)]
        filter: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Records of one symbol across scenarios
    Query {
        root: PathBuf,

        /// Symbol name (case sensitive)
        symbol: String,

        /// Scenario to include (repeatable; default all)
        #[arg(short = 's', long = "scenario")]
        scenarios: Vec<String>,

        #[arg(short, long)]
        filter: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Maximum rows to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn run_command(command: Commands, global: &GlobalArgs) -> anyhow::Result<()> {
    match command {
        Commands::Summary { root, filter, json } => {
            cli::summary::run(SummaryArgs { root, filter, json }, global)
        }
        Commands::Files {
            root,
            role,
            years,
            name,
            filter,
            json,
        } => {
            let selector = match (role, name) {
                (Some(role), _) => FileSelector::Role(role),
                (None, Some(name)) => FileSelector::Name(name),
                (None, None) if years => FileSelector::Years,
                (None, None) => anyhow::bail!("one of --role, --years or --name is required"),
            };
            cli::files::run(
                FilesArgs {
                    root,
                    selector,
                    filter,
                    json,
                },
                global,
            )
        }
        Commands::Symbols {
            root,
            role,
            filter,
            json,
        } => cli::symbols::run(
            SymbolsArgs {
                root,
                role,
                filter,
                json,
            },
            global,
        ),
        Commands::Query {
            root,
            symbol,
            scenarios,
            filter,
            format,
            limit,
        } => cli::query::run(
            QueryArgs {
                root,
                symbol,
                scenarios,
                filter,
                format,
                limit,
            },
            global,
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match init_logging(LogConfig {
        app_name: "balmorel",
        verbose: cli.verbose,
        quiet: !cli.verbose,
    }) {
        Ok(path) => debug!(log = %path.display(), "Logging initialized"),
        Err(err) => eprintln!("Warning: file logging disabled: {:#}", err),
    }

    let global = GlobalArgs {
        config: cli.config,
        extension: cli.extension,
    };

    match run_command(cli.command, &global) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_files_requires_selector() {
        assert!(Cli::try_parse_from(["balmorel", "files", "/runs"]).is_err());
        let cli = Cli::try_parse_from(["balmorel", "files", "/runs", "--role", "input"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Files {
                role: Some(Role::Input),
                ..
            }
        ));
    }

    #[test]
    fn test_query_arguments() {
        let cli = Cli::try_parse_from([
            "balmorel", "query", "/runs", "G_CAP", "-s", "base", "-s", "high", "--format", "csv",
            "-n", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Query {
                symbol,
                scenarios,
                format,
                limit,
                ..
            } => {
                assert_eq!(symbol, "G_CAP");
                assert_eq!(scenarios, vec!["base", "high"]);
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(limit, Some(10));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
