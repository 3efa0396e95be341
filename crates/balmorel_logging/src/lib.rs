//! Shared logging setup for Balmorel binaries.
//!
//! Logs go to stderr and to a size-rotated file under `$BALMOREL_HOME/logs`
//! (default `~/.balmorel/logs`). `RUST_LOG` overrides the default filter.

pub mod rolling;

use anyhow::{anyhow, Context, Result};
use rolling::{RollingLog, RotationPolicy, SharedLog};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "balmorel=info,balmorel_scenario=info,balmorel_data=info";
const VERBOSE_LOG_FILTER: &str = "balmorel=debug,balmorel_scenario=debug,balmorel_data=debug";
const HOME_ENV: &str = "BALMOREL_HOME";

pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Debug output on the console
    pub verbose: bool,
    /// Warnings and errors only on the console
    pub quiet: bool,
}

/// Install the global subscriber. Returns the live log file path.
pub fn init_logging(config: LogConfig<'_>) -> Result<PathBuf> {
    let dir = ensure_logs_dir()?;
    let log = RollingLog::open(&dir, config.app_name, RotationPolicy::default())
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
    let log_path = log.live_path();

    let file_filter = default_filter(config.verbose);
    let console_filter = if config.quiet {
        EnvFilter::new("warn")
    } else {
        default_filter(config.verbose)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(SharedLog::new(log))
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(log_path)
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    })
}

/// `$BALMOREL_HOME`, or `~/.balmorel`.
pub fn balmorel_home() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".balmorel"))
        .ok_or_else(|| anyhow!("Could not determine home directory; set {}", HOME_ENV))
}

pub fn logs_dir() -> Result<PathBuf> {
    Ok(balmorel_home()?.join("logs"))
}

pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}
