//! Tracing subscriber setup
//!
//! Scripted runs log to stderr. The interactive keypad owns the terminal, so
//! it only logs when a log file is given.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, RunMode};
use crate::error::{CliError, CliResult};

/// `RUST_LOG` if set, otherwise the directives for the configured verbosity
pub fn env_filter(config: &CliConfig) -> CliResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter_directives()))
        .map_err(|e| CliError::config(format!("invalid log filter: {e}")))
}

/// Installs the global subscriber for this run
pub fn init_logging(config: &CliConfig) -> CliResult<()> {
    let filter = env_filter(config)?;

    let installed = match (&config.log_file, &config.mode) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, RunMode::Scripted(_)) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        (None, RunMode::Interactive) => return Ok(()),
    };

    installed.map_err(|e| CliError::config(format!("logging already initialised: {e}")))
}
