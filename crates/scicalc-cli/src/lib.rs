//! Scientific calculator CLI library
//!
//! Argument parsing, configuration, logging setup and the two ways of
//! driving the calculator: the interactive terminal keypad and scripted key
//! presses.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::Cli;
pub use config::{CliConfig, RunMode, Verbosity, LOG_TARGETS};
pub use error::{CliError, CliResult};
pub use runner::CalculatorRunner;
