//! CLI configuration

use scicalc::core::AngleMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::Cli;

/// Crates whose log output the verbosity level controls
pub const LOG_TARGETS: [&str; 2] = ["scicalc", "scicalc_cli"];

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Tracing level name for filter directives
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// How the calculator is driven
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Terminal keypad
    Interactive,
    /// Press these key tokens, print the display
    Scripted(Vec<String>),
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Angle mode at start-up
    pub angle_mode: AngleMode,
    /// Log file, if any
    pub log_file: Option<PathBuf>,
    /// Interactive or scripted
    pub mode: RunMode,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            angle_mode: AngleMode::Radians,
            log_file: None,
            mode: RunMode::Interactive,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_angle_mode(if cli.degrees {
                AngleMode::Degrees
            } else {
                AngleMode::Radians
            });
        if let Some(path) = &cli.log_file {
            config = config.with_log_file(path.clone());
        }
        if cli.is_scripted() {
            config = config.with_keys(cli.key_tokens());
        }
        config
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the start-up angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Switch to scripted mode with these key tokens
    #[must_use]
    pub fn with_keys(mut self, tokens: Vec<String>) -> Self {
        self.mode = RunMode::Scripted(tokens);
        self
    }

    /// Default filter directives, e.g. `scicalc=warn,scicalc_cli=warn`
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let level = self.verbosity.level();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}
