//! CLI command definitions using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Scientific calculator with a terminal keypad
///
/// Without --keys, opens the interactive keypad (keyboard and mouse).
/// With --keys, presses the given keys and prints the final display.
#[derive(Parser, Debug)]
#[command(name = "scicalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Keys to press without opening the keypad, e.g. "sin 9 0 ) ="
    ///
    /// Tokens are separated by commas or whitespace. May be repeated.
    #[arg(short, long, value_name = "TOKENS", allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Start in degree mode
    #[arg(long)]
    pub degrees: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Key tokens from every `--keys` value, in order
    #[must_use]
    pub fn key_tokens(&self) -> Vec<String> {
        self.keys
            .iter()
            .flat_map(|chunk| chunk.split(|c: char| c == ',' || c.is_whitespace()))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether keys were given on the command line
    #[must_use]
    pub fn is_scripted(&self) -> bool {
        !self.keys.is_empty()
    }
}
