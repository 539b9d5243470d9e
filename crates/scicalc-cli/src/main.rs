//! scicalc: scientific calculator with a terminal keypad
//!
//! ## Usage
//!
//! ```bash
//! scicalc                              # Open the keypad
//! scicalc --keys "2 ^ 1 0 ="           # Press keys, print the display
//! scicalc --degrees --keys "sin 9 0 ) ="
//! scicalc -vv --log-file calc.log      # Keypad with trace logging
//! ```

use clap::Parser;
use scicalc_cli::{logging, CalculatorRunner, Cli, CliConfig, CliError, CliResult};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli);

    if cli.print_config {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::config(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    logging::init_logging(&config)?;

    let runner = CalculatorRunner::new(config);
    runner.run(&mut std::io::stdout().lock())
}
