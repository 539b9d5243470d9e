//! Calculator runner: terminal keypad loop and scripted key presses

use std::io::{self, IsTerminal, Write};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use scicalc::core::DisplayController;
use scicalc::tui::{render, CalculatorApp};
use tracing::{debug, info, warn};

use crate::config::{CliConfig, RunMode};
use crate::error::{CliError, CliResult};

/// Runs the calculator the way the configuration asks
#[derive(Debug)]
pub struct CalculatorRunner {
    config: CliConfig,
}

impl CalculatorRunner {
    /// Create a new runner
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    fn controller(&self) -> DisplayController {
        DisplayController::new().with_angle_mode(self.config.angle_mode)
    }

    /// Runs in the configured mode, writing scripted output to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> CliResult<()> {
        match &self.config.mode {
            RunMode::Scripted(tokens) => {
                self.run_scripted(tokens, out)?;
                Ok(())
            }
            RunMode::Interactive => self.run_interactive(),
        }
    }

    /// Presses every token in order, prints the final display and returns it
    ///
    /// An unknown token stops the run with an error.
    pub fn run_scripted<W: Write>(&self, tokens: &[String], out: &mut W) -> CliResult<String> {
        if tokens.is_empty() {
            return Err(CliError::invalid_argument("--keys needs at least one key token"));
        }

        let mut controller = self.controller();
        for token in tokens {
            controller.handle_token(token)?;
        }
        info!(keys = tokens.len(), display = controller.display(), "scripted run finished");

        writeln!(out, "{}", controller.display())?;
        Ok(controller.display().to_string())
    }

    /// Opens the keypad on the terminal until the user quits
    pub fn run_interactive(&self) -> CliResult<()> {
        if !io::stdout().is_terminal() {
            return Err(CliError::invalid_argument(
                "interactive mode needs a terminal; use --keys to script key presses",
            ));
        }

        enable_raw_mode()?;
        let screen = ScreenGuard::enter(io::stdout())?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let mut app = CalculatorApp::with_controller(self.controller());
        let result = event_loop(&mut terminal, &mut app);

        drop(screen);
        terminal.show_cursor()?;

        result
    }
}

/// Alternate screen and mouse capture, undone on drop along with raw mode
///
/// Dropping restores the terminal on every exit path, including a failure
/// halfway through [`ScreenGuard::enter`].
struct ScreenGuard<W: Write> {
    out: W,
}

impl<W: Write> ScreenGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture) {
            warn!(error = %e, "failed to restore the screen");
        }
    }
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    debug!("keypad opened");

    while !app.should_quit() {
        let screen = terminal.draw(|f| render(app, f))?.area;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click(screen, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    debug!(display = app.display(), "keypad closed");
    Ok(())
}
