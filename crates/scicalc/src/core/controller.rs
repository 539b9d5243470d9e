//! Display buffer controller
//!
//! A small state machine over four fields: the display text, the angle
//! mode, the memory register and the result-shown flag. Every key press is
//! handled to completion and always leaves the display renderable; the only
//! failure mode of evaluation is the `"Error"` marker on the display.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::evaluator::{Evaluate, MevalEvaluator};
use super::expression::prepare;
use super::format::{format_number, format_result};
use super::key::{Key, Operator};
use super::{CalcResult, ResultValidator};

/// Display text of a fresh calculator
pub const DEFAULT_DISPLAY: &str = "0";

/// Display text after a failed evaluation
pub const ERROR_MARKER: &str = "Error";

/// Unit used for trigonometric arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Radians (default)
    #[default]
    Radians,
    /// Degrees
    Degrees,
}

impl AngleMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    /// Short indicator shown on the display and the toggle button
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }
}

/// Everything the calculator remembers between key presses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Expression being typed, last result, or [`ERROR_MARKER`]
    pub display: String,
    /// Angle unit for trig functions
    pub angle_mode: AngleMode,
    /// Memory register
    pub memory: f64,
    /// The display holds a just-computed result
    pub result_shown: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
            angle_mode: AngleMode::Radians,
            memory: 0.0,
            result_shown: false,
        }
    }
}

impl DisplayState {
    /// Whether the display shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display == ERROR_MARKER
    }

    /// Replaces a bare `"0"` with `text`, otherwise appends it
    fn append(&mut self, text: &str) {
        if self.display == DEFAULT_DISPLAY {
            self.display = text.to_string();
        } else {
            self.display.push_str(text);
        }
    }

    fn reset_display(&mut self) {
        self.display = DEFAULT_DISPLAY.to_string();
    }
}

/// The keypad's event handler
#[derive(Debug, Clone)]
pub struct DisplayController<E = MevalEvaluator> {
    state: DisplayState,
    evaluator: E,
    validator: ResultValidator,
}

impl Default for DisplayController<MevalEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayController<MevalEvaluator> {
    /// Creates a controller backed by the `meval` evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(MevalEvaluator::new())
    }
}

impl<E: Evaluate> DisplayController<E> {
    /// Creates a controller with a custom evaluator
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            state: DisplayState::default(),
            evaluator,
            validator: ResultValidator::new(),
        }
    }

    /// Replaces the result validator
    #[must_use]
    pub fn with_validator(mut self, validator: ResultValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Starts in the given angle mode
    #[must_use]
    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.state.angle_mode = mode;
        self
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode
    }

    /// Memory register value
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.state.memory
    }

    /// Whether memory holds something other than zero
    #[must_use]
    pub fn has_memory(&self) -> bool {
        self.state.memory != 0.0
    }

    /// Whether the display holds a just-computed result
    #[must_use]
    pub fn result_shown(&self) -> bool {
        self.state.result_shown
    }

    /// Whether the display shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    /// Full state snapshot
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Parses `token` and handles it.
    ///
    /// Unknown tokens are rejected and leave the state untouched.
    pub fn handle_token(&mut self, token: &str) -> CalcResult<()> {
        match token.parse::<Key>() {
            Ok(key) => {
                self.handle(key);
                Ok(())
            }
            Err(e) => {
                warn!("ignoring token: {e}");
                Err(e)
            }
        }
    }

    /// Handles one key press
    pub fn handle(&mut self, key: Key) {
        trace!(%key, display = %self.state.display, "key press");

        if self.state.is_error() {
            self.state.reset_display();
            if key == Key::AllClear {
                return;
            }
        }

        if self.state.result_shown && key.starts_entry() {
            self.state.display = match key {
                Key::Decimal => "0.".to_string(),
                _ => key.token(),
            };
            self.state.result_shown = false;
            return;
        }

        self.state.result_shown = false;

        match key {
            Key::AllClear => self.state.reset_display(),
            Key::Backspace => self.backspace(),
            Key::ToggleAngle => {
                self.state.angle_mode = self.state.angle_mode.toggled();
                debug!(mode = ?self.state.angle_mode, "angle mode toggled");
            }
            Key::Equals => self.evaluate_display(),
            Key::Negate => self.negate(),
            Key::MemoryAdd => self.accumulate_memory(1.0),
            Key::MemorySubtract => self.accumulate_memory(-1.0),
            Key::MemoryRecall => {
                let recalled = format_number(self.state.memory);
                self.state.append(&recalled);
            }
            Key::MemoryClear => self.state.memory = 0.0,
            Key::Decimal => self.decimal_point(),
            Key::Digit(_)
            | Key::Operator(_)
            | Key::OpenParen
            | Key::CloseParen
            | Key::Factorial
            | Key::Pi
            | Key::Function(_) => {
                if let Some(text) = key.text() {
                    self.state.append(&text);
                }
            }
        }
    }

    fn backspace(&mut self) {
        let display = &mut self.state.display;
        if display.chars().count() > 1 {
            display.pop();
        } else {
            self.state.reset_display();
        }
    }

    fn negate(&mut self) {
        let display = &self.state.display;
        self.state.display = if display == DEFAULT_DISPLAY || display == ERROR_MARKER {
            DEFAULT_DISPLAY.to_string()
        } else if let Some(rest) = display.strip_prefix('-') {
            rest.to_string()
        } else {
            format!("-{display}")
        };
    }

    /// Appends `.` unless the number being typed already has one.
    ///
    /// The number is whatever follows the last `+ - * /`; parentheses and
    /// `^` do not start a new number.
    fn decimal_point(&mut self) {
        let current_number = self
            .state
            .display
            .rsplit(|c: char| {
                Operator::ALL
                    .iter()
                    .any(|op| op.splits_number() && op.symbol() == c)
            })
            .next()
            .unwrap_or_default();

        if !current_number.contains('.') {
            self.state.display.push('.');
        }
    }

    /// Evaluates the display with the current angle mode
    fn compute(&self) -> CalcResult<f64> {
        let expression = prepare(&self.state.display, self.state.angle_mode);
        let raw = self.evaluator.evaluate(&expression)?;
        Ok(self.validator.validate(raw)?)
    }

    fn evaluate_display(&mut self) {
        match self.compute() {
            Ok(value) => {
                let result = format_result(value);
                debug!(expression = %self.state.display, %result, "evaluated");
                self.state.display = result;
                self.state.result_shown = true;
            }
            Err(e) => {
                debug!(expression = %self.state.display, error = %e, "evaluation failed");
                self.state.display = ERROR_MARKER.to_string();
            }
        }
    }

    fn accumulate_memory(&mut self, sign: f64) {
        match self.compute() {
            Ok(value) => {
                self.state.memory += sign * value;
                debug!(memory = self.state.memory, "memory updated");
            }
            Err(e) => debug!(error = %e, "memory update skipped"),
        }
    }
}
