//! Unified keypad driver
//!
//! **Write the scenario once, run it against every front end.** The same
//! key sequences are replayed directly on the controller and through the
//! terminal app, and must leave both in the same state.

use crate::core::evaluator::{Evaluate, MevalEvaluator};
use crate::core::{AngleMode, CalcResult, DisplayController, ERROR_MARKER};

/// Abstract driver for keypad interactions
///
/// # Example
///
/// ```rust
/// use scicalc::driver::{verify_memory_flow, ControllerDriver};
///
/// let mut driver = ControllerDriver::new();
/// verify_memory_flow(&mut driver);
/// ```
pub trait KeypadDriver {
    /// Presses the key named by `token`
    fn press(&mut self, token: &str) -> CalcResult<()>;

    /// Current display text
    fn display(&self) -> String;

    /// Current angle mode
    fn angle_mode(&self) -> AngleMode;

    /// Memory register value
    fn memory(&self) -> f64;

    /// Whether the display holds a just-computed result
    fn result_shown(&self) -> bool;

    /// Presses every whitespace-separated token in order
    fn press_all(&mut self, tokens: &str) -> CalcResult<()> {
        for token in tokens.split_whitespace() {
            self.press(token)?;
        }
        Ok(())
    }
}

/// Driver that talks to the controller directly
#[derive(Debug)]
pub struct ControllerDriver<E = MevalEvaluator> {
    controller: DisplayController<E>,
}

impl Default for ControllerDriver<MevalEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerDriver<MevalEvaluator> {
    /// Creates a driver around a fresh controller
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: DisplayController::new(),
        }
    }
}

impl<E: Evaluate> ControllerDriver<E> {
    /// Wraps an existing controller
    #[must_use]
    pub fn with_controller(controller: DisplayController<E>) -> Self {
        Self { controller }
    }

    /// Returns the underlying controller
    #[must_use]
    pub fn controller(&self) -> &DisplayController<E> {
        &self.controller
    }
}

impl<E: Evaluate> KeypadDriver for ControllerDriver<E> {
    fn press(&mut self, token: &str) -> CalcResult<()> {
        self.controller.handle_token(token)
    }

    fn display(&self) -> String {
        self.controller.display().to_string()
    }

    fn angle_mode(&self) -> AngleMode {
        self.controller.angle_mode()
    }

    fn memory(&self) -> f64 {
        self.controller.memory()
    }

    fn result_shown(&self) -> bool {
        self.controller.result_shown()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::KeypadDriver;
    use crate::core::{AngleMode, CalcResult, Key};
    use crate::tui::CalculatorApp;

    /// Driver that goes through the terminal app, keypad highlighting and
    /// keyboard mapping included
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Types a character as if it came from the terminal
        pub fn type_char(&mut self, c: char) {
            self.app
                .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    impl KeypadDriver for TuiDriver {
        fn press(&mut self, token: &str) -> CalcResult<()> {
            let key = token.parse::<Key>()?;
            self.app.press(key);
            Ok(())
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn angle_mode(&self) -> AngleMode {
            self.app.controller().angle_mode()
        }

        fn memory(&self) -> f64 {
            self.app.controller().memory()
        }

        fn result_shown(&self) -> bool {
            self.app.controller().result_shown()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenarios =====
// Each works with ANY KeypadDriver implementation

#[allow(clippy::panic)]
fn run<D: KeypadDriver>(driver: &mut D, tokens: &str) {
    driver
        .press_all(tokens)
        .unwrap_or_else(|e| panic!("scenario tokens {tokens:?} rejected: {e}"));
}

/// Digits then `=` show the same digits as a result
pub fn verify_integer_roundtrip<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC 1 2 3 =");
    assert_eq!(driver.display(), "123");
    assert!(driver.result_shown());
}

/// Basic arithmetic and precedence
pub fn verify_basic_arithmetic<D: KeypadDriver>(driver: &mut D) {
    for (tokens, expected) in [
        ("2 + 3 =", "5"),
        ("1 0 - 4 =", "6"),
        ("6 * 7 =", "42"),
        ("2 0 / 4 =", "5"),
        ("2 + 3 * 4 =", "14"),
        ("( 2 + 3 ) * 4 =", "20"),
        ("2 ^ 1 0 =", "1024"),
    ] {
        run(driver, "AC");
        run(driver, tokens);
        assert_eq!(driver.display(), expected, "tokens: {tokens}");
    }
}

/// `sin(90)` in degree mode is exactly 1
pub fn verify_degrees_mode<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC");
    if driver.angle_mode() == AngleMode::Radians {
        run(driver, "DEG/RAD");
    }
    run(driver, "sin 9 0 ) =");
    assert_eq!(driver.display(), "1");
    run(driver, "DEG/RAD AC");
    assert_eq!(driver.angle_mode(), AngleMode::Radians);
}

/// M+ then AC then MR brings the value back
pub fn verify_memory_flow<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC MC 5 M+ AC MR");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.memory(), 5.0);
    run(driver, "MC AC");
    assert_eq!(driver.memory(), 0.0);
}

/// A second `.` in the same number is ignored
pub fn verify_decimal_guard<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC 1 . 2 .");
    assert_eq!(driver.display(), "1.2");
}

/// A malformed expression shows the error marker; the next digit starts over
pub fn verify_error_recovery<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC 1 + =");
    assert_eq!(driver.display(), ERROR_MARKER);
    assert!(!driver.result_shown());
    run(driver, "3");
    assert_eq!(driver.display(), "3");
}

/// `AC` resets the display and result flag but leaves memory alone
pub fn verify_all_clear<D: KeypadDriver>(driver: &mut D) {
    run(driver, "AC MC 8 M+ 2 + 2 = AC");
    assert_eq!(driver.display(), "0");
    assert!(!driver.result_shown());
    assert_eq!(driver.memory(), 8.0);
    run(driver, "MC");
}

/// Runs every scenario above in sequence
pub fn run_all_scenarios<D: KeypadDriver>(driver: &mut D) {
    verify_integer_roundtrip(driver);
    verify_basic_arithmetic(driver);
    verify_degrees_mode(driver);
    verify_memory_flow(driver);
    verify_decimal_guard(driver);
    verify_error_recovery(driver);
    verify_all_clear(driver);
}
