//! TUI Application State
//!
//! The app owns the controller and the keypad. Keyboard events, mouse clicks
//! and programmatic presses all end up in [`CalculatorApp::press`].

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tracing::trace;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui::keypad_area;
use crate::core::evaluator::{Evaluate, MevalEvaluator};
use crate::core::{DisplayController, Key};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<E = MevalEvaluator> {
    /// Display-buffer state machine
    controller: DisplayController<E>,
    /// Keypad with highlight state
    keypad: Keypad,
    /// Keyboard mapping
    input: InputHandler,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp<MevalEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp<MevalEvaluator> {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_controller(DisplayController::new())
    }
}

impl<E: Evaluate> CalculatorApp<E> {
    /// Creates an app around an existing controller
    #[must_use]
    pub fn with_controller(controller: DisplayController<E>) -> Self {
        Self {
            controller,
            keypad: Keypad::new(),
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Returns the controller
    #[must_use]
    pub fn controller(&self) -> &DisplayController<E> {
        &self.controller
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.controller.display()
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Lights up the matching button and forwards the key to the controller
    pub fn press(&mut self, key: Key) {
        self.keypad.highlight(key);
        self.controller.handle(key);
    }

    /// Handles a terminal key event
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        match self.input.handle_key(event) {
            KeyAction::Press(key) => self.press(key),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at `(x, y)` on a screen of size `screen`
    ///
    /// Returns the key that was pressed, if the click landed on a button.
    pub fn click(&mut self, screen: Rect, x: u16, y: u16) -> Option<Key> {
        let index = self.keypad.hit_test(keypad_area(screen), x, y)?;
        let key = self.keypad.get_button(index)?.key;
        trace!(x, y, %key, "keypad click");
        self.press(key);
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AngleMode, CalcError, CalcResult, ERROR_MARKER};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn type_str(app: &mut CalculatorApp, s: &str) {
        for c in s.chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.display(), "0");
        assert!(!app.should_quit());
        assert!(app.keypad().buttons().all(|b| !b.pressed));
    }

    #[test]
    fn test_app_default() {
        let app = CalculatorApp::default();
        assert_eq!(app.display(), "0");
    }

    #[test]
    fn test_app_with_controller() {
        let controller = DisplayController::new().with_angle_mode(AngleMode::Degrees);
        let app = CalculatorApp::with_controller(controller);
        assert_eq!(app.controller().angle_mode(), AngleMode::Degrees);
    }

    #[test]
    fn test_app_with_stand_in_evaluator() {
        let controller = DisplayController::with_evaluator(|e: &str| -> CalcResult<f64> {
            Err(CalcError::Evaluation(e.to_string()))
        });
        let mut app = CalculatorApp::with_controller(controller);
        app.press(Key::Digit(1));
        app.press(Key::Equals);
        assert_eq!(app.display(), ERROR_MARKER);
    }

    // ===== Press tests =====

    #[test]
    fn test_press_updates_display() {
        let mut app = CalculatorApp::new();
        app.press(Key::Digit(4));
        app.press(Key::Digit(2));
        assert_eq!(app.display(), "42");
    }

    #[test]
    fn test_press_highlights_button() {
        let mut app = CalculatorApp::new();
        app.press(Key::Digit(7));
        let pressed: Vec<_> = app.keypad().buttons().filter(|b| b.pressed).collect();
        assert_eq!(pressed.len(), 1);
        assert_eq!(pressed[0].key, Key::Digit(7));

        app.press(Key::Equals);
        let pressed: Vec<_> = app.keypad().buttons().filter(|b| b.pressed).collect();
        assert_eq!(pressed[0].key, Key::Equals);
    }

    // ===== Keyboard tests =====

    #[test]
    fn test_typing_an_expression() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "12+30=");
        assert_eq!(app.display(), "42");
        assert!(app.controller().result_shown());
    }

    #[test]
    fn test_enter_evaluates() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "2^8");
        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.display(), "256");
    }

    #[test]
    fn test_escape_clears() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "123");
        app.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.display(), "0");
    }

    #[test]
    fn test_backspace_key() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "123");
        app.handle_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.display(), "12");
    }

    #[test]
    fn test_letter_shortcuts() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "ds90)=");
        assert_eq!(app.controller().angle_mode(), AngleMode::Degrees);
        assert_eq!(app.display(), "1");
    }

    #[test]
    fn test_memory_shortcuts() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "5m");
        assert_eq!(app.controller().memory(), 5.0);
        type_str(&mut app, "2M");
        assert_eq!(app.controller().memory(), 3.0);
        type_str(&mut app, "x");
        assert_eq!(app.controller().memory(), 0.0);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "7z");
        assert_eq!(app.display(), "7");
    }

    // ===== Quit tests =====

    #[test]
    fn test_quit() {
        let mut app = CalculatorApp::new();
        assert!(!app.should_quit());
        app.quit();
        assert!(app.should_quit());
    }

    #[test]
    fn test_q_quits() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "q");
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = CalculatorApp::new();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert_eq!(app.display(), "0");
    }

    // ===== Click tests =====

    fn button_center(app: &CalculatorApp, screen: Rect, key: Key) -> (u16, u16) {
        let area = keypad_area(screen);
        let index = app.keypad().find_button(key).unwrap();
        let (rows, cols) = app.keypad().dimensions();
        let btn_w = (area.width - 2) / cols as u16;
        let btn_h = (area.height - 2) / rows as u16;
        let row = (index / cols) as u16;
        let col = (index % cols) as u16;
        (
            area.x + 1 + col * btn_w + btn_w / 2,
            area.y + 1 + row * btn_h + btn_h / 2,
        )
    }

    #[test]
    fn test_click_presses_button() {
        let screen = Rect::new(0, 0, 80, 30);
        let mut app = CalculatorApp::new();
        let keys = [
            Key::Digit(9),
            Key::Operator(crate::core::Operator::Multiply),
            Key::Digit(3),
            Key::Equals,
        ];
        for key in keys {
            let (x, y) = button_center(&app, screen, key);
            assert_eq!(app.click(screen, x, y), Some(key));
        }
        assert_eq!(app.display(), "27");
    }

    #[test]
    fn test_click_outside_keypad() {
        let screen = Rect::new(0, 0, 80, 30);
        let mut app = CalculatorApp::new();
        assert_eq!(app.click(screen, 0, 0), None);
        assert_eq!(app.display(), "0");
    }
}
