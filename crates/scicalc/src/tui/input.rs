//! Keyboard input handling
//!
//! Every keypad button has a keyboard shortcut; mapping happens here so the
//! app never sees raw key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Function, Key, Operator};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a calculator key
    Press(Key),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c) => Self::key_for_char(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Enter => KeyAction::Press(Key::Equals),
            KeyCode::Backspace => KeyAction::Press(Key::Backspace),
            KeyCode::Esc | KeyCode::Delete => KeyAction::Press(Key::AllClear),
            _ => KeyAction::None,
        }
    }

    /// Calculator key bound to a typed character
    #[must_use]
    pub fn key_for_char(c: char) -> Option<Key> {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Decimal,
            '+' => Key::Operator(Operator::Add),
            '-' => Key::Operator(Operator::Subtract),
            '*' => Key::Operator(Operator::Multiply),
            '/' => Key::Operator(Operator::Divide),
            '^' => Key::Operator(Operator::Power),
            '(' => Key::OpenParen,
            ')' => Key::CloseParen,
            '!' => Key::Factorial,
            '=' => Key::Equals,
            'p' => Key::Pi,
            's' => Key::Function(Function::Sin),
            'c' => Key::Function(Function::Cos),
            't' => Key::Function(Function::Tan),
            'r' => Key::Function(Function::Sqrt),
            'l' => Key::Function(Function::Log),
            'n' => Key::Function(Function::Ln),
            'd' => Key::ToggleAngle,
            'm' => Key::MemoryAdd,
            'M' => Key::MemorySubtract,
            'R' => Key::MemoryRecall,
            'x' => Key::MemoryClear,
            'i' => Key::Negate,
            _ => return None,
        };
        Some(key)
    }
}
