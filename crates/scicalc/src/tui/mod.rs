//! Terminal front end
//!
//! Draws the display and keypad with ratatui and maps keyboard and mouse
//! input onto calculator keys.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonClass, Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI};
