//! Scientific keypad for the terminal calculator
//!
//! Visual buttons make the calculator state obvious. Every button carries
//! the [`Key`] it sends, a short label, an accessibility description and a
//! visual class. Buttons can be clicked with the mouse and light up when
//! the matching key is typed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{AngleMode, Function, Key, Operator};

/// Visual grouping of buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonClass {
    /// Digits and the decimal point
    Number,
    /// Arithmetic operators
    Operator,
    /// Functions, constants, memory and editing keys
    Function,
    /// All clear
    Clear,
    /// Evaluate
    Equals,
}

impl ButtonClass {
    /// Stable class name, e.g. for styling hooks
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "num",
            Self::Operator => "op",
            Self::Function => "func",
            Self::Clear => "clear",
            Self::Equals => "equals",
        }
    }

    /// Terminal style for an idle button
    #[must_use]
    pub fn style(self) -> Style {
        match self {
            Self::Number => Style::default().fg(Color::White),
            Self::Operator => Style::default().fg(Color::Yellow),
            Self::Function => Style::default().fg(Color::Cyan),
            Self::Clear => Style::default().fg(Color::Red),
            Self::Equals => Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The key this button sends
    pub key: Key,
    /// Text on the button
    pub label: &'static str,
    /// Accessibility description
    pub description: &'static str,
    /// Visual class
    pub class: ButtonClass,
    /// Whether the button is currently pressed/highlighted
    pub pressed: bool,
}

const DIGIT_NAMES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl KeypadButton {
    /// Creates a button
    #[must_use]
    pub const fn new(
        key: Key,
        label: &'static str,
        description: &'static str,
        class: ButtonClass,
    ) -> Self {
        Self {
            key,
            label,
            description,
            class,
            pressed: false,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        let i = usize::from(d.min(9));
        Self::new(
            Key::Digit(d),
            DIGIT_LABELS[i],
            DIGIT_NAMES[i],
            ButtonClass::Number,
        )
    }

    /// Creates an operator button
    #[must_use]
    pub const fn operator(op: Operator) -> Self {
        let (label, description) = match op {
            Operator::Add => ("+", "add"),
            Operator::Subtract => ("−", "subtract"),
            Operator::Multiply => ("×", "multiply"),
            Operator::Divide => ("÷", "divide"),
            Operator::Power => ("xʸ", "power"),
        };
        let class = match op {
            Operator::Power => ButtonClass::Function,
            _ => ButtonClass::Operator,
        };
        Self::new(Key::Operator(op), label, description, class)
    }

    /// Creates a named-function button
    #[must_use]
    pub const fn function(f: Function) -> Self {
        let (label, description) = match f {
            Function::Sin => ("sin", "sine"),
            Function::Cos => ("cos", "cosine"),
            Function::Tan => ("tan", "tangent"),
            Function::Sqrt => ("√x", "square root"),
            Function::Log => ("log", "base-10 logarithm"),
            Function::Ln => ("ln", "natural logarithm"),
        };
        Self::new(Key::Function(f), label, description, ButtonClass::Function)
    }

    /// Creates a function-class button for a command key
    #[must_use]
    pub const fn command(key: Key, label: &'static str, description: &'static str) -> Self {
        Self::new(key, label, description, ButtonClass::Function)
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Label to draw; the angle toggle shows the active mode
    #[must_use]
    pub fn display_label(&self, mode: AngleMode) -> &'static str {
        match self.key {
            Key::ToggleAngle => mode.label(),
            _ => self.label,
        }
    }
}

/// The keypad layout - a 7x5 grid of buttons
/// ```text
/// [RAD] [sin] [cos] [tan] [ ⌫ ]
/// [ln ] [log] [√x ] [xʸ ] [AC ]
/// [ ( ] [ ) ] [n! ] [ π ] [ ± ]
/// [ 7 ] [ 8 ] [ 9 ] [ ÷ ] [M+ ]
/// [ 4 ] [ 5 ] [ 6 ] [ × ] [M- ]
/// [ 1 ] [ 2 ] [ 3 ] [ − ] [MR ]
/// [ 0 ] [ . ] [MC ] [ + ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard scientific keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonClass as C;

        let buttons = vec![
            // Row 0
            KeypadButton::command(Key::ToggleAngle, "DEG/RAD", "switch between radians and degrees"),
            KeypadButton::function(Function::Sin),
            KeypadButton::function(Function::Cos),
            KeypadButton::function(Function::Tan),
            KeypadButton::command(Key::Backspace, "⌫", "delete last character"),
            // Row 1
            KeypadButton::function(Function::Ln),
            KeypadButton::function(Function::Log),
            KeypadButton::function(Function::Sqrt),
            KeypadButton::operator(Operator::Power),
            KeypadButton::new(Key::AllClear, "AC", "clear all", C::Clear),
            // Row 2
            KeypadButton::command(Key::OpenParen, "(", "open parenthesis"),
            KeypadButton::command(Key::CloseParen, ")", "close parenthesis"),
            KeypadButton::command(Key::Factorial, "n!", "factorial"),
            KeypadButton::command(Key::Pi, "π", "pi"),
            KeypadButton::command(Key::Negate, "±", "change sign"),
            // Row 3
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            KeypadButton::operator(Operator::Divide),
            KeypadButton::command(Key::MemoryAdd, "M+", "add to memory"),
            // Row 4
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            KeypadButton::operator(Operator::Multiply),
            KeypadButton::command(Key::MemorySubtract, "M-", "subtract from memory"),
            // Row 5
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            KeypadButton::operator(Operator::Subtract),
            KeypadButton::command(Key::MemoryRecall, "MR", "recall memory"),
            // Row 6
            KeypadButton::digit(0),
            KeypadButton::new(Key::Decimal, ".", "decimal point", C::Number),
            KeypadButton::command(Key::MemoryClear, "MC", "clear memory"),
            KeypadButton::operator(Operator::Add),
            KeypadButton::new(Key::Equals, "=", "equals", C::Equals),
        ];

        Self {
            buttons,
            cols: 5,
            rows: 7,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Finds the button that sends `key`
    #[must_use]
    pub fn find_button(&self, key: Key) -> Option<usize> {
        self.buttons.iter().position(|b| b.key == key)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button that sends `key`, releasing the others
    pub fn highlight(&mut self, key: Key) {
        self.release_all();
        if let Some(idx) = self.find_button(key) {
            self.press_button(idx);
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position to button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let inner_x = rel_x - 1;
        let inner_y = rel_y - 1;

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;

        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = (inner_x / btn_width) as usize;
        let row = (inner_y / btn_height) as usize;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    mode: AngleMode,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, mode: AngleMode) -> Self {
        Self { keypad, mode }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if (inner.width as usize) < cols * 3 || (inner.height as usize) < rows {
            return; // Too small to render
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let style = if btn.pressed {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                btn.class.style()
            };

            let label = btn.display_label(self.mode);
            let text = if btn_width as usize >= label.chars().count() + 2 {
                format!("[{label}]")
            } else {
                label.to_string()
            };
            let text_width = text.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(text_width) / 2;
            let label_y = y + btn_height / 2;

            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(label_x, label_y, &Span::styled(text, style), btn_width);
            }
        }
    }
}
