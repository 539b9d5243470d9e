//! Keypad commands
//!
//! Every button on the keypad maps to exactly one [`Key`]. Tokens coming
//! from outside (scripts, the CLI, tests) are parsed with [`str::parse`].

use std::fmt;
use std::str::FromStr;

use super::CalcError;

/// Binary operators that are appended verbatim to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `^`
    Power,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// The character written into the display
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    /// Whether this operator terminates a number for the decimal-point guard.
    ///
    /// `^` does not.
    #[must_use]
    pub const fn splits_number(self) -> bool {
        !matches!(self, Self::Power)
    }
}

/// Named functions that open a call, e.g. `sin(`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Square root, written `√`
    Sqrt,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
}

impl Function {
    /// All functions in keypad order
    pub const ALL: [Self; 6] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sqrt,
        Self::Log,
        Self::Ln,
    ];

    /// Name as written into the display (without the parenthesis)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "√",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    /// Trigonometric functions take degrees in degree mode
    #[must_use]
    pub const fn is_trig(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }
}

/// A single keypad command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Arithmetic operator
    Operator(Operator),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Postfix `!`
    Factorial,
    /// The π constant
    Pi,
    /// Named function
    Function(Function),
    /// Reset the display (`AC`)
    AllClear,
    /// Remove the last character (`C`)
    Backspace,
    /// Switch between radians and degrees
    ToggleAngle,
    /// Evaluate (`=`)
    Equals,
    /// Flip the sign of the display (`±`)
    Negate,
    /// Add the display value to memory (`M+`)
    MemoryAdd,
    /// Subtract the display value from memory (`M-`)
    MemorySubtract,
    /// Append the memory value (`MR`)
    MemoryRecall,
    /// Reset memory to zero (`MC`)
    MemoryClear,
}

impl Key {
    /// Canonical token for this key, accepted back by [`Key::from_str`]
    #[must_use]
    pub fn token(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".into(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::OpenParen => "(".into(),
            Self::CloseParen => ")".into(),
            Self::Factorial => "!".into(),
            Self::Pi => "π".into(),
            Self::Function(f) => f.name().into(),
            Self::AllClear => "AC".into(),
            Self::Backspace => "C".into(),
            Self::ToggleAngle => "DEG/RAD".into(),
            Self::Equals => "=".into(),
            Self::Negate => "±".into(),
            Self::MemoryAdd => "M+".into(),
            Self::MemorySubtract => "M-".into(),
            Self::MemoryRecall => "MR".into(),
            Self::MemoryClear => "MC".into(),
        }
    }

    /// Text appended to the display for keys that insert text
    #[must_use]
    pub fn text(self) -> Option<String> {
        match self {
            Self::Digit(_)
            | Self::Decimal
            | Self::Operator(_)
            | Self::OpenParen
            | Self::CloseParen
            | Self::Factorial
            | Self::Pi => Some(self.token()),
            Self::Function(f) => Some(format!("{}(", f.name())),
            _ => None,
        }
    }

    /// Keys that start a fresh expression when a result is showing
    #[must_use]
    pub const fn starts_entry(self) -> bool {
        matches!(self, Self::Digit(_) | Self::Decimal | Self::OpenParen)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let key = match token {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                Self::Digit(token.as_bytes()[0] - b'0')
            }
            "." => Self::Decimal,
            "+" => Self::Operator(Operator::Add),
            "-" | "−" => Self::Operator(Operator::Subtract),
            "*" | "×" => Self::Operator(Operator::Multiply),
            "/" | "÷" => Self::Operator(Operator::Divide),
            "^" => Self::Operator(Operator::Power),
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "!" => Self::Factorial,
            "π" | "pi" => Self::Pi,
            "sin" => Self::Function(Function::Sin),
            "cos" => Self::Function(Function::Cos),
            "tan" => Self::Function(Function::Tan),
            "√" | "sqrt" => Self::Function(Function::Sqrt),
            "log" => Self::Function(Function::Log),
            "ln" => Self::Function(Function::Ln),
            "AC" => Self::AllClear,
            "C" | "⌫" => Self::Backspace,
            "DEG/RAD" => Self::ToggleAngle,
            "=" => Self::Equals,
            "±" => Self::Negate,
            "M+" => Self::MemoryAdd,
            "M-" => Self::MemorySubtract,
            "MR" => Self::MemoryRecall,
            "MC" => Self::MemoryClear,
            other => return Err(CalcError::UnknownKey(other.to_string())),
        };
        Ok(key)
    }
}
