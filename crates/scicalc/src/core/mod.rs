//! Calculator core: the display-buffer controller and its collaborators
//!
//! Nothing in here knows about terminals. The controller consumes [`Key`]s,
//! hands finished expressions to an [`Evaluate`] implementation and keeps
//! the display text renderable whatever happens.

pub mod controller;
pub mod evaluator;
pub mod expression;
pub mod format;
pub mod key;

pub use controller::{AngleMode, DisplayController, DisplayState, DEFAULT_DISPLAY, ERROR_MARKER};
pub use evaluator::{Evaluate, MevalEvaluator};
pub use key::{Function, Key, Operator};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The evaluator rejected the expression
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
    /// The evaluator produced a value that cannot be displayed
    #[error("Invalid result: {0}")]
    InvalidResult(Violation),
    /// A token that does not name any keypad key
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),
}

/// Reasons a raw evaluator result is rejected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Violation {
    /// NaN detected in result
    #[error("NaN detected")]
    NaN,
    /// Infinity detected in result
    #[error("Infinite value detected")]
    Infinite,
    /// Result exceeds maximum magnitude
    #[error("{0} exceeds maximum magnitude")]
    Overflow(f64),
}

/// Gate between the evaluator and the display.
///
/// The external evaluator answers `1/0` with infinity and `sqrt(-1)` with
/// NaN instead of failing; neither belongs on the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultValidator {
    /// Maximum allowed result magnitude
    pub max_magnitude: f64,
    /// Reject NaN/Infinity
    pub check_special_values: bool,
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultValidator {
    /// Default maximum magnitude (the largest finite `f64`)
    pub const DEFAULT_MAX_MAGNITUDE: f64 = f64::MAX;

    /// Creates a validator that only rejects non-finite values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_magnitude: Self::DEFAULT_MAX_MAGNITUDE,
            check_special_values: true,
        }
    }

    /// Creates a validator with custom maximum magnitude
    #[must_use]
    pub const fn with_max_magnitude(max_magnitude: f64) -> Self {
        Self {
            max_magnitude,
            check_special_values: true,
        }
    }

    /// Validates a raw evaluator result
    pub fn validate(&self, result: f64) -> Result<f64, Violation> {
        if self.check_special_values && result.is_nan() {
            return Err(Violation::NaN);
        }

        if self.check_special_values && result.is_infinite() {
            return Err(Violation::Infinite);
        }

        if result.abs() > self.max_magnitude {
            return Err(Violation::Overflow(result));
        }

        Ok(result)
    }
}

impl From<Violation> for CalcError {
    fn from(violation: Violation) -> Self {
        Self::InvalidResult(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display_evaluation() {
        let err = CalcError::Evaluation("unexpected token".into());
        assert_eq!(format!("{err}"), "Evaluation failed: unexpected token");
    }

    #[test]
    fn test_calc_error_display_invalid_result() {
        let err = CalcError::InvalidResult(Violation::NaN);
        assert_eq!(format!("{err}"), "Invalid result: NaN detected");
    }

    #[test]
    fn test_calc_error_display_unknown_key() {
        let err = CalcError::UnknownKey("foo".into());
        assert_eq!(format!("{err}"), "Unknown key: \"foo\"");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::Evaluation("x".into()));
        assert!(err.to_string().contains("Evaluation"));
    }

    #[test]
    fn test_violation_from() {
        let err: CalcError = Violation::Infinite.into();
        assert_eq!(err, CalcError::InvalidResult(Violation::Infinite));
    }

    #[test]
    fn test_violation_display_overflow() {
        let v = Violation::Overflow(1e200);
        assert!(format!("{v}").contains("exceeds maximum magnitude"));
    }

    #[test]
    fn test_validator_default() {
        let v = ResultValidator::default();
        assert_eq!(v.max_magnitude, ResultValidator::DEFAULT_MAX_MAGNITUDE);
        assert!(v.check_special_values);
    }

    #[test]
    fn test_validate_valid_result() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(42.0), Ok(42.0));
        assert_eq!(v.validate(-1e300), Ok(-1e300));
    }

    #[test]
    fn test_validate_nan() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(f64::NAN), Err(Violation::NaN));
    }

    #[test]
    fn test_validate_infinity() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(f64::INFINITY), Err(Violation::Infinite));
        assert_eq!(v.validate(f64::NEG_INFINITY), Err(Violation::Infinite));
    }

    #[test]
    fn test_validate_overflow() {
        let v = ResultValidator::with_max_magnitude(100.0);
        assert!(matches!(v.validate(150.0), Err(Violation::Overflow(_))));
        assert!(matches!(v.validate(-150.0), Err(Violation::Overflow(_))));
        assert_eq!(v.validate(100.0), Ok(100.0));
    }

    #[test]
    fn test_special_values_disabled() {
        let mut v = ResultValidator::new();
        v.check_special_values = false;
        assert!(v.validate(f64::NAN).is_ok());
    }
}
