//! The evaluation seam
//!
//! The controller never computes anything itself. It prepares an expression
//! string and asks an [`Evaluate`] implementation for a number.

use super::expression::FACTORIAL_FN;
use super::{CalcError, CalcResult};

/// Largest `n` whose factorial is finite in `f64`
const MAX_FACTORIAL: f64 = 170.0;

/// `n!` for non-negative integers, NaN otherwise
///
/// Past 170 the product overflows, so the result is infinite.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
#[must_use]
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > MAX_FACTORIAL {
        return f64::INFINITY;
    }
    (2..=n as u64).fold(1.0, |acc, k| acc * k as f64)
}

/// Turns an expression string into a number
pub trait Evaluate {
    /// Evaluates `expression`, failing on anything malformed
    fn evaluate(&self, expression: &str) -> CalcResult<f64>;
}

/// Any `Fn(&str) -> CalcResult<f64>` is an evaluator; handy for
/// deterministic stand-ins.
impl<F> Evaluate for F
where
    F: Fn(&str) -> CalcResult<f64>,
{
    fn evaluate(&self, expression: &str) -> CalcResult<f64> {
        self(expression)
    }
}

/// Production evaluator backed by the `meval` crate.
///
/// `meval` provides `sqrt`, `sin`, `cos`, `tan`, `ln`, `pi`, `e` and `^` out
/// of the box; `log10` and the factorial function are registered on top.
#[derive(Debug, Default, Clone, Copy)]
pub struct MevalEvaluator;

impl MevalEvaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn context() -> meval::Context<'static> {
        let mut ctx = meval::Context::new();
        ctx.func("log10", f64::log10);
        ctx.func(FACTORIAL_FN, factorial);
        ctx
    }
}

impl Evaluate for MevalEvaluator {
    fn evaluate(&self, expression: &str) -> CalcResult<f64> {
        let parsed = expression
            .parse::<meval::Expr>()
            .map_err(|e| CalcError::Evaluation(e.to_string()))?;
        parsed
            .eval_with_context(Self::context())
            .map_err(|e| CalcError::Evaluation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> CalcResult<f64> {
        MevalEvaluator::new().evaluate(expr)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("2 + 3").unwrap(), 5.0);
        assert_eq!(eval("10 - 4").unwrap(), 6.0);
        assert_eq!(eval("6 * 7").unwrap(), 42.0);
        assert_eq!(eval("20 / 4").unwrap(), 5.0);
    }

    #[test]
    fn test_precedence_and_power() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("2 * 3 ^ 2").unwrap(), 18.0);
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(16)").unwrap(), 4.0);
        assert_eq!(eval("log10(100)").unwrap(), 2.0);
        assert_eq!(eval("ln(1)").unwrap(), 0.0);
        assert_eq!(eval("sin(0)").unwrap(), 0.0);
    }

    #[test]
    fn test_pi_constant() {
        assert_eq!(eval("pi").unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn test_factorial_function() {
        assert_eq!(eval("fact(5)").unwrap(), 120.0);
        assert_eq!(eval("fact(0)").unwrap(), 1.0);
        assert_eq!(eval("fact((2+1))").unwrap(), 6.0);
        assert_eq!(eval("2*fact(3)").unwrap(), 12.0);
    }

    #[test]
    fn test_factorial_domain() {
        assert!(factorial(-1.0).is_nan());
        assert!(factorial(2.5).is_nan());
        assert!(factorial(f64::NAN).is_nan());
        assert_eq!(factorial(1.0), 1.0);
        assert!(factorial(170.0).is_finite());
        assert!(factorial(171.0).is_infinite());
    }

    #[test]
    fn test_postfix_bang_is_not_evaluator_syntax() {
        assert!(eval("5!").is_err());
    }

    #[test]
    fn test_malformed_expression() {
        assert!(matches!(eval("1+"), Err(CalcError::Evaluation(_))));
        assert!(matches!(eval("(2"), Err(CalcError::Evaluation(_))));
        assert!(matches!(eval("foo(2)"), Err(CalcError::Evaluation(_))));
    }

    #[test]
    fn test_division_by_zero_is_not_an_evaluator_error() {
        // rejected later by the result validator
        assert!(eval("1/0").unwrap().is_infinite());
    }

    #[test]
    fn test_closure_evaluator() {
        let fixed = |_: &str| -> CalcResult<f64> { Ok(7.0) };
        assert_eq!(fixed.evaluate("anything").unwrap(), 7.0);
    }
}
