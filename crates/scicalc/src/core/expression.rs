//! Display text to evaluator syntax
//!
//! The display uses keypad symbols (`π`, `√`, postfix `!`) and calculator
//! conventions (`log` is base 10, `2π` is a product). The evaluator wants
//! plain identifiers, explicit `*` and function calls, and in degree mode trig
//! arguments need converting to radians before the call.

use std::sync::OnceLock;

use regex::Regex;

use super::controller::AngleMode;

/// π/180, multiplied into trig arguments in degree mode
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Name of the factorial function registered with the evaluator
pub const FACTORIAL_FN: &str = "fact";

/// Names the keypad can put on the display, longest first
const NAMES: [&str; 7] = ["sqrt", "sin", "cos", "tan", "log", "ln", "pi"];

#[allow(clippy::expect_used)]
fn trig_call() -> &'static Regex {
    static TRIG_CALL: OnceLock<Regex> = OnceLock::new();
    TRIG_CALL.get_or_init(|| Regex::new(r"(sin|cos|tan)\(").expect("static trig pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(String),
    Name(String),
    Symbol(char),
}

impl Token {
    fn is_constant(&self) -> bool {
        matches!(self, Self::Name(n) if n == "pi")
    }

    /// A value ends here: `2`, `pi`, `)`
    fn ends_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Symbol(')' | '!')) || self.is_constant()
    }

    /// A value starts here: `2`, `pi`, `sin`, `(`
    fn starts_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Name(_) | Self::Symbol('('))
    }

    fn push_to(&self, out: &mut String) {
        match self {
            Self::Number(n) => out.push_str(n),
            Self::Name(n) if n == "log" => out.push_str("log10"),
            Self::Name(n) => out.push_str(n),
            Self::Symbol(c) => out.push(*c),
        }
    }
}

fn tokenize(display: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = display.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            'π' => tokens.push(Token::Name("pi".into())),
            '√' => tokens.push(Token::Name("sqrt".into())),
            '0'..='9' | '.' => {
                let mut number = String::from(c);
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit() || **d == '.') {
                    number.push(d);
                    chars.next();
                }
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() => {
                let mut run = String::from(c);
                while let Some(&l) = chars.peek().filter(|l| l.is_ascii_alphabetic()) {
                    run.push(l);
                    chars.next();
                }
                split_names(&run, &mut tokens);
            }
            c if c.is_whitespace() => {}
            c => tokens.push(Token::Symbol(c)),
        }
    }
    tokens
}

/// Splits a letter run such as `pisin` into known names
fn split_names(mut run: &str, tokens: &mut Vec<Token>) {
    while !run.is_empty() {
        match NAMES.iter().find(|name| run.starts_with(*name)) {
            Some(name) => {
                tokens.push(Token::Name((*name).to_string()));
                run = &run[name.len()..];
            }
            None => {
                // unknown to the keypad; left for the evaluator to reject
                tokens.push(Token::Name(run.to_string()));
                return;
            }
        }
    }
}

/// Start index of the operand that ends just before `end`
fn operand_start(tokens: &[Token], end: usize) -> Option<usize> {
    let last = end.checked_sub(1)?;
    match &tokens[last] {
        Token::Number(_) => Some(last),
        t if t.is_constant() => Some(last),
        Token::Symbol(')') => {
            let mut depth = 0usize;
            for (i, token) in tokens[..=last].iter().enumerate().rev() {
                match token {
                    Token::Symbol(')') => depth += 1,
                    Token::Symbol('(') => {
                        depth -= 1;
                        if depth == 0 {
                            // a call such as `sqrt(4)` is one operand
                            return match i.checked_sub(1).map(|j| &tokens[j]) {
                                Some(Token::Name(n)) if n != "pi" => Some(i - 1),
                                _ => Some(i),
                            };
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

/// Rewrites `x!` into `fact(x)`; a `!` with no operand is left in place
fn rewrite_factorials(mut tokens: Vec<Token>) -> Vec<Token> {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] != Token::Symbol('!') {
            i += 1;
            continue;
        }
        let Some(start) = operand_start(&tokens, i) else {
            i += 1;
            continue;
        };
        let operand: Vec<Token> = tokens.drain(start..=i).take(i - start).collect();
        let mut call = Vec::with_capacity(operand.len() + 3);
        call.push(Token::Name(FACTORIAL_FN.into()));
        call.push(Token::Symbol('('));
        call.extend(operand);
        call.push(Token::Symbol(')'));
        i = start + call.len();
        tokens.splice(start..start, call);
    }
    tokens
}

/// Joins tokens, writing `*` between adjacent operands
fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if let Some(prev) = i.checked_sub(1).map(|j| &tokens[j]) {
            let both_numbers = matches!(prev, Token::Number(_)) && matches!(token, Token::Number(_));
            if prev.ends_operand() && token.starts_operand() && !both_numbers {
                out.push('*');
            }
        }
        token.push_to(&mut out);
    }
    out
}

/// Rewrites display text into an expression the evaluator understands
///
/// ```
/// use scicalc::core::expression::prepare;
/// use scicalc::core::AngleMode;
///
/// assert_eq!(prepare("√(16)+log(100)", AngleMode::Radians), "sqrt(16)+log10(100)");
/// assert_eq!(prepare("2π+5!", AngleMode::Radians), "2*pi+fact(5)");
/// assert_eq!(
///     prepare("sin(90)", AngleMode::Degrees),
///     "sin(0.017453292519943295 * 90)"
/// );
/// ```
#[must_use]
pub fn prepare(display: &str, mode: AngleMode) -> String {
    let expr = render(&rewrite_factorials(tokenize(display)));

    match mode {
        AngleMode::Radians => expr,
        AngleMode::Degrees => trig_call()
            .replace_all(&expr, format!("${{1}}({DEG_TO_RAD} * ").as_str())
            .into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_replaced() {
        assert_eq!(prepare("2*π", AngleMode::Radians), "2*pi");
        assert_eq!(prepare("√(9)", AngleMode::Radians), "sqrt(9)");
        assert_eq!(prepare("log(10)", AngleMode::Radians), "log10(10)");
        assert_eq!(prepare("ln(10)", AngleMode::Radians), "ln(10)");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        assert_eq!(
            prepare("π+π*log(2)+log(3)", AngleMode::Radians),
            "pi+pi*log10(2)+log10(3)"
        );
    }

    #[test]
    fn test_radians_leave_trig_alone() {
        assert_eq!(prepare("sin(1)+cos(2)", AngleMode::Radians), "sin(1)+cos(2)");
    }

    #[test]
    fn test_degrees_inject_conversion() {
        assert_eq!(
            prepare("sin(30)+cos(60)*tan(45)", AngleMode::Degrees),
            "sin(0.017453292519943295 * 30)+cos(0.017453292519943295 * 60)\
             *tan(0.017453292519943295 * 45)"
        );
    }

    #[test]
    fn test_degrees_do_not_touch_other_functions() {
        assert_eq!(prepare("ln(5)+√(4)", AngleMode::Degrees), "ln(5)+sqrt(4)");
    }

    #[test]
    fn test_factorial_of_number() {
        assert_eq!(prepare("5!", AngleMode::Radians), "fact(5)");
        assert_eq!(prepare("2+3!*4", AngleMode::Radians), "2+fact(3)*4");
    }

    #[test]
    fn test_factorial_of_group_and_call() {
        assert_eq!(prepare("(2+1)!", AngleMode::Radians), "fact((2+1))");
        assert_eq!(prepare("√(9)!", AngleMode::Radians), "fact(sqrt(9))");
        assert_eq!(prepare("((1)+(2))!", AngleMode::Radians), "fact(((1)+(2)))");
    }

    #[test]
    fn test_repeated_factorial_nests() {
        assert_eq!(prepare("3!!", AngleMode::Radians), "fact(fact(3))");
    }

    #[test]
    fn test_factorial_without_operand_is_left_alone() {
        assert_eq!(prepare("!", AngleMode::Radians), "!");
        assert_eq!(prepare("2+!", AngleMode::Radians), "2+!");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(prepare("2π", AngleMode::Radians), "2*pi");
        assert_eq!(prepare("ππ", AngleMode::Radians), "pi*pi");
        assert_eq!(prepare("2(3)", AngleMode::Radians), "2*(3)");
        assert_eq!(prepare("(2)(3)", AngleMode::Radians), "(2)*(3)");
        assert_eq!(prepare("(2)3", AngleMode::Radians), "(2)*3");
        assert_eq!(prepare("2sin(0)", AngleMode::Radians), "2*sin(0)");
        assert_eq!(prepare("π(2)", AngleMode::Radians), "pi*(2)");
        assert_eq!(prepare("3!2", AngleMode::Radians), "fact(3)*2");
    }

    #[test]
    fn test_function_calls_are_not_products() {
        assert_eq!(prepare("log(2)ln(3)", AngleMode::Radians), "log10(2)*ln(3)");
        assert_eq!(prepare("√(4)", AngleMode::Radians), "sqrt(4)");
    }

    #[test]
    fn test_implicit_multiplication_in_degrees() {
        assert_eq!(
            prepare("2sin(90)", AngleMode::Degrees),
            "2*sin(0.017453292519943295 * 90)"
        );
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(prepare("foo(2)", AngleMode::Radians), "foo(2)");
    }

    #[test]
    fn test_conversion_constant_prints_full_precision() {
        assert_eq!(DEG_TO_RAD.to_string(), "0.017453292519943295");
    }
}
