//! Number formatting for the display
//!
//! Results are rounded to 15 significant digits before display so that
//! `0.1+0.2` shows `0.3`, then printed in the shortest form that reads back
//! to the same value.

/// Significant digits kept in a displayed result
pub const DISPLAY_PRECISION: usize = 15;

/// Digits after the point that spell out any `f64` exactly
const EXACT_DIGITS: usize = 767;

/// Rounds `value` to `digits` significant digits
///
/// An exact tie rounds away from zero, so `0.125` at two digits is `0.13`.
/// Non-finite values and zero are returned unchanged, as is any request for
/// more digits than an `f64` carries.
#[must_use]
pub fn to_precision(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 || digits == 0 || digits > 17 {
        return value;
    }

    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return value;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value;
    };
    let significant: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let (head, tail) = significant.split_at(digits);
    let Ok(mut kept) = head.parse::<u64>() else {
        return value;
    };
    if tail.as_bytes().first().is_some_and(|d| *d >= b'5') {
        kept += 1;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let scale = exponent - (digits as i32 - 1);
    let rounded: f64 = format!("{kept}e{scale}").parse().unwrap_or(value);
    rounded.copysign(value)
}

/// Canonical decimal text for a number
///
/// Plain notation for magnitudes in `[1e-6, 1e21)`, exponent notation with
/// an explicit sign (`1e+21`, `1.5e-7`) outside it. Negative zero prints as
/// `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Rounds to [`DISPLAY_PRECISION`] and formats
#[must_use]
pub fn format_result(value: f64) -> String {
    format_number(to_precision(value, DISPLAY_PRECISION))
}
