//! Rounding and display formatting for calculator values.
//!
//! Results are stored as `f64`, so every value that lands in the input buffer
//! is first passed through [`round_to_precision`] to hide binary
//! representation error (`0.1 + 0.2` must read back as `0.3`).

/// Magnitudes below this are treated as exactly zero.
pub const NOISE_FLOOR: f64 = 1e-14;

/// Fractional digits kept by the first rounding stage.
const REPRESENTATION_DIGITS: usize = 14;

/// Magnitudes at or above this render in exponential notation.
const EXPONENTIAL_ABOVE: f64 = 1e12;

/// Non-zero magnitudes below this render in exponential notation.
const EXPONENTIAL_BELOW: f64 = 1e-6;

/// Digits after the decimal point in exponential notation.
const EXPONENTIAL_DIGITS: usize = 6;

/// Round a computed value for storage.
///
/// Non-finite values pass through unchanged and anything smaller than
/// [`NOISE_FLOOR`] collapses to zero. Otherwise the value is rounded to
/// 14 fractional digits, then to `precision` fractional digits.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value.abs() < NOISE_FLOOR {
        return 0.0;
    }

    let absorbed = round_fixed(value, REPRESENTATION_DIGITS);
    let rounded = round_fixed(absorbed, precision as usize);

    // Avoid handing out -0 after rounding small negatives away.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Fractional digits needed to print any `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Round to `digits` fractional digits, ties away from zero.
///
/// Works on the exact decimal expansion of `value`, so a tie is only a tie
/// when the binary value really sits halfway (`0.125`, `2.5`), never when it
/// merely prints that way (`1.005` is below the midpoint).
fn round_fixed(value: f64, digits: usize) -> f64 {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let Some(dot_pos) = exact.find('.') else {
        return value;
    };

    let cut = (dot_pos + 1 + digits).min(exact.len());
    let round_up = exact.as_bytes().get(cut).is_some_and(|&d| d >= b'5');

    let mut kept = exact.as_bytes()[..cut].to_vec();
    if round_up {
        let mut carry = true;
        for byte in kept.iter_mut().rev() {
            match *byte {
                b'.' => continue,
                b'9' => *byte = b'0',
                _ => {
                    *byte += 1;
                    carry = false;
                    break;
                }
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let rounded: f64 = match String::from_utf8(kept).ok().and_then(|t| t.parse().ok()) {
        Some(rounded) => rounded,
        None => return value,
    };
    if value.is_sign_negative() { -rounded } else { rounded }
}

/// Format a finished value for display.
///
/// Large and tiny magnitudes use exponential notation with six fractional
/// digits (`1.234568e+12`). Everything else is plain decimal, grouped by
/// thousands when `thousands_separator` is set.
pub fn format_number(value: f64, thousands_separator: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENTIAL_ABOVE || magnitude < EXPONENTIAL_BELOW {
        return format_exponential(value);
    }

    let plain = value.to_string();
    if thousands_separator && magnitude >= 1000.0 {
        group_thousands(&plain)
    } else {
        plain
    }
}

/// Format the literal text of a number still being typed.
///
/// Keeps trailing points and zeros (`"5."`, `"0.50"`) so the user sees what
/// they typed; only the integer part is grouped.
pub fn format_entry(text: &str, thousands_separator: bool) -> String {
    if thousands_separator {
        group_thousands(text)
    } else {
        text.to_string()
    }
}

/// Parse display text back into a number, ignoring grouping separators.
pub fn parse_display(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    cleaned.trim().parse().ok()
}

/// Exponential form with an explicit exponent sign, e.g. `1.500000e+12`.
fn format_exponential(value: f64) -> String {
    let formatted = format!("{:.*e}", EXPONENTIAL_DIGITS, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if exponent.starts_with('-') => {
            format!("{}e{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}e+{}", mantissa, exponent),
        None => formatted,
    }
}

/// Insert a `,` every three digits left of the decimal point.
fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    let mut reversed = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }

    let grouped: String = reversed.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}
