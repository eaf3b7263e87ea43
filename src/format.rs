//! Canonical string forms of scalar leaves.

use std::borrow::Cow;

use crate::value::{Scalar, Value};

/// Formats a scalar.
///
/// Integers are printed in decimal, booleans as `true`/`false`, and floats
/// as the shortest string that reads back to the same `f64`.
pub fn scalar(value: &Scalar) -> Cow<'_, str> {
    match value {
        Scalar::Str(s) => Cow::Borrowed(s),
        Scalar::Int(v) => {
            let mut buffer = itoa::Buffer::new();
            Cow::Owned(buffer.format(*v).to_owned())
        }
        Scalar::Uint(v) => {
            let mut buffer = itoa::Buffer::new();
            Cow::Owned(buffer.format(*v).to_owned())
        }
        Scalar::Bool(true) => Cow::Borrowed("true"),
        Scalar::Bool(false) => Cow::Borrowed("false"),
        Scalar::Float(v) => Cow::Owned(float(*v)),
    }
}

/// Formats a leaf value, or returns `None` when the value is not a scalar.
pub fn leaf(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Scalar(s) => Some(scalar(s)),
        _ => None,
    }
}

/// Formats a float as the shortest positional decimal that reads back to
/// the same `f64`.
///
/// `ryu` picks the digits; its exponent form (`1e20`, `1.5e-7`) is expanded
/// so the output never carries an exponent. Non-finite values print as
/// `+Inf`, `-Inf` and `NaN`.
pub(crate) fn float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }

    let mut buffer = ryu::Buffer::new();
    let formatted = buffer.format_finite(v);
    let (negative, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, formatted),
    };
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<isize>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return formatted.to_owned(),
        },
        None => (unsigned, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut out = String::with_capacity(formatted.len() + 8);
    if negative {
        out.push('-');
    }
    positional(&mut out, int, frac, exponent);
    out
}

/// Writes the decimal `int.frac * 10^exponent` without an exponent.
fn positional(out: &mut String, int: &str, frac: &str, exponent: isize) {
    let digits = format!("{int}{frac}");
    let significant = digits.trim_start_matches('0');
    // position of the decimal point relative to the first significant digit
    let point = int.len() as isize + exponent - (digits.len() - significant.len()) as isize;
    let significant = significant.trim_end_matches('0');

    if significant.is_empty() {
        out.push('0');
    } else if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', point.unsigned_abs()));
        out.push_str(significant);
    } else if point as usize >= significant.len() {
        out.push_str(significant);
        out.extend(std::iter::repeat_n('0', point as usize - significant.len()));
    } else {
        let (whole, fraction) = significant.split_at(point as usize);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    }
}
