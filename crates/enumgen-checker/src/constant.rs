//! Constant values and literal decoding.

use std::fmt;
use std::num::ParseIntError;

/// The value of a constant expression.
///
/// Integers are exact within `i128`, which covers every sized Go integer
/// type. Values of imported constants and unsupported literals are
/// `Unknown`.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    Unknown,
}

impl ConstValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i128> {
        match self {
            ConstValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConstValue::Unknown)
    }

    /// The value as a float, for mixed integer/float arithmetic.
    pub(crate) fn to_f64(&self) -> Option<f64> {
        match self {
            ConstValue::Int(v) => Some(*v as f64),
            ConstValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as an exact integer: integers, and floats with no
    /// fractional part.
    pub(crate) fn to_exact_int(&self) -> Option<i128> {
        match self {
            ConstValue::Int(v) => Some(*v),
            ConstValue::Float(v) if v.fract() == 0.0 && v.is_finite() => {
                if v.abs() < 1.7e38 {
                    Some(*v as i128)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(v) => write!(f, "{v}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Float(v) => write!(f, "{v}"),
            ConstValue::String(v) => write!(f, "{v:?}"),
            ConstValue::Unknown => f.write_str("unknown"),
        }
    }
}

// =============================================================================
// Literal decoding
// =============================================================================

/// Decode an integer literal: decimal, `0x`, `0o`, `0b` and legacy octal
/// `0777`, with `_` separators.
pub fn parse_int_literal(raw: &str) -> Result<i128, ParseIntError> {
    let digits: String = raw.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (body, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };
    i128::from_str_radix(body, radix)
}

/// Decode a decimal float literal. Hexadecimal floats are decoded through
/// their mantissa and binary exponent.
#[must_use]
pub fn parse_float_literal(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        let (mantissa, exponent) = hex.split_once('p')?;
        let exponent: i32 = exponent.parse().ok()?;
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let mut value = 0f64;
        for c in int_part.chars() {
            value = value * 16.0 + f64::from(c.to_digit(16)?);
        }
        let mut scale = 1.0 / 16.0;
        for c in frac_part.chars() {
            value += f64::from(c.to_digit(16)?) * scale;
            scale /= 16.0;
        }
        return Some(value * 2f64.powi(exponent));
    }
    lower.parse().ok()
}

/// Decode the body of a quoted string or rune literal, handling Go escapes.
fn unescape(body: &str, quote: char) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars.next()?;
        match escaped {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            c if c == quote => out.push(c),
            'x' | 'u' | 'U' => {
                let len = match escaped {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = chars.by_ref().take(len).collect();
                if hex.len() != len {
                    return None;
                }
                // \x escapes denote bytes; values above 0x7F are kept as the
                // corresponding code point.
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            '0'..='7' => {
                let mut code = escaped.to_digit(8)?;
                for _ in 0..2 {
                    code = code * 8 + chars.next()?.to_digit(8)?;
                }
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Decode an interpreted (`"..."`) or raw (`` `...` ``) string literal.
#[must_use]
pub fn parse_string_literal(raw: &str) -> Option<String> {
    if let Some(body) = raw.strip_prefix('`').and_then(|r| r.strip_suffix('`')) {
        // Carriage returns are discarded from raw strings.
        return Some(body.replace('\r', ""));
    }
    let body = raw.strip_prefix('"')?.strip_suffix('"')?;
    unescape(body, '"')
}

/// Decode a rune literal such as `'a'`, `'\n'` or `'é'`.
#[must_use]
pub fn parse_rune_literal(raw: &str) -> Option<i128> {
    let body = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    let decoded = unescape(body, '\'')?;
    let mut chars = decoded.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(i128::from(u32::from(c)))
}
