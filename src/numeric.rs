//! Leading-number parsing and classification for numeric sort mode

use std::cmp::Ordering;

/// How a key takes part in a numeric sort
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericClass {
    /// The leading number parsed to a nonzero value
    Number(f64),
    /// No usable number, or one that parsed to zero
    Text,
    /// The key is exactly `0`; these lines are emitted as their own block
    Zero,
}

impl NumericClass {
    /// Position of the block this class is emitted in, ascending or reversed
    pub fn block(&self) -> u8 {
        match self {
            NumericClass::Number(_) => 0,
            NumericClass::Text => 1,
            NumericClass::Zero => 2,
        }
    }
}

/// Classify a key. Total over every byte string.
pub fn classify(key: &[u8]) -> NumericClass {
    if key == b"0" {
        return NumericClass::Zero;
    }
    match parse_leading_number(key) {
        Some(value) if value != 0.0 => NumericClass::Number(value),
        _ => NumericClass::Text,
    }
}

/// Compare two values already known to be nonzero numbers
#[inline]
pub fn compare_values(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// C `isspace` in the POSIX locale
#[inline]
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Start and end of the longest decimal float at the front of `s`
/// (after any leading whitespace), or `None` if there is none.
fn numeric_prefix(s: &[u8]) -> Option<(usize, usize)> {
    let start = s.iter().position(|&b| !is_c_space(b)).unwrap_or(s.len());
    let mut i = start;

    if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        i += 1;
    }

    let int_digits = count_digits(&s[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if i < s.len() && s[i] == b'.' {
        frac_digits = count_digits(&s[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // an exponent counts only when at least one digit follows it
    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        let mut j = i + 1;
        if j < s.len() && (s[j] == b'+' || s[j] == b'-') {
            j += 1;
        }
        let exp_digits = count_digits(&s[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    Some((start, i))
}

/// Parse as much of a decimal float as is valid from the start of `key`.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction, and an optional exponent. Anything after the prefix is ignored.
pub fn parse_leading_number(key: &[u8]) -> Option<f64> {
    let (start, end) = numeric_prefix(key)?;
    std::str::from_utf8(&key[start..end])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
}
