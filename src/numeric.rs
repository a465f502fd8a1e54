//! Decimal digit runs in any script
//!
//! Logs and exports written on CJK-locale hosts may carry full-width digits
//! (`５０`) or other Unicode decimal digits. Patterns match them with `\d`
//! and [`parse_decimal`] turns the run into a number.

use regex::Regex;
use std::sync::OnceLock;

fn decimal_digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d$").expect("invalid decimal digit regex"))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    decimal_digit_re().is_match(c.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit (general category Nd).
///
/// Decimal digits are only ever assigned in contiguous runs of ten, zero
/// first, so the value is the distance to the start of the run modulo ten.
pub fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut steps = 0u32;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        cp -= 1;
        steps += 1;
    }
    Some(steps % 10)
}

/// Parse a run of decimal digits; `None` on any non-digit or on overflow
pub fn parse_decimal(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(u64::from(digit_value(c)?))
    })
}
