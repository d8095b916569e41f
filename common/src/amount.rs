//! Amount text as typed into, and shown by, the swap form.
//!
//! Amounts travel as decimal strings so the form can echo exactly what the
//! user typed (`"5."` while they are still typing, for example). Arithmetic
//! parses them into [`Decimal`] on demand.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Canonical text of an empty or zero amount.
pub const ZERO_AMOUNT: &str = "0";

/// Normalize raw amount input.
///
/// - surrounding whitespace is ignored;
/// - empty input becomes `"0"`;
/// - anything that is not a plain non-negative decimal (digits with at most
///   one `.`) becomes `"0"`;
/// - a well-formed number above [`Decimal::MAX`] also becomes `"0"`;
/// - leading zeros directly followed by another digit are removed, so
///   `"007"` becomes `"7"` and `"00.5"` becomes `"0.5"`.
pub fn normalize_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    if !is_plain_decimal(trimmed) || parse_amount(trimmed).is_none() {
        return ZERO_AMOUNT.to_string();
    }
    strip_leading_zeros(trimmed).to_string()
}

/// Parse amount text into a decimal.
///
/// Accepts the forms [`normalize_amount`] keeps, including a bare leading or
/// trailing `.`. Returns `None` for anything else, or for values outside
/// [`Decimal`]'s range.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if !is_plain_decimal(text) {
        return None;
    }

    let text = text.strip_suffix('.').unwrap_or(text);
    if let Some(fraction) = text.strip_prefix('.') {
        return Decimal::from_str(&format!("0.{}", fraction)).ok();
    }
    Decimal::from_str(text).ok()
}

/// Round to `places` decimals (half away from zero) and render with exactly
/// that many fractional digits, never in scientific notation.
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

fn is_plain_decimal(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

fn strip_leading_zeros(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start + 1 < bytes.len() && bytes[start] == b'0' && bytes[start + 1].is_ascii_digit() {
        start += 1;
    }
    &text[start..]
}
