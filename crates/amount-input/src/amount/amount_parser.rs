use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::amount_model::FieldError;
use crate::constants::MAX_FRACTION_DIGITS;

/// Parses raw amount text into a non-negative decimal rounded half-up to
/// `fraction_digits`. Malformed input yields `None`.
pub fn parse(raw_text: &str, fraction_digits: u32) -> Option<Decimal> {
    parse_detailed(raw_text, fraction_digits).ok()
}

/// Parses an exchange rate. Same grammar as amounts, no precision clamp,
/// and zero is rejected since a rate must be positive.
pub fn parse_rate(raw_text: &str) -> Option<Decimal> {
    parse_unclamped(raw_text)
        .ok()
        .filter(|rate| !rate.is_zero())
}

/// Formats a magnitude with exactly `fraction_digits` decimals.
///
/// `format_magnitude(dec!(120), 2)` gives `"120.00"`.
pub fn format_magnitude(value: Decimal, fraction_digits: u32) -> String {
    let digits = fraction_digits.min(MAX_FRACTION_DIGITS);
    let mut rounded = value
        .abs()
        .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(digits);
    rounded.to_string()
}

pub(crate) fn parse_detailed(raw_text: &str, fraction_digits: u32) -> Result<Decimal, FieldError> {
    let value = parse_unclamped(raw_text)?;
    Ok(value.round_dp_with_strategy(
        fraction_digits.min(MAX_FRACTION_DIGITS),
        RoundingStrategy::MidpointAwayFromZero,
    ))
}

fn parse_unclamped(raw_text: &str) -> Result<Decimal, FieldError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(FieldError::Required);
    }

    let mut separators = 0;
    let mut digits = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => separators += 1,
            _ => return Err(FieldError::InvalidNumber),
        }
    }
    if digits == 0 || separators > 1 {
        return Err(FieldError::InvalidNumber);
    }

    // "5." and ".5" are accepted while typing
    let normalized = match (text.starts_with('.'), text.ends_with('.')) {
        (true, _) => format!("0{}", text),
        (false, true) => text.trim_end_matches('.').to_string(),
        _ => text.to_string(),
    };

    Decimal::from_str(&normalized).map_err(|e| {
        log::debug!("Rejecting amount text '{}': {}", raw_text, e);
        FieldError::InvalidNumber
    })
}
