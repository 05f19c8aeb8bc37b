//! # Amount Handling
//!
//! Conversions between what the user types, what the router expects and
//! what the page displays:
//!
//! - [`is_decimal_input`] - keystroke validator for the amount field
//! - [`parse_units`] - human decimal string → base units (`U256`)
//! - [`format_units`] - base units → human decimal string (`"2.0"` style)
//! - [`parse_decimal`] / [`format_fixed2`] - display math on `rust_decimal::Decimal`

use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AmountError;

/// Base-unit convention used when a token does not say otherwise.
pub const DEFAULT_DECIMALS: u8 = 18;

fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

/// Whether `input` is an acceptable value for the amount field.
///
/// Digits with at most one `.` or `,` separator. Either side of the
/// separator may be empty, so `""`, `"."`, `"5."` and `".5"` are all
/// accepted while the user is typing.
///
/// ```rust
/// use shared::amount::is_decimal_input;
///
/// assert!(is_decimal_input("12.5"));
/// assert!(is_decimal_input("0,25"));
/// assert!(!is_decimal_input("1.2.3"));
/// assert!(!is_decimal_input("-1"));
/// ```
pub fn is_decimal_input(input: &str) -> bool {
    let mut separators = 0;
    for c in input.chars() {
        if is_separator(c) {
            separators += 1;
            if separators > 1 {
                return false;
            }
        } else if !c.is_ascii_digit() {
            return false;
        }
    }
    true
}

/// Split a validated input into integer and fraction digits, `,` read as `.`.
fn split_decimal(input: &str) -> Result<(&str, &str), AmountError> {
    let trimmed = input.trim();
    if !is_decimal_input(trimmed) {
        return Err(AmountError::Malformed(input.to_string()));
    }
    let (int_part, frac_part) = match trimmed.find(is_separator) {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Empty);
    }
    Ok((int_part, frac_part))
}

/// Convert a human decimal string into integer base units.
///
/// Rejects more fractional digits than `decimals`, where
/// `alloy_primitives::utils::parse_units` silently truncates them, and reads
/// `,` as the separator.
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::amount::parse_units;
///
/// assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
/// assert!(parse_units("0.0000001", 6).is_err());
/// ```
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let (int_part, frac_part) = split_decimal(input)?;
    if frac_part.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals { decimals });
    }

    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.extend(std::iter::repeat('0').take(decimals as usize - frac_part.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow)
}

/// Convert integer base units back into a human decimal string.
///
/// Trailing fractional zeros are trimmed but one fractional digit is always
/// kept, so whole amounts read `"2.0"` (`alloy_primitives::utils::format_units`
/// pads to the full `decimals` width instead).
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::amount::format_units;
///
/// let two = U256::from(2u64) * U256::from(10u64).pow(U256::from(18u64));
/// assert_eq!(format_units(two, 18), "2.0");
/// assert_eq!(format_units(U256::from(1_234_500u64), 6), "1.2345");
/// ```
pub fn format_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return format!("{}.0", raw);
    }

    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - raw.len() + 1), raw)
    } else {
        raw
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };

    format!("{}.{}", int_part, frac_part)
}

/// Parse a (possibly partial) amount into a `Decimal` for display math.
///
/// Returns `None` for empty or separator-only input.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let (int_part, frac_part) = split_decimal(input).ok()?;
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    Decimal::from_str(&normalized).ok()
}

/// Round half away from zero to two places and always print two decimals.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use shared::amount::format_fixed2;
///
/// assert_eq!(format_fixed2(Decimal::new(12345, 3)), "12.35");
/// assert_eq!(format_fixed2(Decimal::from(3)), "3.00");
/// ```
pub fn format_fixed2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_decimal_input_accepts_partial_numbers() {
        for input in ["", "0", "12", ".", "5.", ".5", "12.345", "1,5", ",", "007"] {
            assert!(is_decimal_input(input), "should accept {:?}", input);
        }
    }

    #[test]
    fn test_decimal_input_rejects_garbage() {
        for input in ["a", "1a", "1.2.3", "1,2.3", "-1", "+1", "1e5", " 1", "1 ", "..", "١"] {
            assert!(!is_decimal_input(input), "should reject {:?}", input);
        }
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1", 18).unwrap(), wei(1));
        assert_eq!(parse_units("1.", 18).unwrap(), wei(1));
        assert_eq!(parse_units(".5", 18).unwrap(), wei(1) / U256::from(2u64));
        assert_eq!(parse_units("0,25", 2).unwrap(), U256::from(25u64));
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units("000.000", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units("42", 0).unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_parse_units_matches_alloy_on_valid_input() {
        for (input, decimals) in [("1", 18u8), ("1.5", 6), ("0.000001", 6), ("123.456", 18)] {
            let expected = alloy_primitives::utils::parse_units(input, decimals).unwrap().get_absolute();
            assert_eq!(parse_units(input, decimals).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_parse_units_errors() {
        assert_eq!(parse_units("", 18), Err(AmountError::Empty));
        assert_eq!(parse_units(".", 18), Err(AmountError::Empty));
        assert_eq!(parse_units("1.2345678", 6), Err(AmountError::TooManyDecimals { decimals: 6 }));
        assert_eq!(parse_units("abc", 18), Err(AmountError::Malformed("abc".to_string())));

        let huge = "9".repeat(90);
        assert_eq!(parse_units(&huge, 18), Err(AmountError::Overflow));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(wei(2), 18), "2.0");
        assert_eq!(format_units(U256::ZERO, 18), "0.0");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(123_456_789u64), 6), "123.456789");
        assert_eq!(format_units(U256::from(7u64), 0), "7.0");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("x"), None);
        assert_eq!(parse_decimal(".5"), Some(Decimal::new(5, 1)));
        assert_eq!(parse_decimal("5."), Some(Decimal::from(5)));
        assert_eq!(parse_decimal("1,25"), Some(Decimal::new(125, 2)));
    }

    #[test]
    fn test_format_fixed2_rounds_half_away_from_zero() {
        assert_eq!(format_fixed2(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_fixed2(Decimal::new(24690, 3)), "24.69");
        assert_eq!(format_fixed2(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_fixed2(Decimal::ZERO), "0.00");
    }
}
