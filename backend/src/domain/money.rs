//! Decimal money arithmetic.
//!
//! All amounts enter the domain as `rust_decimal::Decimal`, parsed exactly
//! once at the storage boundary. Currency values round half-to-even;
//! percentages round half-away-from-zero to match what the tracker screens
//! have always displayed.

use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Parse a stored amount into a currency-rounded decimal.
///
/// This is the single place numeric-as-text storage values become numbers.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| anyhow!("invalid stored amount {:?}: {}", raw, e))?;
    Ok(round_currency(value))
}

/// Round a currency value to 2 decimal places, half-to-even.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// `part` as a percentage of `whole`, 2 decimal places.
///
/// Defined as 0 when `whole` is zero or negative — never NaN, never an error.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * dec!(100)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part` as a whole-number percentage of `whole`, same zero guard.
pub fn whole_percent_of(part: Decimal, whole: Decimal) -> i64 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    (part / whole * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_rounds_to_currency_precision() {
        assert_eq!(parse_amount("10").unwrap(), dec!(10.00));
        assert_eq!(parse_amount(" 99.999 ").unwrap(), dec!(100.00));
        // half-to-even at the third decimal
        assert_eq!(parse_amount("0.125").unwrap(), dec!(0.12));
        assert_eq!(parse_amount("0.135").unwrap(), dec!(0.14));
        assert!(parse_amount("not-a-number").is_err());
    }

    #[test]
    fn percent_of_guards_zero_denominator() {
        assert_eq!(percent_of(dec!(50), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(whole_percent_of(dec!(750), Decimal::ZERO), 0);
    }

    #[test]
    fn percent_of_rounds_to_two_places() {
        assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percent_of(dec!(2), dec!(3)), dec!(66.67));
        assert_eq!(percent_of(dec!(300), dec!(500)), dec!(60.00));
    }

    #[test]
    fn whole_percent_matches_screen_rounding() {
        assert_eq!(whole_percent_of(dec!(500), dec!(500)), 100);
        assert_eq!(whole_percent_of(dec!(399), dec!(500)), 80);
        assert_eq!(whole_percent_of(dec!(397.4), dec!(500)), 79);
        assert_eq!(whole_percent_of(dec!(397.5), dec!(500)), 80);
    }
}
