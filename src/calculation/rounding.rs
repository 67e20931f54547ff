//! Monetary rounding applied at the point of persistence.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero. Intermediate sums inside a
/// calculation stay unrounded; only persisted figures pass through here.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_half_up(dec("2083.333")), dec("2083.33"));
/// assert_eq!(round_half_up(dec("123.455")), dec("123.46"));
/// assert_eq!(round_half_up(dec("-123.455")), dec("-123.46"));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
