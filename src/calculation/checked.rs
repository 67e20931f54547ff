//! Overflow-checked decimal arithmetic.
//!
//! Money operations in the calculators go through these helpers. A result
//! outside the decimal range becomes [`EngineError::AmountOutOfRange`] naming
//! the calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

pub(crate) fn add(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| EngineError::amount_out_of_range(operation))
}

pub(crate) fn sub(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| EngineError::amount_out_of_range(operation))
}

pub(crate) fn mul(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| EngineError::amount_out_of_range(operation))
}

/// `amount × numerator / denominator`, multiplying first.
///
/// The caller guarantees a non-zero denominator.
pub(crate) fn scale(
    amount: Decimal,
    numerator: Decimal,
    denominator: Decimal,
    operation: &str,
) -> EngineResult<Decimal> {
    mul(amount, numerator, operation)?
        .checked_div(denominator)
        .ok_or_else(|| EngineError::amount_out_of_range(operation))
}

/// `amount × percent / 100`.
pub(crate) fn percent_of(
    amount: Decimal,
    percent: Decimal,
    operation: &str,
) -> EngineResult<Decimal> {
    scale(amount, percent, Decimal::ONE_HUNDRED, operation)
}

/// Sums `amounts`, failing on the first overflow.
pub(crate) fn sum<I>(amounts: I, operation: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| add(acc, amount, operation))
}
