//! Attendance proration.
//!
//! This module works out the working days of a pay month and the factor by
//! which every earnings component is scaled for partial attendance.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayrollCalculationInput};

use super::checked;

/// Counts the working days in a month: every calendar day except Sundays.
///
/// Saturdays and public holidays are working days under this definition.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::working_days_in_month;
///
/// // June 2025 has 30 days, five of them Sundays.
/// assert_eq!(working_days_in_month(6, 2025).unwrap(), 25);
/// ```
pub fn working_days_in_month(month: u32, year: i32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::invalid_input("month", format!("{}-{} is not a valid month", year, month))
    })?;

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .filter(|day| day.weekday() != Weekday::Sun)
        .count();

    Ok(days as u32)
}

/// The attendance ratio `days_worked / total_days`, kept as a rational.
///
/// Applying the factor multiplies before dividing, so whole-rupee amounts
/// scaled by whole-day ratios stay exact where the result is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProrationFactor {
    days_worked: Decimal,
    total_days: Decimal,
}

impl ProrationFactor {
    /// Creates a factor, enforcing `total_days > 0` and `0 ≤ days_worked ≤ total_days`.
    ///
    /// # Errors
    ///
    /// - `Configuration` if `total_days` is zero or negative
    /// - `InvalidInput` if `days_worked` is negative or exceeds `total_days`
    pub fn new(days_worked: Decimal, total_days: Decimal) -> EngineResult<Self> {
        if total_days <= Decimal::ZERO {
            return Err(EngineError::configuration(format!(
                "total_days must be greater than zero, got {}",
                total_days
            )));
        }
        if days_worked < Decimal::ZERO || days_worked > total_days {
            return Err(EngineError::invalid_input(
                "days_worked",
                format!("must be between 0 and {}, got {}", total_days, days_worked),
            ));
        }
        Ok(Self {
            days_worked,
            total_days,
        })
    }

    /// Days worked.
    pub fn days_worked(&self) -> Decimal {
        self.days_worked
    }

    /// Working days in the period.
    pub fn total_days(&self) -> Decimal {
        self.total_days
    }

    /// Returns true for full attendance.
    pub fn is_full(&self) -> bool {
        self.days_worked == self.total_days
    }

    /// The factor as a decimal in `[0, 1]`.
    pub fn value(&self) -> Decimal {
        if self.is_full() {
            Decimal::ONE
        } else {
            self.days_worked / self.total_days
        }
    }

    /// Scales `amount` by the factor.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` when `amount × days_worked` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::ProrationFactor;
    /// use rust_decimal::Decimal;
    ///
    /// let factor = ProrationFactor::new(Decimal::from(25), Decimal::from(30)).unwrap();
    /// assert_eq!(factor.apply(Decimal::from(15000)).unwrap(), Decimal::from(12500));
    /// ```
    pub fn apply(&self, amount: Decimal) -> EngineResult<Decimal> {
        if self.is_full() {
            Ok(amount)
        } else {
            checked::scale(amount, self.days_worked, self.total_days, "attendance proration")
        }
    }
}

/// The result of working out attendance for a pay period.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// Working days in the period.
    pub total_days: Decimal,
    /// Days worked (also the days paid).
    pub days_worked: Decimal,
    /// Loss-of-pay days.
    pub lop_days: Decimal,
    /// Scaling factor for earnings.
    pub factor: ProrationFactor,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Resolves the day counts and proration factor for a calculation input.
///
/// `total_days` defaults to [`working_days_in_month`], `days_worked` to
/// `total_days` and `lop_days` to `total_days - days_worked`.
///
/// # Errors
///
/// - `Configuration` when `total_days` is zero or negative
/// - `InvalidInput` when `days_worked` or `lop_days` fall outside `[0, total_days]`
pub fn calculate_proration(
    input: &PayrollCalculationInput,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    let total_days = match input.total_days {
        Some(days) => days,
        None => Decimal::from(working_days_in_month(input.month, input.year)?),
    };
    let days_worked = input.days_worked.unwrap_or(total_days);
    let factor = ProrationFactor::new(days_worked, total_days)?;

    let lop_days = input.lop_days.unwrap_or(total_days - days_worked);
    if lop_days < Decimal::ZERO || lop_days > total_days {
        return Err(EngineError::invalid_input(
            "lop_days",
            format!("must be between 0 and {}, got {}", total_days, lop_days),
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_proration".to_string(),
        rule_name: "Attendance Proration".to_string(),
        statute_ref: "Payment of Wages Act 1936".to_string(),
        input: serde_json::json!({
            "month": input.month,
            "year": input.year,
            "days_worked": input.days_worked.map(|d| d.to_string()),
            "total_days": input.total_days.map(|d| d.to_string()),
            "lop_days": input.lop_days.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "total_days": total_days.to_string(),
            "days_worked": days_worked.to_string(),
            "lop_days": lop_days.to_string(),
            "proration_factor": factor.value().normalize().to_string(),
            "total_days_source": if input.total_days.is_some() { "input" } else { "calendar" }
        }),
        reasoning: format!(
            "{} of {} working days attended, {} loss-of-pay days",
            days_worked, total_days, lop_days
        ),
    };

    Ok(ProrationResult {
        total_days,
        days_worked,
        lop_days,
        factor,
        audit_step,
    })
}
