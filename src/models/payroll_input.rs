//! The request to calculate one employee's pay for one month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Input contract for a single payroll calculation.
///
/// Day counts are decimals so half-days can be expressed. Anything left out is
/// derived: `total_days` from the calendar, `days_worked` as full attendance and
/// `lop_days` as the difference.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollCalculationInput;
///
/// let input = PayrollCalculationInput::new("acme", "emp_001", 6, 2025);
/// assert_eq!(input.pay_date().unwrap().to_string(), "2025-06-01");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCalculationInput {
    /// The employee to calculate.
    pub employee_id: String,
    /// The tenant the employee belongs to.
    pub tenant_id: String,
    /// Pay month, 1–12.
    pub month: u32,
    /// Four-digit calendar year.
    pub year: i32,
    /// Days attended; defaults to `total_days`.
    #[serde(default)]
    pub days_worked: Option<Decimal>,
    /// Working days in the period; defaults to the month's non-Sunday days.
    #[serde(default)]
    pub total_days: Option<Decimal>,
    /// Loss-of-pay days; defaults to `total_days - days_worked`.
    #[serde(default)]
    pub lop_days: Option<Decimal>,
    /// Ad-hoc payments keyed by salary component name, added after proration.
    #[serde(default)]
    pub variable_payments: BTreeMap<String, Decimal>,
}

impl PayrollCalculationInput {
    /// Creates an input for full attendance with no variable payments.
    pub fn new(
        tenant_id: impl Into<String>,
        employee_id: impl Into<String>,
        month: u32,
        year: i32,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            tenant_id: tenant_id.into(),
            month,
            year,
            days_worked: None,
            total_days: None,
            lop_days: None,
            variable_payments: BTreeMap::new(),
        }
    }

    /// Returns the date salary structures are resolved against: the first of the pay month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `month` is outside 1–12 or `year` is not a
    /// four-digit year.
    pub fn pay_date(&self) -> EngineResult<NaiveDate> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("must be between 1 and 12, got {}", self.month),
            ));
        }
        if !(1000..=9999).contains(&self.year) {
            return Err(EngineError::invalid_input(
                "year",
                format!("must be a four-digit year, got {}", self.year),
            ));
        }
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            EngineError::invalid_input(
                "month",
                format!("{}-{} is not a valid calendar month", self.year, self.month),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_input() {
        let json = r#"{ "employee_id": "emp_001", "tenant_id": "acme", "month": 6, "year": 2025 }"#;
        let input: PayrollCalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, PayrollCalculationInput::new("acme", "emp_001", 6, 2025));
    }

    #[test]
    fn test_deserialize_input_with_attendance_and_bonus() {
        let json = r#"{
            "employee_id": "emp_001",
            "tenant_id": "acme",
            "month": 6,
            "year": 2025,
            "days_worked": "24.5",
            "total_days": "26",
            "variable_payments": { "Bonus": "5000" }
        }"#;
        let input: PayrollCalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.days_worked, Some(Decimal::new(245, 1)));
        assert_eq!(input.total_days, Some(Decimal::from(26)));
        assert_eq!(input.lop_days, None);
        assert_eq!(input.variable_payments.get("Bonus"), Some(&Decimal::from(5000)));
    }

    #[test]
    fn test_pay_date_rejects_month_out_of_range() {
        let input = PayrollCalculationInput::new("acme", "emp_001", 13, 2025);
        match input.pay_date() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }

        let input = PayrollCalculationInput::new("acme", "emp_001", 0, 2025);
        assert!(input.pay_date().is_err());
    }

    #[test]
    fn test_pay_date_rejects_short_year() {
        let input = PayrollCalculationInput::new("acme", "emp_001", 1, 25);
        match input.pay_date() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "year"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }
}
