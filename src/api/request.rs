//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the
//! `/payroll/calculate` endpoint.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayrollCalculationInput;

/// Request body for the `/payroll/calculate` endpoint.
///
/// Identifies one employee and pay month. Day counts may be omitted to
/// calculate full attendance over the month's working days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The tenant the employee belongs to.
    pub tenant_id: String,
    /// The employee to calculate.
    pub employee_id: String,
    /// Pay month, 1–12.
    pub month: u32,
    /// Four-digit calendar year.
    pub year: i32,
    /// Days attended.
    #[serde(default)]
    pub days_worked: Option<Decimal>,
    /// Working days in the period.
    #[serde(default)]
    pub total_days: Option<Decimal>,
    /// Loss-of-pay days.
    #[serde(default)]
    pub lop_days: Option<Decimal>,
    /// Ad-hoc payments keyed by salary component name.
    #[serde(default)]
    pub variable_payments: BTreeMap<String, Decimal>,
}

impl From<CalculationRequest> for PayrollCalculationInput {
    fn from(req: CalculationRequest) -> Self {
        PayrollCalculationInput {
            employee_id: req.employee_id,
            tenant_id: req.tenant_id,
            month: req.month,
            year: req.year,
            days_worked: req.days_worked,
            total_days: req.total_days,
            lop_days: req.lop_days,
            variable_payments: req.variable_payments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_deserializes() {
        let json = r#"{"tenant_id": "acme", "employee_id": "emp_001", "month": 6, "year": 2025}"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let input: PayrollCalculationInput = request.into();

        assert_eq!(input, PayrollCalculationInput::new("acme", "emp_001", 6, 2025));
    }

    #[test]
    fn test_request_with_attendance_and_variable_pay() {
        let json = r#"{
            "tenant_id": "acme",
            "employee_id": "emp_001",
            "month": 6,
            "year": 2025,
            "days_worked": "12.5",
            "total_days": 25,
            "variable_payments": {"Bonus": "5000"}
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let input: PayrollCalculationInput = request.into();

        assert_eq!(input.days_worked, Some(Decimal::new(125, 1)));
        assert_eq!(input.total_days, Some(Decimal::from(25)));
        assert_eq!(input.lop_days, None);
        assert_eq!(input.variable_payments["Bonus"], Decimal::from(5000));
    }

    #[test]
    fn test_missing_month_fails() {
        let json = r#"{"tenant_id": "acme", "employee_id": "emp_001", "year": 2025}"#;

        let result: Result<CalculationRequest, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }
}
