//! Salary structures and their dated assignments to employees.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::checked;
use crate::error::EngineResult;

/// How a salary component's monthly amount is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// A configured flat amount.
    Fixed,
    /// A percentage of annual CTC.
    Percentage,
}

/// A single line item of a salary structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Display name, also the key for variable payments and the earnings breakdown.
    pub name: String,
    /// Short code such as `BASIC` or `HRA`.
    #[serde(default)]
    pub code: Option<String>,
    /// How the amount is derived.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Flat amount for `FIXED` components.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Percent of annual CTC for `PERCENTAGE` components.
    #[serde(default)]
    pub percent: Option<Decimal>,
}

impl SalaryComponent {
    /// Returns the unprorated amount of this component.
    ///
    /// `FIXED` yields the configured amount; `PERCENTAGE` yields
    /// `ctc_annual × percent / 100`. Percentages apply to the annual figure as
    /// configured, with no monthly divisor. Missing values count as zero.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` when `ctc_annual × percent` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{ComponentType, SalaryComponent};
    /// use rust_decimal::Decimal;
    ///
    /// let hra = SalaryComponent {
    ///     name: "HRA".to_string(),
    ///     code: Some("HRA".to_string()),
    ///     component_type: ComponentType::Percentage,
    ///     amount: None,
    ///     percent: Some(Decimal::from(5)),
    /// };
    /// assert_eq!(hra.base_amount(Decimal::from(240000)).unwrap(), Decimal::from(12000));
    /// ```
    pub fn base_amount(&self, ctc_annual: Decimal) -> EngineResult<Decimal> {
        match self.component_type {
            ComponentType::Fixed => Ok(self.amount.unwrap_or(Decimal::ZERO)),
            ComponentType::Percentage => checked::percent_of(
                ctc_annual,
                self.percent.unwrap_or(Decimal::ZERO),
                "percentage salary component",
            ),
        }
    }

    /// Returns true if this is the basic salary component (`Basic` name or `BASIC` code).
    pub fn is_basic(&self) -> bool {
        self.name == "Basic" || self.code.as_deref() == Some("BASIC")
    }

    /// Returns true if this is the house rent allowance component.
    pub fn is_hra(&self) -> bool {
        self.name == "HRA" || self.code.as_deref() == Some("HRA")
    }
}

/// An ordered list of salary components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for the structure.
    pub id: String,
    /// The tenant owning the structure.
    pub tenant_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Components, evaluated in order.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
}

/// Assigns a salary structure to an employee for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructureAssignment {
    /// The employee the structure applies to.
    pub employee_id: String,
    /// The assigned structure.
    pub structure_id: String,
    /// First date the assignment applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last date the assignment applies (inclusive); open-ended when absent.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl SalaryStructureAssignment {
    /// Checks whether this assignment is in force on `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::SalaryStructureAssignment;
    /// use chrono::NaiveDate;
    ///
    /// let assignment = SalaryStructureAssignment {
    ///     employee_id: "emp_001".to_string(),
    ///     structure_id: "std_2025".to_string(),
    ///     effective_from: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    ///     effective_to: Some(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()),
    /// };
    /// assert!(assignment.is_effective_on(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    /// assert!(!assignment.is_effective_on(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    /// ```
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|to| to >= date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn component(name: &str, code: Option<&str>) -> SalaryComponent {
        SalaryComponent {
            name: name.to_string(),
            code: code.map(str::to_string),
            component_type: ComponentType::Fixed,
            amount: Some(dec("1000")),
            percent: None,
        }
    }

    #[test]
    fn test_fixed_component_uses_amount() {
        let basic = component("Basic", Some("BASIC"));
        assert_eq!(basic.base_amount(dec("999999")).unwrap(), dec("1000"));
    }

    #[test]
    fn test_percentage_component_uses_annual_ctc() {
        let special = SalaryComponent {
            name: "Special Allowance".to_string(),
            code: None,
            component_type: ComponentType::Percentage,
            amount: None,
            percent: Some(dec("2.5")),
        };
        assert_eq!(special.base_amount(dec("600000")).unwrap(), dec("15000"));
    }

    #[test]
    fn test_missing_amount_and_percent_are_zero() {
        let fixed = SalaryComponent {
            name: "Conveyance".to_string(),
            code: None,
            component_type: ComponentType::Fixed,
            amount: None,
            percent: None,
        };
        let pct = SalaryComponent {
            component_type: ComponentType::Percentage,
            ..fixed.clone()
        };
        assert_eq!(fixed.base_amount(dec("600000")).unwrap(), Decimal::ZERO);
        assert_eq!(pct.base_amount(dec("600000")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_of_oversized_ctc_is_out_of_range() {
        let special = SalaryComponent {
            name: "Special Allowance".to_string(),
            code: None,
            component_type: ComponentType::Percentage,
            amount: None,
            percent: Some(dec("50")),
        };
        assert!(matches!(
            special.base_amount(Decimal::MAX),
            Err(crate::error::EngineError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_basic_detected_by_name_or_code() {
        assert!(component("Basic", None).is_basic());
        assert!(component("Basic Pay", Some("BASIC")).is_basic());
        assert!(!component("basic", None).is_basic());
        assert!(!component("HRA", Some("HRA")).is_basic());
    }

    #[test]
    fn test_hra_detected_by_name_or_code() {
        assert!(component("HRA", None).is_hra());
        assert!(component("House Rent", Some("HRA")).is_hra());
        assert!(!component("Basic", Some("BASIC")).is_hra());
    }

    #[test]
    fn test_component_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ComponentType::Fixed).unwrap(),
            "\"FIXED\""
        );
        let parsed: ComponentType = serde_json::from_str("\"PERCENTAGE\"").unwrap();
        assert_eq!(parsed, ComponentType::Percentage);
    }

    #[test]
    fn test_deserialize_component_with_type_key() {
        let json = r#"{ "name": "HRA", "code": "HRA", "type": "PERCENTAGE", "percent": "20" }"#;
        let parsed: SalaryComponent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.component_type, ComponentType::Percentage);
        assert_eq!(parsed.percent, Some(dec("20")));
    }

    #[test]
    fn test_open_ended_assignment_is_effective_after_start() {
        let assignment = SalaryStructureAssignment {
            employee_id: "emp_001".to_string(),
            structure_id: "std".to_string(),
            effective_from: date(2024, 4, 1),
            effective_to: None,
        };
        assert!(assignment.is_effective_on(date(2024, 4, 1)));
        assert!(assignment.is_effective_on(date(2030, 1, 1)));
        assert!(!assignment.is_effective_on(date(2024, 3, 31)));
    }

    #[test]
    fn test_assignment_end_date_is_inclusive() {
        let assignment = SalaryStructureAssignment {
            employee_id: "emp_001".to_string(),
            structure_id: "std".to_string(),
            effective_from: date(2024, 4, 1),
            effective_to: Some(date(2024, 6, 1)),
        };
        assert!(assignment.is_effective_on(date(2024, 6, 1)));
        assert!(!assignment.is_effective_on(date(2024, 6, 2)));
    }
}
