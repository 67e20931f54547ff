//! Tax-saving declarations and the April–March financial year.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An April–March financial year, identified by the calendar year it starts in.
///
/// Serialized as `"{start}-{start+1}"`, e.g. `"2025-2026"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::FinancialYear;
///
/// assert_eq!(FinancialYear::for_pay_month(4, 2025).to_string(), "2025-2026");
/// assert_eq!(FinancialYear::for_pay_month(3, 2025).to_string(), "2024-2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    /// Creates the financial year starting in April of `start_year`.
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Returns the financial year a pay month falls in.
    pub fn for_pay_month(month: u32, year: i32) -> Self {
        if month >= 4 {
            Self::starting(year)
        } else {
            Self::starting(year - 1)
        }
    }

    /// The calendar year the financial year starts in.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.start_year + 1)
    }
}

impl FromStr for FinancialYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("expected 'YYYY-YYYY', got '{}'", s))?;
        let start: i32 = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start year in '{}'", s))?;
        let end: i32 = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end year in '{}'", s))?;
        if end != start + 1 {
            return Err(format!("'{}' does not span consecutive years", s));
        }
        Ok(Self::starting(start))
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.to_string()
    }
}

/// Review status of a tax declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclarationStatus {
    /// Saved but not submitted.
    Draft,
    /// Submitted and awaiting review.
    Submitted,
    /// Accepted; counts towards TDS relief.
    Approved,
    /// Refused.
    Rejected,
}

/// A tax-saving declaration made by an employee for a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDeclaration {
    /// The declaring employee.
    pub employee_id: String,
    /// The financial year the declaration applies to.
    pub financial_year: FinancialYear,
    /// Section or category, e.g. `80C`.
    #[serde(default)]
    pub category: String,
    /// Amount the employee declared.
    pub declared_amount: Decimal,
    /// Amount the reviewer approved, if recorded.
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
    /// Review status.
    pub status: DeclarationStatus,
}

impl TaxDeclaration {
    /// The relief this declaration grants.
    ///
    /// Only approved declarations count. The approved amount is used when
    /// recorded, otherwise the declared amount of the approved declaration.
    pub fn relief(&self) -> Decimal {
        match self.status {
            DeclarationStatus::Approved => self.approved_amount.unwrap_or(self.declared_amount),
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(status: DeclarationStatus, approved: Option<i64>) -> TaxDeclaration {
        TaxDeclaration {
            employee_id: "emp_001".to_string(),
            financial_year: FinancialYear::starting(2025),
            category: "80C".to_string(),
            declared_amount: Decimal::from(150000),
            approved_amount: approved.map(Decimal::from),
            status,
        }
    }

    #[test]
    fn test_financial_year_from_april_onwards() {
        assert_eq!(FinancialYear::for_pay_month(4, 2025).start_year(), 2025);
        assert_eq!(FinancialYear::for_pay_month(12, 2025).start_year(), 2025);
    }

    #[test]
    fn test_financial_year_before_april() {
        assert_eq!(FinancialYear::for_pay_month(1, 2026).start_year(), 2025);
        assert_eq!(FinancialYear::for_pay_month(3, 2026).start_year(), 2025);
    }

    #[test]
    fn test_financial_year_parses_and_serializes_as_string() {
        let fy: FinancialYear = serde_json::from_str("\"2024-2025\"").unwrap();
        assert_eq!(fy, FinancialYear::starting(2024));
        assert_eq!(serde_json::to_string(&fy).unwrap(), "\"2024-2025\"");
    }

    #[test]
    fn test_financial_year_rejects_non_consecutive_years() {
        assert!("2024-2026".parse::<FinancialYear>().is_err());
        assert!("2024".parse::<FinancialYear>().is_err());
        assert!("abcd-2025".parse::<FinancialYear>().is_err());
    }

    #[test]
    fn test_approved_amount_takes_precedence() {
        let decl = declaration(DeclarationStatus::Approved, Some(100000));
        assert_eq!(decl.relief(), Decimal::from(100000));
    }

    #[test]
    fn test_approved_without_amount_uses_declared() {
        let decl = declaration(DeclarationStatus::Approved, None);
        assert_eq!(decl.relief(), Decimal::from(150000));
    }

    #[test]
    fn test_unapproved_declarations_grant_no_relief() {
        assert_eq!(
            declaration(DeclarationStatus::Submitted, Some(100000)).relief(),
            Decimal::ZERO
        );
        assert_eq!(
            declaration(DeclarationStatus::Rejected, None).relief(),
            Decimal::ZERO
        );
        assert_eq!(
            declaration(DeclarationStatus::Draft, None).relief(),
            Decimal::ZERO
        );
    }
}
