//! Employee and location models.
//!
//! These are read-only snapshots supplied by the HR store; the engine never
//! mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose pay is being calculated.
///
/// Provident fund has no opt-out flag: membership is implied and PF is always
/// computed. The remaining statutory flags switch their deduction on or off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The tenant (employer) the employee belongs to.
    pub tenant_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Annual cost-to-company. A missing figure is treated as zero.
    #[serde(default)]
    pub ctc_annual: Option<Decimal>,
    /// Whether employee state insurance is deducted.
    #[serde(default)]
    pub esi_applicable: bool,
    /// Whether professional tax is deducted.
    #[serde(default)]
    pub pt_applicable: bool,
    /// Whether income tax is withheld at source.
    #[serde(default)]
    pub tds_applicable: bool,
    /// The work location, used to pick the professional tax state.
    #[serde(default)]
    pub location_id: Option<String>,
}

impl Employee {
    /// Returns the annual CTC, or zero when none is recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     tenant_id: "acme".to_string(),
    ///     name: "Asha Rao".to_string(),
    ///     ctc_annual: None,
    ///     esi_applicable: false,
    ///     pt_applicable: true,
    ///     tds_applicable: true,
    ///     location_id: None,
    /// };
    /// assert_eq!(employee.ctc_annual_or_zero(), Decimal::ZERO);
    /// ```
    pub fn ctc_annual_or_zero(&self) -> Decimal {
        self.ctc_annual.unwrap_or(Decimal::ZERO)
    }
}

/// A work location belonging to a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier for the location.
    pub id: String,
    /// The tenant owning the location.
    pub tenant_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The state the location is in; selects the professional tax table.
    #[serde(default)]
    pub state: Option<String>,
}
