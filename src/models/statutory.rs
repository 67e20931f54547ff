//! Tenant statutory configuration: provident fund, state insurance,
//! professional tax and income tax withholding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A capped percentage contribution, shared by provident fund and state insurance.
///
/// The contribution base is capped at `wage_ceiling` before either percentage
/// is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    /// Maximum wage the percentages are applied to.
    pub wage_ceiling: Decimal,
    /// Employee share, in percent.
    pub employee_percent: Decimal,
    /// Employer share, in percent.
    pub employer_percent: Decimal,
}

/// Provident fund configuration.
pub type PfConfig = ContributionConfig;

/// Employee state insurance configuration.
pub type EsiConfig = ContributionConfig;

/// One row of a professional tax table: a flat amount for a salary range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtSlab {
    /// Lower bound of the monthly salary range (inclusive).
    pub salary_from: Decimal,
    /// Upper bound (inclusive); open-ended when absent.
    #[serde(default)]
    pub salary_to: Option<Decimal>,
    /// Flat tax for the range.
    pub pt_amount: Decimal,
}

impl PtSlab {
    /// Returns true if `salary` falls inside this slab.
    pub fn contains(&self, salary: Decimal) -> bool {
        salary >= self.salary_from && self.salary_to.is_none_or(|to| salary <= to)
    }
}

/// State-scoped professional tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtConfig {
    /// The state this table applies to.
    pub state: String,
    /// Salary slabs, in any order.
    #[serde(default)]
    pub slabs: Vec<PtSlab>,
}

/// A marginal income tax band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the annual income band.
    pub from: Decimal,
    /// Upper bound; open-ended when absent.
    #[serde(default)]
    pub to: Option<Decimal>,
    /// Marginal rate, in percent.
    pub rate: Decimal,
}

impl TaxSlab {
    /// Width of the band, or `None` for the open-ended top band.
    ///
    /// An inverted band (`to < from`) has zero width. A width beyond the
    /// decimal range saturates at `Decimal::MAX`.
    pub fn width(&self) -> Option<Decimal> {
        self.to.map(|to| {
            if to <= self.from {
                Decimal::ZERO
            } else {
                to.checked_sub(self.from).unwrap_or(Decimal::MAX)
            }
        })
    }
}

/// Income tax withholding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsConfig {
    /// Standard deduction; the statutory default applies when absent.
    #[serde(default)]
    pub standard_deduction: Option<Decimal>,
    /// Tax bands, in any order.
    #[serde(default)]
    pub tax_slabs: Vec<TaxSlab>,
}

/// The statutory configuration resolved for one calculation.
///
/// Each entry is optional; absent PF and ESI fall back to the statutory
/// defaults, absent PT means no professional tax and absent TDS means no
/// withholding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConfigs {
    /// Provident fund configuration.
    #[serde(default)]
    pub pf: Option<PfConfig>,
    /// State insurance configuration.
    #[serde(default)]
    pub esi: Option<EsiConfig>,
    /// Professional tax table for the employee's state.
    #[serde(default)]
    pub pt: Option<PtConfig>,
    /// Income tax withholding configuration.
    #[serde(default)]
    pub tds: Option<TdsConfig>,
}
