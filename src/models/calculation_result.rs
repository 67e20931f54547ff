//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayrollCalculationResult`] type and the audit
//! structures that record how each amount was reached. The result is a pure
//! value: identical inputs produce an identical result, so it carries no ids or
//! timestamps.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_half_up;

use super::FinancialYear;

/// Deduction breakdown key for the employee provident fund share.
pub const DEDUCTION_PF: &str = "PF";
/// Deduction breakdown key for the employee state insurance share.
pub const DEDUCTION_ESI: &str = "ESI";
/// Deduction breakdown key for professional tax.
pub const DEDUCTION_PT: &str = "PT";
/// Deduction breakdown key for income tax withheld.
pub const DEDUCTION_TDS: &str = "TDS";
/// Deduction breakdown key for loss of pay.
pub const DEDUCTION_LOP: &str = "LOP";

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or policy the rule comes from.
    pub statute_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// A statutory default that stood in for missing tenant configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedDefault {
    /// No PF configuration; default ceiling and percentages used.
    PfConfig,
    /// No ESI configuration; default ceiling and percentages used.
    EsiConfig,
    /// No location state; the default professional tax state was used.
    PtState,
    /// TDS configuration had no standard deduction; the default was used.
    TdsStandardDeduction,
}

/// Earnings and deductions keyed by component or deduction name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    /// Earnings by salary component name.
    pub earnings: BTreeMap<String, Decimal>,
    /// Deductions keyed `PF`, `ESI`, `PT`, `TDS` and `LOP`.
    pub deductions: BTreeMap<String, Decimal>,
}

/// The complete result of a payroll calculation for one employee and month.
///
/// Amounts are unrounded decimals; call
/// [`rounded_for_persistence`](Self::rounded_for_persistence) at the point of
/// storage. `net_pay == gross_earnings - gross_deductions` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculationResult {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The employee's tenant.
    pub tenant_id: String,
    /// Pay month, 1–12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// The financial year the pay month falls in.
    pub financial_year: FinancialYear,
    /// Sum of all earnings components, after proration and variable pay.
    pub gross_earnings: Decimal,
    /// `pf_employee + esi_employee + pt + tds + lop_amount`.
    pub gross_deductions: Decimal,
    /// Employee provident fund contribution.
    pub pf_employee: Decimal,
    /// Employer provident fund contribution.
    pub pf_employer: Decimal,
    /// Employee state insurance contribution.
    pub esi_employee: Decimal,
    /// Employer state insurance contribution.
    pub esi_employer: Decimal,
    /// Professional tax.
    pub pt: Decimal,
    /// Income tax withheld this month.
    pub tds: Decimal,
    /// Loss-of-pay days.
    pub lop_days: Decimal,
    /// Loss-of-pay amount.
    pub lop_amount: Decimal,
    /// `gross_earnings - gross_deductions`.
    pub net_pay: Decimal,
    /// Days paid (days worked).
    pub days_paid: Decimal,
    /// Working days in the period.
    pub total_days: Decimal,
    /// Per-component breakdown for payslip rendering.
    pub component_breakdown: ComponentBreakdown,
    /// Statutory defaults that were used in place of tenant configuration.
    pub defaults_applied: Vec<AppliedDefault>,
    /// How each amount was reached.
    pub audit_trace: AuditTrace,
}

impl PayrollCalculationResult {
    /// Returns a copy rounded half-up to two places, ready for storage.
    ///
    /// Each money field is rounded on its own; gross deductions and net pay
    /// are then recomputed from the rounded parts so the net-pay identity
    /// still holds to the paisa.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{
    ///     AuditTrace, ComponentBreakdown, FinancialYear, PayrollCalculationResult,
    /// };
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let dec = |s: &str| Decimal::from_str(s).unwrap();
    /// let result = PayrollCalculationResult {
    ///     employee_id: "emp_001".to_string(),
    ///     tenant_id: "acme".to_string(),
    ///     month: 6,
    ///     year: 2025,
    ///     financial_year: FinancialYear::starting(2025),
    ///     gross_earnings: dec("20000"),
    ///     gross_deductions: dec("2083.333"),
    ///     pf_employee: Decimal::ZERO,
    ///     pf_employer: Decimal::ZERO,
    ///     esi_employee: Decimal::ZERO,
    ///     esi_employer: Decimal::ZERO,
    ///     pt: Decimal::ZERO,
    ///     tds: Decimal::ZERO,
    ///     lop_days: dec("5"),
    ///     lop_amount: dec("2083.333"),
    ///     net_pay: dec("17916.667"),
    ///     days_paid: dec("25"),
    ///     total_days: dec("30"),
    ///     component_breakdown: ComponentBreakdown::default(),
    ///     defaults_applied: vec![],
    ///     audit_trace: AuditTrace::default(),
    /// };
    ///
    /// let rounded = result.rounded_for_persistence();
    /// assert_eq!(rounded.lop_amount, dec("2083.33"));
    /// assert_eq!(rounded.net_pay, dec("17916.67"));
    /// ```
    pub fn rounded_for_persistence(&self) -> Self {
        let gross_earnings = round_half_up(self.gross_earnings);
        let pf_employee = round_half_up(self.pf_employee);
        let esi_employee = round_half_up(self.esi_employee);
        let pt = round_half_up(self.pt);
        let tds = round_half_up(self.tds);
        let lop_amount = round_half_up(self.lop_amount);
        let gross_deductions = pf_employee + esi_employee + pt + tds + lop_amount;

        let round_map = |map: &BTreeMap<String, Decimal>| {
            map.iter()
                .map(|(name, amount)| (name.clone(), round_half_up(*amount)))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            gross_earnings,
            gross_deductions,
            pf_employee,
            pf_employer: round_half_up(self.pf_employer),
            esi_employee,
            esi_employer: round_half_up(self.esi_employer),
            pt,
            tds,
            lop_amount,
            net_pay: gross_earnings - gross_deductions,
            component_breakdown: ComponentBreakdown {
                earnings: round_map(&self.component_breakdown.earnings),
                deductions: round_map(&self.component_breakdown.deductions),
            },
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> PayrollCalculationResult {
        let pf = dec("1800");
        let esi = dec("150.0375");
        let pt = dec("200");
        let tds = dec("1234.5678");
        let lop = dec("416.6666666");
        let gross = dec("30000.005");
        let deductions = pf + esi + pt + tds + lop;

        let mut breakdown = ComponentBreakdown::default();
        breakdown.earnings.insert("Basic".to_string(), dec("15000.005"));
        breakdown.earnings.insert("HRA".to_string(), dec("15000"));
        breakdown.deductions.insert(DEDUCTION_PF.to_string(), pf);
        breakdown.deductions.insert(DEDUCTION_LOP.to_string(), lop);

        PayrollCalculationResult {
            employee_id: "emp_001".to_string(),
            tenant_id: "acme".to_string(),
            month: 6,
            year: 2025,
            financial_year: FinancialYear::starting(2025),
            gross_earnings: gross,
            gross_deductions: deductions,
            pf_employee: pf,
            pf_employer: pf,
            esi_employee: esi,
            esi_employer: dec("650.1625"),
            pt,
            tds,
            lop_days: dec("1"),
            lop_amount: lop,
            net_pay: gross - deductions,
            days_paid: dec("25"),
            total_days: dec("26"),
            component_breakdown: breakdown,
            defaults_applied: vec![AppliedDefault::PfConfig],
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_rounded_result_keeps_net_pay_identity() {
        let rounded = sample_result().rounded_for_persistence();

        assert_eq!(rounded.gross_earnings, dec("30000.01"));
        assert_eq!(rounded.esi_employee, dec("150.04"));
        assert_eq!(rounded.tds, dec("1234.57"));
        assert_eq!(rounded.lop_amount, dec("416.67"));
        assert_eq!(
            rounded.gross_deductions,
            rounded.pf_employee + rounded.esi_employee + rounded.pt + rounded.tds + rounded.lop_amount
        );
        assert_eq!(
            rounded.net_pay,
            rounded.gross_earnings - rounded.gross_deductions
        );
    }

    #[test]
    fn test_rounded_result_rounds_breakdown() {
        let rounded = sample_result().rounded_for_persistence();
        assert_eq!(rounded.component_breakdown.earnings["Basic"], dec("15000.01"));
        assert_eq!(
            rounded.component_breakdown.deductions[DEDUCTION_LOP],
            dec("416.67")
        );
    }

    #[test]
    fn test_rounded_result_preserves_non_money_fields() {
        let unrounded = sample_result();
        let rounded = unrounded.rounded_for_persistence();
        assert_eq!(rounded.employee_id, unrounded.employee_id);
        assert_eq!(rounded.days_paid, unrounded.days_paid);
        assert_eq!(rounded.lop_days, unrounded.lop_days);
        assert_eq!(rounded.defaults_applied, unrounded.defaults_applied);
    }

    #[test]
    fn test_applied_default_serialization() {
        assert_eq!(
            serde_json::to_string(&AppliedDefault::TdsStandardDeduction).unwrap(),
            "\"tds_standard_deduction\""
        );
        let parsed: AppliedDefault = serde_json::from_str("\"pt_state\"").unwrap();
        assert_eq!(parsed, AppliedDefault::PtState);
    }

    #[test]
    fn test_result_serializes_money_as_strings() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["pf_employee"], "1800");
        assert_eq!(json["financial_year"], "2025-2026");
        assert_eq!(json["component_breakdown"]["deductions"]["PF"], "1800");
    }
}
