//! Statutory deductions: provident fund, state insurance, professional tax
//! and loss of pay.
//!
//! Each calculator is independent and side-effect free.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, ContributionConfig, PtConfig, PtSlab};

use super::checked;

/// The result of a capped percentage contribution (PF or ESI).
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The wage the percentages were applied to, after the ceiling.
    pub base: Decimal,
    /// Employee share.
    pub employee_amount: Decimal,
    /// Employer share.
    pub employer_amount: Decimal,
    /// True when the statutory default stood in for tenant configuration.
    pub used_default: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn contribution(
    wage: Decimal,
    rates: &ContributionConfig,
    operation: &str,
) -> EngineResult<(Decimal, Decimal, Decimal)> {
    let base = wage.min(rates.wage_ceiling);
    let employee = checked::percent_of(base, rates.employee_percent, operation)?;
    let employer = checked::percent_of(base, rates.employer_percent, operation)?;
    Ok((base, employee, employer))
}

/// Calculates provident fund contributions on the basic salary.
///
/// `base = min(basic_salary, wage_ceiling)`; each share is `base × percent / 100`.
/// PF has no opt-out and is always computed. Without tenant configuration the
/// `default` rates are used and flagged.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when a share overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_provident_fund;
/// use payroll_engine::config::StatutoryDefaults;
/// use rust_decimal::Decimal;
///
/// let defaults = StatutoryDefaults::default();
/// let result = calculate_provident_fund(Decimal::from(20000), None, &defaults.pf, 1).unwrap();
/// assert_eq!(result.base, Decimal::from(15000));
/// assert_eq!(result.employee_amount, Decimal::from(1800));
/// assert_eq!(result.employer_amount, Decimal::from(1800));
/// assert!(result.used_default);
/// ```
pub fn calculate_provident_fund(
    basic_salary: Decimal,
    config: Option<&ContributionConfig>,
    default: &ContributionConfig,
    step_number: u32,
) -> EngineResult<ContributionResult> {
    let used_default = config.is_none();
    let rates = config.unwrap_or(default);
    let (base, employee_amount, employer_amount) =
        contribution(basic_salary, rates, "provident fund")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "provident_fund".to_string(),
        rule_name: "Provident Fund".to_string(),
        statute_ref: "EPF & MP Act 1952".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "wage_ceiling": rates.wage_ceiling.to_string(),
            "employee_percent": rates.employee_percent.to_string(),
            "employer_percent": rates.employer_percent.to_string(),
            "config_source": if used_default { "statutory_default" } else { "tenant" }
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "employee_amount": employee_amount.to_string(),
            "employer_amount": employer_amount.to_string()
        }),
        reasoning: format!(
            "min({}, {}) = {}; employee {}% = {}, employer {}% = {}",
            basic_salary,
            rates.wage_ceiling,
            base,
            rates.employee_percent,
            employee_amount,
            rates.employer_percent,
            employer_amount
        ),
    };

    Ok(ContributionResult {
        base,
        employee_amount,
        employer_amount,
        used_default,
        audit_step,
    })
}

/// Calculates employee state insurance contributions on total earnings.
///
/// Only computed when `applicable`; otherwise both shares are zero and
/// `used_default` is false. `base = min(total_earnings, wage_ceiling)`.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when a share overflows.
pub fn calculate_state_insurance(
    total_earnings: Decimal,
    applicable: bool,
    config: Option<&ContributionConfig>,
    default: &ContributionConfig,
    step_number: u32,
) -> EngineResult<ContributionResult> {
    if !applicable {
        return Ok(ContributionResult {
            base: Decimal::ZERO,
            employee_amount: Decimal::ZERO,
            employer_amount: Decimal::ZERO,
            used_default: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "state_insurance".to_string(),
                rule_name: "Employee State Insurance".to_string(),
                statute_ref: "ESI Act 1948".to_string(),
                input: serde_json::json!({
                    "total_earnings": total_earnings.to_string(),
                    "esi_applicable": false
                }),
                output: serde_json::json!({
                    "employee_amount": "0",
                    "employer_amount": "0"
                }),
                reasoning: "ESI not applicable to this employee".to_string(),
            },
        });
    }

    let used_default = config.is_none();
    let rates = config.unwrap_or(default);
    let (base, employee_amount, employer_amount) =
        contribution(total_earnings, rates, "state insurance")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "state_insurance".to_string(),
        rule_name: "Employee State Insurance".to_string(),
        statute_ref: "ESI Act 1948".to_string(),
        input: serde_json::json!({
            "total_earnings": total_earnings.to_string(),
            "esi_applicable": true,
            "wage_ceiling": rates.wage_ceiling.to_string(),
            "employee_percent": rates.employee_percent.to_string(),
            "employer_percent": rates.employer_percent.to_string(),
            "config_source": if used_default { "statutory_default" } else { "tenant" }
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "employee_amount": employee_amount.to_string(),
            "employer_amount": employer_amount.to_string()
        }),
        reasoning: format!(
            "min({}, {}) = {}; employee {}% = {}, employer {}% = {}",
            total_earnings,
            rates.wage_ceiling,
            base,
            rates.employee_percent,
            employee_amount,
            rates.employer_percent,
            employer_amount
        ),
    };

    Ok(ContributionResult {
        base,
        employee_amount,
        employer_amount,
        used_default,
        audit_step,
    })
}

/// The result of a professional tax slab lookup.
#[derive(Debug, Clone)]
pub struct ProfessionalTaxResult {
    /// The flat tax of the matched slab, or zero.
    pub amount: Decimal,
    /// The slab that matched, if any.
    pub matched_slab: Option<PtSlab>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up professional tax for the period's total earnings.
///
/// Slabs are scanned in ascending `salary_from` order and the first slab with
/// `salary_from ≤ total_earnings` and (`salary_to` open or
/// `total_earnings ≤ salary_to`) supplies its flat amount. Not applicable, no
/// table for the state, or no matching slab all yield zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_professional_tax;
/// use payroll_engine::models::{PtConfig, PtSlab};
/// use rust_decimal::Decimal;
///
/// let config = PtConfig {
///     state: "Karnataka".to_string(),
///     slabs: vec![
///         PtSlab { salary_from: Decimal::ZERO, salary_to: Some(Decimal::from(24999)), pt_amount: Decimal::ZERO },
///         PtSlab { salary_from: Decimal::from(25000), salary_to: None, pt_amount: Decimal::from(200) },
///     ],
/// };
/// let result = calculate_professional_tax(Decimal::from(30000), true, Some(&config), 1);
/// assert_eq!(result.amount, Decimal::from(200));
/// ```
pub fn calculate_professional_tax(
    total_earnings: Decimal,
    applicable: bool,
    config: Option<&PtConfig>,
    step_number: u32,
) -> ProfessionalTaxResult {
    let matched_slab = match (applicable, config) {
        (true, Some(config)) => {
            let mut slabs: Vec<&PtSlab> = config.slabs.iter().collect();
            slabs.sort_by(|a, b| a.salary_from.cmp(&b.salary_from));
            slabs
                .into_iter()
                .find(|slab| slab.contains(total_earnings))
                .cloned()
        }
        _ => None,
    };
    let amount = matched_slab
        .as_ref()
        .map(|slab| slab.pt_amount)
        .unwrap_or(Decimal::ZERO);

    let reasoning = match (&matched_slab, applicable, config) {
        (_, false, _) => "Professional tax not applicable to this employee".to_string(),
        (_, true, None) => "No professional tax table configured for the state".to_string(),
        (None, true, Some(config)) => format!(
            "Earnings {} match no {} slab",
            total_earnings, config.state
        ),
        (Some(slab), true, Some(config)) => format!(
            "Earnings {} fall in {} slab {}–{}: flat {}",
            total_earnings,
            config.state,
            slab.salary_from,
            slab.salary_to
                .map(|to| to.to_string())
                .unwrap_or_else(|| "∞".to_string()),
            slab.pt_amount
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "professional_tax".to_string(),
        rule_name: "Professional Tax".to_string(),
        statute_ref: config
            .map(|c| format!("{} Professional Tax Act", c.state))
            .unwrap_or_else(|| "State Professional Tax Act".to_string()),
        input: serde_json::json!({
            "total_earnings": total_earnings.to_string(),
            "pt_applicable": applicable,
            "state": config.map(|c| c.state.clone()),
            "slab_count": config.map(|c| c.slabs.len()).unwrap_or(0)
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "slab_from": matched_slab.as_ref().map(|s| s.salary_from.to_string()),
            "slab_to": matched_slab.as_ref().and_then(|s| s.salary_to).map(|to| to.to_string())
        }),
        reasoning,
    };

    ProfessionalTaxResult {
        amount,
        matched_slab,
        audit_step,
    }
}

/// The result of the loss-of-pay calculation.
#[derive(Debug, Clone)]
pub struct LossOfPayResult {
    /// The amount deducted for unpaid days.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the loss-of-pay deduction: `basic_salary × lop_days / total_days`.
///
/// `basic_salary` is the already prorated basic, so partial attendance is
/// penalised twice: once through proration and again here. A non-positive
/// `total_days` yields zero.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when `basic_salary × lop_days` overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_loss_of_pay;
/// use rust_decimal::Decimal;
///
/// let result =
///     calculate_loss_of_pay(Decimal::from(12500), Decimal::from(5), Decimal::from(30), 1)
///         .unwrap();
/// assert_eq!(result.amount, Decimal::from(62500) / Decimal::from(30));
/// ```
pub fn calculate_loss_of_pay(
    basic_salary: Decimal,
    lop_days: Decimal,
    total_days: Decimal,
    step_number: u32,
) -> EngineResult<LossOfPayResult> {
    let amount = if total_days > Decimal::ZERO && lop_days != Decimal::ZERO {
        checked::scale(basic_salary, lop_days, total_days, "loss of pay")?
    } else {
        Decimal::ZERO
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "loss_of_pay".to_string(),
        rule_name: "Loss of Pay".to_string(),
        statute_ref: "Payment of Wages Act 1936".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "lop_days": lop_days.to_string(),
            "total_days": total_days.to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "{} x {} / {} = {} (basic is already prorated)",
            basic_salary, lop_days, total_days, amount
        ),
    };

    Ok(LossOfPayResult { amount, audit_step })
}
