//! Salary structure evaluation.
//!
//! This module turns the components of a salary structure into prorated
//! earnings and folds in ad-hoc variable payments.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, SalaryStructure};

use super::{ProrationFactor, checked};

/// The result of evaluating a salary structure for one period.
#[derive(Debug, Clone)]
pub struct EarningsResult {
    /// Earnings by component name.
    pub earnings: BTreeMap<String, Decimal>,
    /// Sum of all components.
    pub total_earnings: Decimal,
    /// The prorated basic salary (zero if the structure has no basic component).
    pub basic_salary: Decimal,
    /// The house rent allowance (zero if the structure has none).
    pub hra: Decimal,
    /// One audit step per component.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while evaluating.
    pub warnings: Vec<AuditWarning>,
}

/// Evaluates every component of `structure` for the period.
///
/// Each component's base amount (see
/// [`SalaryComponent::base_amount`](crate::models::SalaryComponent::base_amount))
/// is scaled by `factor`; a variable payment keyed by the component's name is
/// then added unprorated. Components sharing a name accumulate into one
/// earnings entry. Variable payments naming no component are not paid and
/// raise an `UNMATCHED_VARIABLE_PAYMENT` warning.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when a component or the earnings total overflows.
///
/// # Arguments
///
/// * `structure` - The salary structure in force on the pay date
/// * `ctc_annual` - The employee's annual CTC, base of percentage components
/// * `factor` - The attendance proration factor
/// * `variable_payments` - Ad-hoc payments keyed by component name
/// * `step_number` - The first step number for the audit trail
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{ProrationFactor, evaluate_earnings};
/// use payroll_engine::models::{ComponentType, SalaryComponent, SalaryStructure};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let structure = SalaryStructure {
///     id: "std".to_string(),
///     tenant_id: "acme".to_string(),
///     name: "Standard".to_string(),
///     components: vec![SalaryComponent {
///         name: "Basic".to_string(),
///         code: Some("BASIC".to_string()),
///         component_type: ComponentType::Fixed,
///         amount: Some(Decimal::from(15000)),
///         percent: None,
///     }],
/// };
/// let factor = ProrationFactor::new(Decimal::from(25), Decimal::from(30)).unwrap();
///
/// let result = evaluate_earnings(&structure, Decimal::ZERO, &factor, &BTreeMap::new(), 1).unwrap();
/// assert_eq!(result.basic_salary, Decimal::from(12500));
/// assert_eq!(result.total_earnings, Decimal::from(12500));
/// ```
pub fn evaluate_earnings(
    structure: &SalaryStructure,
    ctc_annual: Decimal,
    factor: &ProrationFactor,
    variable_payments: &BTreeMap<String, Decimal>,
    step_number: u32,
) -> EngineResult<EarningsResult> {
    let mut earnings: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_earnings = Decimal::ZERO;
    let mut basic_salary = Decimal::ZERO;
    let mut hra = Decimal::ZERO;
    let mut audit_steps = Vec::with_capacity(structure.components.len());
    let mut step = step_number;

    for component in &structure.components {
        let base = component.base_amount(ctc_annual)?;
        let prorated = factor.apply(base)?;
        let variable = variable_payments.get(&component.name).copied();
        let amount = checked::add(
            prorated,
            variable.unwrap_or(Decimal::ZERO),
            "salary component with variable payment",
        )?;

        let entry = earnings.entry(component.name.clone()).or_insert(Decimal::ZERO);
        *entry = checked::add(*entry, amount, "salary component")?;
        total_earnings = checked::add(total_earnings, amount, "total earnings")?;

        if component.is_basic() {
            basic_salary = amount;
        }
        if component.is_hra() {
            hra = amount;
        }

        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: "salary_component".to_string(),
            rule_name: format!("Salary Component: {}", component.name),
            statute_ref: format!("Salary structure {}", structure.id),
            input: serde_json::json!({
                "component": component.name,
                "code": component.code,
                "type": component.component_type,
                "amount": component.amount.map(|a| a.to_string()),
                "percent": component.percent.map(|p| p.to_string()),
                "ctc_annual": ctc_annual.to_string(),
                "proration_factor": factor.value().normalize().to_string(),
                "variable_payment": variable.map(|v| v.to_string())
            }),
            output: serde_json::json!({
                "base_amount": base.to_string(),
                "prorated_amount": prorated.to_string(),
                "amount": amount.to_string()
            }),
            reasoning: match variable {
                Some(v) => format!(
                    "{} prorated to {} plus variable payment {} = {}",
                    base, prorated, v, amount
                ),
                None => format!("{} prorated to {}", base, prorated),
            },
        });
        step += 1;
    }

    let warnings = variable_payments
        .iter()
        .filter(|(name, _)| !structure.components.iter().any(|c| &c.name == *name))
        .map(|(name, amount)| {
            AuditWarning::new(
                "UNMATCHED_VARIABLE_PAYMENT",
                format!(
                    "Variable payment '{}' of {} matches no salary component and was not paid",
                    name, amount
                ),
                "medium",
            )
        })
        .collect();

    Ok(EarningsResult {
        earnings,
        total_earnings,
        basic_salary,
        hra,
        audit_steps,
        warnings,
    })
}
