//! The pure payroll computation.
//!
//! [`compute_payroll`] takes fully resolved inputs and performs no I/O, so the
//! same inputs always produce the same [`PayrollCalculationResult`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::StatutoryDefaults;
use crate::error::EngineResult;
use crate::models::{
    AppliedDefault, AuditTrace, AuditWarning, ComponentBreakdown, DEDUCTION_ESI, DEDUCTION_LOP,
    DEDUCTION_PF, DEDUCTION_PT, DEDUCTION_TDS, Employee, Location, PayrollCalculationInput,
    PayrollCalculationResult, SalaryStructure, StatutoryConfigs, TaxDeclaration,
};

use super::{
    TdsProjectionInput, checked, calculate_loss_of_pay, calculate_professional_tax, calculate_proration,
    calculate_provident_fund, calculate_state_insurance, evaluate_earnings, project_tds,
};

/// Everything a calculation reads, gathered before computing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    /// The employee being paid.
    pub employee: Employee,
    /// The single salary structure in force on the pay date.
    pub structure: SalaryStructure,
    /// The employee's work location, if any.
    pub location: Option<Location>,
    /// The state whose professional tax table was resolved.
    pub pt_state: String,
    /// True when `pt_state` is the default rather than the location's state.
    pub pt_state_defaulted: bool,
    /// Tenant statutory configuration.
    pub statutory: StatutoryConfigs,
    /// The employee's declarations for the pay month's financial year.
    pub tax_declarations: Vec<TaxDeclaration>,
}

fn default_warning(default: AppliedDefault, defaults: &StatutoryDefaults) -> AuditWarning {
    let message = match default {
        AppliedDefault::PfConfig => format!(
            "No PF configuration for tenant; statutory default ceiling {} at {}%/{}% used",
            defaults.pf.wage_ceiling, defaults.pf.employee_percent, defaults.pf.employer_percent
        ),
        AppliedDefault::EsiConfig => format!(
            "No ESI configuration for tenant; statutory default ceiling {} at {}%/{}% used",
            defaults.esi.wage_ceiling,
            defaults.esi.employee_percent,
            defaults.esi.employer_percent
        ),
        AppliedDefault::PtState => format!(
            "Employee location has no state; professional tax resolved for {}",
            defaults.pt_state
        ),
        AppliedDefault::TdsStandardDeduction => format!(
            "TDS configuration has no standard deduction; default {} used",
            defaults.tds_standard_deduction
        ),
    };
    AuditWarning::new("STATUTORY_DEFAULT_APPLIED", message, "medium")
}

/// Computes one employee's pay for one month from resolved inputs.
///
/// Runs proration, earnings evaluation, the statutory deductions, loss of pay
/// and the TDS projection in that order, then assembles the result with
/// `gross_deductions = pf_employee + esi_employee + pt + tds + lop_amount` and
/// `net_pay = gross_earnings - gross_deductions`.
///
/// # Errors
///
/// - `InvalidInput` for an out-of-range month, year or day count
/// - `Configuration` when the period has no working days
/// - `AmountOutOfRange` when an amount overflows the decimal range
pub fn compute_payroll(
    input: &PayrollCalculationInput,
    resolved: &ResolvedInputs,
    defaults: &StatutoryDefaults,
) -> EngineResult<PayrollCalculationResult> {
    input.pay_date()?;
    let employee = &resolved.employee;
    let statutory = &resolved.statutory;
    let mut trace = AuditTrace::default();
    let mut defaults_applied = Vec::new();
    let mut step: u32 = 1;

    let proration = calculate_proration(input, step)?;
    trace.steps.push(proration.audit_step.clone());
    step += 1;

    let earnings = evaluate_earnings(
        &resolved.structure,
        employee.ctc_annual_or_zero(),
        &proration.factor,
        &input.variable_payments,
        step,
    )?;
    step += earnings.audit_steps.len() as u32;
    trace.steps.extend(earnings.audit_steps);
    trace.warnings.extend(earnings.warnings);

    let pf = calculate_provident_fund(
        earnings.basic_salary,
        statutory.pf.as_ref(),
        &defaults.pf,
        step,
    )?;
    trace.steps.push(pf.audit_step);
    step += 1;
    if pf.used_default {
        defaults_applied.push(AppliedDefault::PfConfig);
    }

    let esi = calculate_state_insurance(
        earnings.total_earnings,
        employee.esi_applicable,
        statutory.esi.as_ref(),
        &defaults.esi,
        step,
    )?;
    trace.steps.push(esi.audit_step);
    step += 1;
    if esi.used_default {
        defaults_applied.push(AppliedDefault::EsiConfig);
    }

    let pt = calculate_professional_tax(
        earnings.total_earnings,
        employee.pt_applicable,
        statutory.pt.as_ref(),
        step,
    );
    trace.steps.push(pt.audit_step);
    step += 1;
    if employee.pt_applicable && resolved.pt_state_defaulted {
        defaults_applied.push(AppliedDefault::PtState);
    }

    let lop = calculate_loss_of_pay(
        earnings.basic_salary,
        proration.lop_days,
        proration.total_days,
        step,
    )?;
    trace.steps.push(lop.audit_step);
    step += 1;

    let tds = project_tds(
        TdsProjectionInput {
            month: input.month,
            year: input.year,
            total_earnings: earnings.total_earnings,
            pf_employee: pf.employee_amount,
        },
        employee.tds_applicable,
        statutory.tds.as_ref(),
        &resolved.tax_declarations,
        defaults.tds_standard_deduction,
        step,
    )?;
    trace.steps.push(tds.audit_step);
    if tds.used_default_standard_deduction {
        defaults_applied.push(AppliedDefault::TdsStandardDeduction);
    }

    trace.warnings.extend(
        defaults_applied
            .iter()
            .map(|default| default_warning(*default, defaults)),
    );

    let gross_deductions = checked::sum(
        [
            pf.employee_amount,
            esi.employee_amount,
            pt.amount,
            tds.monthly_tds,
            lop.amount,
        ],
        "gross deductions",
    )?;
    let net_pay = checked::sub(earnings.total_earnings, gross_deductions, "net pay")?;

    let deductions: BTreeMap<String, Decimal> = [
        (DEDUCTION_PF, pf.employee_amount),
        (DEDUCTION_ESI, esi.employee_amount),
        (DEDUCTION_PT, pt.amount),
        (DEDUCTION_TDS, tds.monthly_tds),
        (DEDUCTION_LOP, lop.amount),
    ]
    .into_iter()
    .map(|(name, amount)| (name.to_string(), amount))
    .collect();

    Ok(PayrollCalculationResult {
        employee_id: employee.id.clone(),
        tenant_id: employee.tenant_id.clone(),
        month: input.month,
        year: input.year,
        financial_year: tds.financial_year,
        gross_earnings: earnings.total_earnings,
        gross_deductions,
        pf_employee: pf.employee_amount,
        pf_employer: pf.employer_amount,
        esi_employee: esi.employee_amount,
        esi_employer: esi.employer_amount,
        pt: pt.amount,
        tds: tds.monthly_tds,
        lop_days: proration.lop_days,
        lop_amount: lop.amount,
        net_pay,
        days_paid: proration.days_worked,
        total_days: proration.total_days,
        component_breakdown: ComponentBreakdown {
            earnings: earnings.earnings,
            deductions,
        },
        defaults_applied,
        audit_trace: trace,
    })
}
