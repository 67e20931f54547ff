//! Income tax withholding (TDS) projection.
//!
//! The current period's earnings are annualised, reduced by provident fund,
//! the standard deduction and approved declarations, and run through the
//! progressive tax slabs. One twelfth of the annual tax is withheld.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, FinancialYear, TaxDeclaration, TaxSlab, TdsConfig};

use super::checked;

const MONTHS_PER_YEAR: i64 = 12;

/// Tax on `taxable_income` under progressive `slabs`.
///
/// Slabs are walked in ascending `from` order. Each slab taxes
/// `min(remaining, width)` at its rate and the remainder moves up; the walk
/// stops once nothing remains. Zero or negative income yields zero tax.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when a band's tax or the running total overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::tax_on_income;
/// use payroll_engine::models::TaxSlab;
/// use rust_decimal::Decimal;
///
/// let slabs = vec![
///     TaxSlab { from: Decimal::ZERO, to: Some(Decimal::from(300000)), rate: Decimal::ZERO },
///     TaxSlab { from: Decimal::from(300000), to: None, rate: Decimal::from(10) },
/// ];
/// assert_eq!(tax_on_income(Decimal::from(500000), &slabs).unwrap(), Decimal::from(20000));
/// assert_eq!(tax_on_income(Decimal::from(-1000), &slabs).unwrap(), Decimal::ZERO);
/// ```
pub fn tax_on_income(taxable_income: Decimal, slabs: &[TaxSlab]) -> EngineResult<Decimal> {
    let mut ordered: Vec<&TaxSlab> = slabs.iter().collect();
    ordered.sort_by(|a, b| a.from.cmp(&b.from));

    let mut annual_tax = Decimal::ZERO;
    let mut remaining = taxable_income;

    for slab in ordered {
        if remaining <= Decimal::ZERO {
            break;
        }
        let in_slab = match slab.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let band_tax = checked::percent_of(in_slab, slab.rate, "income tax slab")?;
        annual_tax = checked::add(annual_tax, band_tax, "annual income tax")?;
        remaining -= in_slab;
    }

    Ok(annual_tax)
}

/// Sum of relief from approved declarations for `financial_year`.
///
/// Declarations for other years or not yet approved are ignored.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when the total overflows.
pub fn approved_declaration_total(
    declarations: &[TaxDeclaration],
    financial_year: FinancialYear,
) -> EngineResult<Decimal> {
    checked::sum(
        declarations
            .iter()
            .filter(|decl| decl.financial_year == financial_year)
            .map(TaxDeclaration::relief),
        "approved tax declarations",
    )
}

/// Period figures the projection starts from.
#[derive(Debug, Clone, Copy)]
pub struct TdsProjectionInput {
    /// Pay month, 1–12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// Total earnings of the period.
    pub total_earnings: Decimal,
    /// Employee provident fund contribution of the period.
    pub pf_employee: Decimal,
}

/// The result of a TDS projection.
#[derive(Debug, Clone)]
pub struct TdsResult {
    /// Tax withheld this month.
    pub monthly_tds: Decimal,
    /// Projected tax for the year.
    pub annual_tax: Decimal,
    /// Earnings × 12.
    pub annual_projected_income: Decimal,
    /// Income after deductions; may be negative.
    pub taxable_income: Decimal,
    /// Relief from approved declarations.
    pub declared_deductions: Decimal,
    /// The standard deduction applied.
    pub standard_deduction: Decimal,
    /// The financial year of the pay month.
    pub financial_year: FinancialYear,
    /// True when the configuration had no standard deduction and the default was used.
    pub used_default_standard_deduction: bool,
    /// The audit step recording this projection.
    pub audit_step: AuditStep,
}

/// Projects this month's TDS.
///
/// Runs only when `applicable` and a [`TdsConfig`] exists; otherwise every
/// amount is zero.
///
/// 1. `annual_projected_income = total_earnings × 12`
/// 2. `taxable = annual − pf_employee × 12 − standard_deduction − approved declarations`
/// 3. `annual_tax = tax_on_income(taxable, slabs)`
/// 4. `monthly_tds = annual_tax / 12`
///
/// The projection assumes this period's earnings recur all year.
///
/// # Errors
///
/// Returns `AmountOutOfRange` when the annual projection or the tax overflows.
pub fn project_tds(
    period: TdsProjectionInput,
    applicable: bool,
    config: Option<&TdsConfig>,
    declarations: &[TaxDeclaration],
    default_standard_deduction: Decimal,
    step_number: u32,
) -> EngineResult<TdsResult> {
    let financial_year = FinancialYear::for_pay_month(period.month, period.year);
    let months = Decimal::from(MONTHS_PER_YEAR);

    let config = match (applicable, config) {
        (true, Some(config)) => config,
        _ => {
            let reason = if applicable {
                "No TDS configuration for tenant; nothing withheld"
            } else {
                "TDS not applicable to this employee"
            };
            return Ok(TdsResult {
                monthly_tds: Decimal::ZERO,
                annual_tax: Decimal::ZERO,
                annual_projected_income: Decimal::ZERO,
                taxable_income: Decimal::ZERO,
                declared_deductions: Decimal::ZERO,
                standard_deduction: Decimal::ZERO,
                financial_year,
                used_default_standard_deduction: false,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "tds_projection".to_string(),
                    rule_name: "TDS Projection".to_string(),
                    statute_ref: "Income Tax Act 1961 s.192".to_string(),
                    input: serde_json::json!({
                        "tds_applicable": applicable,
                        "tds_configured": config.is_some()
                    }),
                    output: serde_json::json!({ "monthly_tds": "0" }),
                    reasoning: reason.to_string(),
                },
            });
        }
    };

    let used_default_standard_deduction = config.standard_deduction.is_none();
    let standard_deduction = config
        .standard_deduction
        .unwrap_or(default_standard_deduction);
    let declared_deductions = approved_declaration_total(declarations, financial_year)?;

    let annual_projected_income =
        checked::mul(period.total_earnings, months, "TDS annual projection")?;
    let annual_pf = checked::mul(period.pf_employee, months, "TDS annual provident fund")?;
    let taxable_income = [annual_pf, standard_deduction, declared_deductions]
        .into_iter()
        .try_fold(annual_projected_income, |taxable, deduction| {
            checked::sub(taxable, deduction, "TDS taxable income")
        })?;
    let annual_tax = tax_on_income(taxable_income, &config.tax_slabs)?;
    let monthly_tds = annual_tax / months;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tds_projection".to_string(),
        rule_name: "TDS Projection".to_string(),
        statute_ref: "Income Tax Act 1961 s.192".to_string(),
        input: serde_json::json!({
            "financial_year": financial_year.to_string(),
            "total_earnings": period.total_earnings.to_string(),
            "pf_employee": period.pf_employee.to_string(),
            "standard_deduction": standard_deduction.to_string(),
            "declared_deductions": declared_deductions.to_string(),
            "slab_count": config.tax_slabs.len()
        }),
        output: serde_json::json!({
            "annual_projected_income": annual_projected_income.to_string(),
            "taxable_income": taxable_income.to_string(),
            "annual_tax": annual_tax.to_string(),
            "monthly_tds": monthly_tds.to_string()
        }),
        reasoning: format!(
            "{} x 12 - PF {} x 12 - standard {} - declared {} = taxable {}; annual tax {} / 12 = {}",
            period.total_earnings,
            period.pf_employee,
            standard_deduction,
            declared_deductions,
            taxable_income,
            annual_tax,
            monthly_tds
        ),
    };

    Ok(TdsResult {
        monthly_tds,
        annual_tax,
        annual_projected_income,
        taxable_income,
        declared_deductions,
        standard_deduction,
        financial_year,
        used_default_standard_deduction,
        audit_step,
    })
}
