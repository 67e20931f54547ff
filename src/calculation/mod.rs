//! Calculation logic for the payroll engine.
//!
//! This module contains the individual calculators (attendance proration,
//! salary structure evaluation, provident fund, state insurance, professional
//! tax, loss of pay and the TDS projection) and [`compute_payroll`], which
//! sequences them into a single monthly result. Nothing here performs I/O.

pub(crate) mod checked;
mod earnings;
mod payroll;
mod proration;
mod rounding;
mod statutory;
mod tds;

pub use earnings::{EarningsResult, evaluate_earnings};
pub use payroll::{ResolvedInputs, compute_payroll};
pub use proration::{ProrationFactor, ProrationResult, calculate_proration, working_days_in_month};
pub use rounding::round_half_up;
pub use statutory::{
    ContributionResult, LossOfPayResult, ProfessionalTaxResult, calculate_loss_of_pay,
    calculate_professional_tax, calculate_provident_fund, calculate_state_insurance,
};
pub use tds::{
    TdsProjectionInput, TdsResult, approved_declaration_total, project_tds, tax_on_income,
};
