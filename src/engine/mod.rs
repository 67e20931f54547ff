//! Orchestration of a payroll calculation.
//!
//! [`resolve_inputs`] performs every read a calculation needs up front;
//! [`PayrollCalculator`] bounds that resolution with a deadline and hands the
//! result to the pure [`compute_payroll`](crate::calculation::compute_payroll).

mod calculator;
mod resolver;

pub use calculator::PayrollCalculator;
pub use resolver::resolve_inputs;
