//! Statutory payroll engine for Indian payroll.
//!
//! This crate calculates one employee's pay for one month: attendance
//! proration, salary structure evaluation, provident fund, employee state
//! insurance, professional tax, loss of pay and TDS (income tax withheld at
//! source), down to net pay, with an audit trail of every step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
