//! Core data models for the payroll engine.
//!
//! This module contains the read-only snapshots supplied by collaborators
//! and the input and result contracts of a calculation.

mod calculation_result;
mod employee;
mod payroll_input;
mod salary_structure;
mod statutory;
mod tax_declaration;

pub use calculation_result::{
    AppliedDefault, AuditStep, AuditTrace, AuditWarning, ComponentBreakdown, DEDUCTION_ESI,
    DEDUCTION_LOP, DEDUCTION_PF, DEDUCTION_PT, DEDUCTION_TDS, PayrollCalculationResult,
};
pub use employee::{Employee, Location};
pub use payroll_input::PayrollCalculationInput;
pub use salary_structure::{
    ComponentType, SalaryComponent, SalaryStructure, SalaryStructureAssignment,
};
pub use statutory::{
    ContributionConfig, EsiConfig, PfConfig, PtConfig, PtSlab, StatutoryConfigs, TaxSlab,
    TdsConfig,
};
pub use tax_declaration::{DeclarationStatus, FinancialYear, TaxDeclaration};
