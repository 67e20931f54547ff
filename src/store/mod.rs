//! Read collaborators the engine resolves its inputs from.
//!
//! The engine only ever reads: employees, salary structures and their
//! assignments, locations, tenant statutory configuration and tax
//! declarations are owned elsewhere. [`PayrollDataSource`] is the seam; an
//! in-memory implementation and a memoising decorator are provided.

mod caching;
mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{
    Employee, EsiConfig, FinancialYear, Location, PfConfig, PtConfig, SalaryStructure,
    SalaryStructureAssignment, TaxDeclaration, TdsConfig,
};

pub use caching::CachingDataSource;
pub use in_memory::{DataSnapshot, InMemoryDataSource, TenantStatutory};

/// Failure reported by a read collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store rejected or failed the read.
    #[error("Database error: {0}")]
    Database(String),

    /// The backing store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<RepositoryError> for EngineError {
    fn from(error: RepositoryError) -> Self {
        EngineError::DataSource {
            message: error.to_string(),
        }
    }
}

/// Point-in-time reads of everything a payroll calculation needs.
///
/// Lookups of a single record return `Ok(None)` when the record does not
/// exist; `Err` is reserved for failures of the store itself.
#[async_trait]
pub trait PayrollDataSource: Send + Sync {
    // Employee-scoped reads
    /// Looks up an employee within a tenant.
    async fn get_employee(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Option<Employee>, RepositoryError>;

    /// Lists every salary structure assignment of an employee, in any date range.
    async fn list_salary_assignments(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Vec<SalaryStructureAssignment>, RepositoryError>;

    /// Looks up a salary structure by id.
    async fn get_salary_structure(
        &self,
        tenant_id: &str,
        structure_id: &str,
    ) -> Result<Option<SalaryStructure>, RepositoryError>;

    /// Looks up a work location by id.
    async fn get_location(
        &self,
        tenant_id: &str,
        location_id: &str,
    ) -> Result<Option<Location>, RepositoryError>;

    /// Lists an employee's tax declarations for one financial year.
    async fn list_tax_declarations(
        &self,
        tenant_id: &str,
        employee_id: &str,
        financial_year: FinancialYear,
    ) -> Result<Vec<TaxDeclaration>, RepositoryError>;

    // Tenant-global statutory configuration
    /// The tenant's provident fund configuration.
    async fn get_pf_config(&self, tenant_id: &str) -> Result<Option<PfConfig>, RepositoryError>;

    /// The tenant's state insurance configuration.
    async fn get_esi_config(&self, tenant_id: &str)
    -> Result<Option<EsiConfig>, RepositoryError>;

    /// The tenant's professional tax table for a state.
    async fn get_pt_config(
        &self,
        tenant_id: &str,
        state: &str,
    ) -> Result<Option<PtConfig>, RepositoryError>;

    /// The tenant's income tax withholding configuration.
    async fn get_tds_config(&self, tenant_id: &str)
    -> Result<Option<TdsConfig>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_becomes_data_source_error() {
        let error: EngineError = RepositoryError::Connection("refused".to_string()).into();

        match error {
            EngineError::DataSource { message } => {
                assert_eq!(message, "Connection error: refused");
            }
            other => panic!("Expected DataSource error, got {:?}", other),
        }
    }
}
