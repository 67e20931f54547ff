//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a single employee's calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every operation in the engine returns this error type. An error aborts only
/// the calculation it was raised from; the caller decides whether to skip,
/// log or halt a batch.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
///     tenant_id: "acme".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee 'emp_404' not found in tenant 'acme'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The employee does not exist for the given tenant.
    #[error("Employee '{employee_id}' not found in tenant '{tenant_id}'")]
    EmployeeNotFound {
        /// The employee that was looked up.
        employee_id: String,
        /// The tenant the lookup was scoped to.
        tenant_id: String,
    },

    /// No salary structure assignment is effective on the pay date.
    #[error("No salary structure effective for employee '{employee_id}' on {pay_date}")]
    MissingSalaryStructure {
        /// The employee without an effective structure.
        employee_id: String,
        /// The pay date the structure was resolved against.
        pay_date: NaiveDate,
    },

    /// More than one salary structure assignment overlaps the pay date.
    #[error(
        "{count} salary structures are effective for employee '{employee_id}' on {pay_date}"
    )]
    AmbiguousSalaryStructure {
        /// The employee with overlapping assignments.
        employee_id: String,
        /// The pay date the structure was resolved against.
        pay_date: NaiveDate,
        /// How many assignments overlap the pay date.
        count: usize,
    },

    /// A degenerate configuration value that cannot be computed safely.
    #[error("Configuration error: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },

    /// A calculation input was out of range or inconsistent.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending input field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An amount grew beyond what a decimal can represent.
    #[error("Amount out of range while computing {operation}")]
    AmountOutOfRange {
        /// The calculation that overflowed.
        operation: String,
    },

    /// A read collaborator failed.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the failure reported by the data source.
        message: String,
    },

    /// Input resolution did not finish within the caller's deadline.
    #[error("Resolving inputs for employee '{employee_id}' timed out after {timeout_ms}ms")]
    ResolutionTimeout {
        /// The employee whose inputs were being resolved.
        employee_id: String,
        /// The deadline that elapsed.
        timeout_ms: u64,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`EngineError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for [`EngineError::AmountOutOfRange`].
    pub fn amount_out_of_range(operation: impl Into<String>) -> Self {
        Self::AmountOutOfRange {
            operation: operation.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
