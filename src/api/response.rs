//! Response types for the payroll engine API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollCalculationResult;

/// Version reported in every calculation response.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Successful response of `/payroll/calculate`.
///
/// The calculation result is flattened into the envelope.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    /// Identifier of this calculation run.
    pub calculation_id: Uuid,
    /// When the calculation completed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The calculation result.
    #[serde(flatten)]
    pub result: PayrollCalculationResult,
}

impl CalculationResponse {
    /// Wraps a result in a fresh envelope.
    pub fn new(calculation_id: Uuid, result: PayrollCalculationResult) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            result,
        }
    }
}

/// Response of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is answering.
    pub status: String,
    /// Engine version.
    pub engine_version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::MissingSalaryStructure { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "MISSING_SALARY_STRUCTURE",
                    message,
                    "Assign a salary structure covering the first day of the pay month",
                ),
            ),
            EngineError::AmbiguousSalaryStructure { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "AMBIGUOUS_SALARY_STRUCTURE",
                    message,
                    "Salary structure assignments must not overlap",
                ),
            ),
            EngineError::AmountOutOfRange { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    message,
                    "Check variable payments, CTC and statutory configuration for oversized amounts",
                ),
            ),
            EngineError::InvalidInput { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::ResolutionTimeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                ApiError::new("RESOLUTION_TIMEOUT", message),
            ),
            EngineError::DataSource { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("DATA_SOURCE_ERROR", message),
            ),
            EngineError::Configuration { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
