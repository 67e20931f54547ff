//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating one employee's
//! monthly pay and for health checks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, ENGINE_VERSION, HealthResponse};
pub use state::AppState;
