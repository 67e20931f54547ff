//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::PayrollCalculator;

/// Shared application state.
///
/// Holds the calculator, which carries the data source and the loaded
/// engine configuration.
#[derive(Clone)]
pub struct AppState {
    calculator: Arc<PayrollCalculator>,
}

impl AppState {
    /// Creates a new application state around a calculator.
    pub fn new(calculator: PayrollCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }

    /// Returns the calculator.
    pub fn calculator(&self) -> &PayrollCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
