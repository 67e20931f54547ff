//! The payroll calculator: resolve, then compute.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::calculation::{ResolvedInputs, compute_payroll};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollCalculationInput, PayrollCalculationResult};
use crate::store::PayrollDataSource;

use super::resolve_inputs;

/// Calculates one employee's pay for one month against a data source.
///
/// Holds no mutable state, so a single calculator can serve any number of
/// concurrent calculations.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::engine::PayrollCalculator;
/// use payroll_engine::models::PayrollCalculationInput;
/// use payroll_engine::store::InMemoryDataSource;
///
/// # async fn run() -> payroll_engine::error::EngineResult<()> {
/// let config = ConfigLoader::load("./config/default")?.into_config();
/// let source = InMemoryDataSource::from_yaml_file("./data/sample_snapshot.yaml")?;
/// let calculator = PayrollCalculator::new(Arc::new(source), config);
///
/// let input = PayrollCalculationInput::new("acme", "emp_001", 6, 2025);
/// let result = calculator.calculate(&input).await?;
/// println!("Net pay: {}", result.net_pay);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PayrollCalculator {
    source: Arc<dyn PayrollDataSource>,
    config: EngineConfig,
}

impl PayrollCalculator {
    /// Creates a calculator reading from `source`.
    pub fn new(source: Arc<dyn PayrollDataSource>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves a calculation's inputs within the configured deadline.
    ///
    /// # Errors
    ///
    /// Any error of [`resolve_inputs`], or `ResolutionTimeout` when the reads
    /// do not complete within `resolution_timeout_ms`.
    pub async fn resolve(&self, input: &PayrollCalculationInput) -> EngineResult<ResolvedInputs> {
        let settings = self.config.settings();
        let resolution = resolve_inputs(self.source.as_ref(), input, self.config.defaults());

        tokio::time::timeout(settings.resolution_timeout(), resolution)
            .await
            .map_err(|_| EngineError::ResolutionTimeout {
                employee_id: input.employee_id.clone(),
                timeout_ms: settings.resolution_timeout_ms,
            })?
    }

    /// Calculates pay for one employee and month.
    ///
    /// Recomputing with unchanged inputs and data produces an identical result.
    ///
    /// # Errors
    ///
    /// Any error of [`resolve`](Self::resolve) or
    /// [`compute_payroll`](crate::calculation::compute_payroll).
    pub async fn calculate(
        &self,
        input: &PayrollCalculationInput,
    ) -> EngineResult<PayrollCalculationResult> {
        let start_time = Instant::now();
        debug!(
            employee_id = %input.employee_id,
            tenant_id = %input.tenant_id,
            month = input.month,
            year = input.year,
            "Calculating payroll"
        );

        let resolved = self.resolve(input).await?;
        let result = compute_payroll(input, &resolved, self.config.defaults())?;

        for default in &result.defaults_applied {
            warn!(
                employee_id = %result.employee_id,
                tenant_id = %result.tenant_id,
                default = ?default,
                "Statutory default applied"
            );
        }

        info!(
            employee_id = %result.employee_id,
            tenant_id = %result.tenant_id,
            month = result.month,
            year = result.year,
            gross_earnings = %result.gross_earnings,
            gross_deductions = %result.gross_deductions,
            net_pay = %result.net_pay,
            duration_us = start_time.elapsed().as_micros(),
            "Payroll calculated"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, StatutoryDefaults};
    use crate::models::{
        AppliedDefault, ComponentType, Employee, SalaryComponent, SalaryStructure,
        SalaryStructureAssignment,
    };
    use crate::store::{DataSnapshot, InMemoryDataSource};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn calculator(settings: EngineSettings) -> PayrollCalculator {
        let snapshot = DataSnapshot {
            employees: vec![Employee {
                id: "emp_001".to_string(),
                tenant_id: "acme".to_string(),
                name: "Asha Rao".to_string(),
                ctc_annual: None,
                esi_applicable: false,
                pt_applicable: false,
                tds_applicable: false,
                location_id: None,
            }],
            salary_structures: vec![SalaryStructure {
                id: "std".to_string(),
                tenant_id: "acme".to_string(),
                name: "Standard".to_string(),
                components: vec![SalaryComponent {
                    name: "Basic".to_string(),
                    code: Some("BASIC".to_string()),
                    component_type: ComponentType::Fixed,
                    amount: Some(Decimal::from(15000)),
                    percent: None,
                }],
            }],
            salary_assignments: vec![SalaryStructureAssignment {
                employee_id: "emp_001".to_string(),
                structure_id: "std".to_string(),
                effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                effective_to: None,
            }],
            ..DataSnapshot::default()
        };
        PayrollCalculator::new(
            Arc::new(InMemoryDataSource::from_snapshot(snapshot)),
            EngineConfig::new(StatutoryDefaults::default(), settings),
        )
    }

    #[tokio::test]
    async fn test_calculate_applies_pf_default() {
        let calculator = calculator(EngineSettings::default());

        let result = calculator
            .calculate(&PayrollCalculationInput::new("acme", "emp_001", 6, 2025))
            .await
            .unwrap();

        assert_eq!(result.pf_employee, Decimal::from(1800));
        assert_eq!(result.net_pay, Decimal::from(13200));
        assert_eq!(result.defaults_applied, vec![AppliedDefault::PfConfig]);
    }

    #[tokio::test]
    async fn test_calculate_is_repeatable() {
        let calculator = calculator(EngineSettings::default());
        let input = PayrollCalculationInput::new("acme", "emp_001", 6, 2025);

        let first = calculator.calculate(&input).await.unwrap();
        let second = calculator.calculate(&input).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_calculate_propagates_not_found() {
        let calculator = calculator(EngineSettings::default());

        let result = calculator
            .calculate(&PayrollCalculationInput::new("acme", "emp_002", 6, 2025))
            .await;

        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }
}
