//! Gathers every input of a calculation from the read collaborators.

use tracing::debug;

use crate::calculation::ResolvedInputs;
use crate::config::StatutoryDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{FinancialYear, PayrollCalculationInput, StatutoryConfigs};
use crate::store::PayrollDataSource;

/// Resolves the employee, salary structure, location, statutory
/// configuration and tax declarations for one calculation.
///
/// The salary structure is the one whose assignment is effective on the
/// first day of the pay month. Professional tax is looked up for the state of
/// the employee's location, falling back to `defaults.pt_state` when the
/// employee has no location or the location has no state. Tax declarations
/// are read only when TDS applies to the employee and the tenant has a TDS
/// configuration.
///
/// # Errors
///
/// - `InvalidInput` when the month or year is out of range
/// - `EmployeeNotFound` when the employee does not exist in the tenant
/// - `MissingSalaryStructure` when no assignment is effective on the pay date
/// - `AmbiguousSalaryStructure` when more than one assignment is effective
/// - `Configuration` when the effective assignment names an unknown structure
/// - `DataSource` when any read fails
pub async fn resolve_inputs(
    source: &dyn PayrollDataSource,
    input: &PayrollCalculationInput,
    defaults: &StatutoryDefaults,
) -> EngineResult<ResolvedInputs> {
    let pay_date = input.pay_date()?;
    let tenant_id = input.tenant_id.as_str();

    let employee = source
        .get_employee(tenant_id, &input.employee_id)
        .await?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: input.employee_id.clone(),
            tenant_id: input.tenant_id.clone(),
        })?;

    let assignments = source
        .list_salary_assignments(tenant_id, &employee.id)
        .await?;
    let mut effective = assignments
        .into_iter()
        .filter(|a| a.is_effective_on(pay_date))
        .collect::<Vec<_>>();
    let assignment = match effective.len() {
        0 => {
            return Err(EngineError::MissingSalaryStructure {
                employee_id: employee.id.clone(),
                pay_date,
            });
        }
        1 => effective.remove(0),
        count => {
            return Err(EngineError::AmbiguousSalaryStructure {
                employee_id: employee.id.clone(),
                pay_date,
                count,
            });
        }
    };

    let structure = source
        .get_salary_structure(tenant_id, &assignment.structure_id)
        .await?
        .ok_or_else(|| {
            EngineError::configuration(format!(
                "salary structure '{}' assigned to employee '{}' does not exist",
                assignment.structure_id, employee.id
            ))
        })?;

    let location = match &employee.location_id {
        Some(location_id) => source.get_location(tenant_id, location_id).await?,
        None => None,
    };
    let (pt_state, pt_state_defaulted) = match location.as_ref().and_then(|l| l.state.clone()) {
        Some(state) => (state, false),
        None => (defaults.pt_state.clone(), true),
    };

    let (pf, esi, pt, tds) = tokio::try_join!(
        source.get_pf_config(tenant_id),
        source.get_esi_config(tenant_id),
        source.get_pt_config(tenant_id, &pt_state),
        source.get_tds_config(tenant_id),
    )?;

    let tax_declarations = if employee.tds_applicable && tds.is_some() {
        let financial_year = FinancialYear::for_pay_month(input.month, input.year);
        source
            .list_tax_declarations(tenant_id, &employee.id, financial_year)
            .await?
    } else {
        Vec::new()
    };

    debug!(
        employee_id = %employee.id,
        tenant_id = %tenant_id,
        structure_id = %structure.id,
        pt_state = %pt_state,
        declarations = tax_declarations.len(),
        "Resolved calculation inputs"
    );

    Ok(ResolvedInputs {
        employee,
        structure,
        location,
        pt_state,
        pt_state_defaulted,
        statutory: StatutoryConfigs { pf, esi, pt, tds },
        tax_declarations,
    })
}
