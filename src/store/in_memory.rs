//! An in-memory read collaborator seeded from a data snapshot.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::load_yaml;
use crate::error::EngineResult;
use crate::models::{
    Employee, EsiConfig, FinancialYear, Location, PfConfig, PtConfig, SalaryStructure,
    SalaryStructureAssignment, TaxDeclaration, TdsConfig,
};

use super::{PayrollDataSource, RepositoryError};

/// One tenant's statutory configuration as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantStatutory {
    /// Provident fund configuration.
    #[serde(default)]
    pub pf: Option<PfConfig>,
    /// State insurance configuration.
    #[serde(default)]
    pub esi: Option<EsiConfig>,
    /// Professional tax tables, one per state.
    #[serde(default)]
    pub pt: Vec<PtConfig>,
    /// Income tax withholding configuration.
    #[serde(default)]
    pub tds: Option<TdsConfig>,
}

/// A read-only export of the HR and statutory stores.
///
/// Salary assignments and tax declarations carry no tenant of their own;
/// they are visible through the tenant of the employee they name.
///
/// # Example
///
/// ```yaml
/// employees:
///   - id: emp_001
///     tenant_id: acme
///     ctc_annual: "600000"
///     pt_applicable: true
/// salary_structures:
///   - id: std_2025
///     tenant_id: acme
///     name: Standard
///     components:
///       - { name: Basic, code: BASIC, type: FIXED, amount: "20000" }
/// salary_assignments:
///   - { employee_id: emp_001, structure_id: std_2025, effective_from: 2025-04-01 }
/// statutory:
///   acme:
///     pf: { wage_ceiling: "15000", employee_percent: "12", employer_percent: "12" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSnapshot {
    /// Employees of every tenant.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Work locations of every tenant.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Salary structures of every tenant.
    #[serde(default)]
    pub salary_structures: Vec<SalaryStructure>,
    /// Salary structure assignments.
    #[serde(default)]
    pub salary_assignments: Vec<SalaryStructureAssignment>,
    /// Tax declarations of every financial year.
    #[serde(default)]
    pub tax_declarations: Vec<TaxDeclaration>,
    /// Statutory configuration keyed by tenant id.
    #[serde(default)]
    pub statutory: BTreeMap<String, TenantStatutory>,
}

type TenantIndex<V> = HashMap<String, HashMap<String, V>>;

fn index_by_tenant<V>(
    items: Vec<V>,
    key: impl Fn(&V) -> (String, String),
) -> TenantIndex<V> {
    let mut index: TenantIndex<V> = HashMap::new();
    for item in items {
        let (tenant_id, id) = key(&item);
        index.entry(tenant_id).or_default().insert(id, item);
    }
    index
}

fn lookup<'a, V>(index: &'a TenantIndex<V>, tenant_id: &str, id: &str) -> Option<&'a V> {
    index.get(tenant_id).and_then(|records| records.get(id))
}

/// A [`PayrollDataSource`] answering from memory.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::store::InMemoryDataSource;
///
/// let source = InMemoryDataSource::from_yaml_file("./data/sample_snapshot.yaml").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    employees: TenantIndex<Employee>,
    locations: TenantIndex<Location>,
    structures: TenantIndex<SalaryStructure>,
    assignments: HashMap<String, Vec<SalaryStructureAssignment>>,
    declarations: HashMap<String, Vec<TaxDeclaration>>,
    statutory: HashMap<String, TenantStatutory>,
}

impl InMemoryDataSource {
    /// Indexes a snapshot for lookup.
    ///
    /// A later record with the same tenant and id replaces an earlier one.
    pub fn from_snapshot(snapshot: DataSnapshot) -> Self {
        let mut assignments: HashMap<String, Vec<SalaryStructureAssignment>> = HashMap::new();
        for assignment in snapshot.salary_assignments {
            assignments
                .entry(assignment.employee_id.clone())
                .or_default()
                .push(assignment);
        }

        let mut declarations: HashMap<String, Vec<TaxDeclaration>> = HashMap::new();
        for declaration in snapshot.tax_declarations {
            declarations
                .entry(declaration.employee_id.clone())
                .or_default()
                .push(declaration);
        }

        Self {
            employees: index_by_tenant(snapshot.employees, |e| {
                (e.tenant_id.clone(), e.id.clone())
            }),
            locations: index_by_tenant(snapshot.locations, |l| {
                (l.tenant_id.clone(), l.id.clone())
            }),
            structures: index_by_tenant(snapshot.salary_structures, |s| {
                (s.tenant_id.clone(), s.id.clone())
            }),
            assignments,
            declarations,
            statutory: snapshot.statutory.into_iter().collect(),
        }
    }

    /// Loads a snapshot from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not a valid snapshot.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let snapshot = load_yaml::<DataSnapshot>(path.as_ref())?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Number of employees across all tenants.
    pub fn employee_count(&self) -> usize {
        self.employees.values().map(HashMap::len).sum()
    }

    fn has_employee(&self, tenant_id: &str, employee_id: &str) -> bool {
        lookup(&self.employees, tenant_id, employee_id).is_some()
    }

    fn tenant_statutory(&self, tenant_id: &str) -> Option<&TenantStatutory> {
        self.statutory.get(tenant_id)
    }
}

#[async_trait]
impl PayrollDataSource for InMemoryDataSource {
    async fn get_employee(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Option<Employee>, RepositoryError> {
        Ok(lookup(&self.employees, tenant_id, employee_id).cloned())
    }

    async fn list_salary_assignments(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Vec<SalaryStructureAssignment>, RepositoryError> {
        if !self.has_employee(tenant_id, employee_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .assignments
            .get(employee_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_salary_structure(
        &self,
        tenant_id: &str,
        structure_id: &str,
    ) -> Result<Option<SalaryStructure>, RepositoryError> {
        Ok(lookup(&self.structures, tenant_id, structure_id).cloned())
    }

    async fn get_location(
        &self,
        tenant_id: &str,
        location_id: &str,
    ) -> Result<Option<Location>, RepositoryError> {
        Ok(lookup(&self.locations, tenant_id, location_id).cloned())
    }

    async fn list_tax_declarations(
        &self,
        tenant_id: &str,
        employee_id: &str,
        financial_year: FinancialYear,
    ) -> Result<Vec<TaxDeclaration>, RepositoryError> {
        if !self.has_employee(tenant_id, employee_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .declarations
            .get(employee_id)
            .map(|declarations| {
                declarations
                    .iter()
                    .filter(|d| d.financial_year == financial_year)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_pf_config(&self, tenant_id: &str) -> Result<Option<PfConfig>, RepositoryError> {
        Ok(self.tenant_statutory(tenant_id).and_then(|s| s.pf.clone()))
    }

    async fn get_esi_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<EsiConfig>, RepositoryError> {
        Ok(self.tenant_statutory(tenant_id).and_then(|s| s.esi.clone()))
    }

    async fn get_pt_config(
        &self,
        tenant_id: &str,
        state: &str,
    ) -> Result<Option<PtConfig>, RepositoryError> {
        Ok(self
            .tenant_statutory(tenant_id)
            .and_then(|s| s.pt.iter().find(|pt| pt.state == state))
            .cloned())
    }

    async fn get_tds_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TdsConfig>, RepositoryError> {
        Ok(self.tenant_statutory(tenant_id).and_then(|s| s.tds.clone()))
    }
}
