//! Memoisation of tenant-global statutory configuration.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{
    Employee, EsiConfig, FinancialYear, Location, PfConfig, PtConfig, SalaryStructure,
    SalaryStructureAssignment, TaxDeclaration, TdsConfig,
};

use super::{PayrollDataSource, RepositoryError};

/// Wraps a data source and remembers its statutory configuration reads.
///
/// PF, ESI, PT and TDS configuration is the same for every employee of a
/// tenant, so a batch run can read it once per tenant. Employee-scoped reads
/// always go to the inner source. Failed reads are not remembered. Build a
/// new decorator (or call [`clear`](Self::clear)) per batch run so that
/// configuration edits are picked up by the next run.
pub struct CachingDataSource<S> {
    inner: S,
    pf: RwLock<HashMap<String, Option<PfConfig>>>,
    esi: RwLock<HashMap<String, Option<EsiConfig>>>,
    pt: RwLock<HashMap<(String, String), Option<PtConfig>>>,
    tds: RwLock<HashMap<String, Option<TdsConfig>>>,
}

impl<S: PayrollDataSource> CachingDataSource<S> {
    /// Wraps `inner` with empty caches.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pf: RwLock::new(HashMap::new()),
            esi: RwLock::new(HashMap::new()),
            pt: RwLock::new(HashMap::new()),
            tds: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forgets every remembered configuration.
    pub async fn clear(&self) {
        self.pf.write().await.clear();
        self.esi.write().await.clear();
        self.pt.write().await.clear();
        self.tds.write().await.clear();
    }
}

async fn memoised<K, V, F, Fut>(
    cache: &RwLock<HashMap<K, V>>,
    key: K,
    fetch: F,
) -> Result<V, RepositoryError>
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, RepositoryError>>,
{
    if let Some(value) = cache.read().await.get(&key) {
        return Ok(value.clone());
    }
    let value = fetch().await?;
    cache.write().await.insert(key, value.clone());
    Ok(value)
}

#[async_trait]
impl<S: PayrollDataSource> PayrollDataSource for CachingDataSource<S> {
    async fn get_employee(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Option<Employee>, RepositoryError> {
        self.inner.get_employee(tenant_id, employee_id).await
    }

    async fn list_salary_assignments(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> Result<Vec<SalaryStructureAssignment>, RepositoryError> {
        self.inner
            .list_salary_assignments(tenant_id, employee_id)
            .await
    }

    async fn get_salary_structure(
        &self,
        tenant_id: &str,
        structure_id: &str,
    ) -> Result<Option<SalaryStructure>, RepositoryError> {
        self.inner.get_salary_structure(tenant_id, structure_id).await
    }

    async fn get_location(
        &self,
        tenant_id: &str,
        location_id: &str,
    ) -> Result<Option<Location>, RepositoryError> {
        self.inner.get_location(tenant_id, location_id).await
    }

    async fn list_tax_declarations(
        &self,
        tenant_id: &str,
        employee_id: &str,
        financial_year: FinancialYear,
    ) -> Result<Vec<TaxDeclaration>, RepositoryError> {
        self.inner
            .list_tax_declarations(tenant_id, employee_id, financial_year)
            .await
    }

    async fn get_pf_config(&self, tenant_id: &str) -> Result<Option<PfConfig>, RepositoryError> {
        memoised(&self.pf, tenant_id.to_string(), || {
            debug!(tenant_id = %tenant_id, "Reading PF configuration");
            self.inner.get_pf_config(tenant_id)
        })
        .await
    }

    async fn get_esi_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<EsiConfig>, RepositoryError> {
        memoised(&self.esi, tenant_id.to_string(), || {
            debug!(tenant_id = %tenant_id, "Reading ESI configuration");
            self.inner.get_esi_config(tenant_id)
        })
        .await
    }

    async fn get_pt_config(
        &self,
        tenant_id: &str,
        state: &str,
    ) -> Result<Option<PtConfig>, RepositoryError> {
        memoised(
            &self.pt,
            (tenant_id.to_string(), state.to_string()),
            || {
                debug!(tenant_id = %tenant_id, state = %state, "Reading PT configuration");
                self.inner.get_pt_config(tenant_id, state)
            },
        )
        .await
    }

    async fn get_tds_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TdsConfig>, RepositoryError> {
        memoised(&self.tds, tenant_id.to_string(), || {
            debug!(tenant_id = %tenant_id, "Reading TDS configuration");
            self.inner.get_tds_config(tenant_id)
        })
        .await
    }
}
