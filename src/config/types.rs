//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ContributionConfig;

/// Statutory values used when a tenant has not configured its own.
///
/// Passed explicitly into every calculation so an audit can see exactly which
/// values stood in for missing tenant configuration.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StatutoryDefaults;
/// use rust_decimal::Decimal;
///
/// let defaults = StatutoryDefaults::default();
/// assert_eq!(defaults.pf.wage_ceiling, Decimal::from(15000));
/// assert_eq!(defaults.esi.wage_ceiling, Decimal::from(21000));
/// assert_eq!(defaults.tds_standard_deduction, Decimal::from(50000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDefaults {
    /// Provident fund ceiling and percentages.
    pub pf: ContributionConfig,
    /// State insurance ceiling and percentages.
    pub esi: ContributionConfig,
    /// Standard deduction for income tax projection.
    pub tds_standard_deduction: Decimal,
    /// State whose professional tax table applies when the employee has no location state.
    pub pt_state: String,
}

impl Default for StatutoryDefaults {
    fn default() -> Self {
        Self {
            pf: ContributionConfig {
                wage_ceiling: Decimal::from(15000),
                employee_percent: Decimal::from(12),
                employer_percent: Decimal::from(12),
            },
            esi: ContributionConfig {
                wage_ceiling: Decimal::from(21000),
                employee_percent: Decimal::new(75, 2),
                employer_percent: Decimal::new(325, 2),
            },
            tds_standard_deduction: Decimal::from(50000),
            pt_state: "Maharashtra".to_string(),
        }
    }
}

/// Runtime settings of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Deadline for resolving one employee's inputs, in milliseconds.
    #[serde(default = "default_resolution_timeout_ms")]
    pub resolution_timeout_ms: u64,
    /// Memoise tenant statutory configuration reads across calculations.
    #[serde(default = "default_cache_statutory_configs")]
    pub cache_statutory_configs: bool,
}

fn default_resolution_timeout_ms() -> u64 {
    5_000
}

fn default_cache_statutory_configs() -> bool {
    true
}

impl EngineSettings {
    /// The resolution deadline as a [`Duration`].
    pub fn resolution_timeout(&self) -> Duration {
        Duration::from_millis(self.resolution_timeout_ms)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            resolution_timeout_ms: default_resolution_timeout_ms(),
            cache_statutory_configs: default_cache_statutory_configs(),
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Statutory fallback values.
    defaults: StatutoryDefaults,
    /// Runtime settings.
    settings: EngineSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(defaults: StatutoryDefaults, settings: EngineSettings) -> Self {
        Self { defaults, settings }
    }

    /// Returns the statutory defaults.
    pub fn defaults(&self) -> &StatutoryDefaults {
        &self.defaults
    }

    /// Returns the runtime settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}
