//! Configuration loading and management for the payroll engine.
//!
//! This module loads the statutory defaults and runtime settings from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default PT state: {}", config.defaults().pt_state);
//! ```

mod loader;
mod types;

pub(crate) use loader::load_yaml;
pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, StatutoryDefaults};
