//! Configuration management for the car sales agent
//!
//! Supports loading configuration from:
//! - YAML/TOML files (config/default, config/{env})
//! - Environment variables (CAR_AGENT_ prefix)
//!
//! Business parameters (interest rates, matching thresholds, search limits)
//! are plain structs passed explicitly to the services that need them.
//! Nothing reads configuration from global state.

pub mod constants;
pub mod financing;
pub mod settings;

pub use financing::FinancingConfig;
pub use settings::{load_settings, MatchingConfig, SearchConfig, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
