//! Main settings module

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{matching, search};
use crate::{ConfigError, FinancingConfig};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Financing configuration
    #[serde(default)]
    pub financing: FinancingConfig,

    /// Brand/model matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Catalog search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_financing()?;
        self.validate_matching()?;
        self.validate_search()?;
        Ok(())
    }

    fn validate_financing(&self) -> Result<(), ConfigError> {
        let financing = &self.financing;

        if financing.annual_interest_rate < Decimal::ZERO
            || financing.annual_interest_rate > Decimal::ONE
        {
            return Err(ConfigError::InvalidValue {
                field: "financing.annual_interest_rate".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    financing.annual_interest_rate
                ),
            });
        }

        // A full-price default down payment would make every quote invalid
        if financing.default_down_payment_percent < Decimal::ZERO
            || financing.default_down_payment_percent >= Decimal::ONE
        {
            return Err(ConfigError::InvalidValue {
                field: "financing.default_down_payment_percent".to_string(),
                message: format!(
                    "Must be in [0.0, 1.0), got {}",
                    financing.default_down_payment_percent
                ),
            });
        }

        Ok(())
    }

    fn validate_matching(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.matching.similarity_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "matching.similarity_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 100.0, got {}",
                    self.matching.similarity_threshold
                ),
            });
        }

        Ok(())
    }

    fn validate_search(&self) -> Result<(), ConfigError> {
        if self.search.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.default_limit".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if self.search.default_limit > self.search.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "search.default_limit".to_string(),
                message: format!(
                    "Cannot be larger than max_limit ({})",
                    self.search.max_limit
                ),
            });
        }

        Ok(())
    }
}

/// Brand/model matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity score (0-100) to accept a fuzzy match
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_similarity_threshold() -> f64 {
    matching::DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

/// Catalog search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result count when the caller does not specify one
    #[serde(default = "default_result_limit")]
    pub default_limit: usize,

    /// Hard cap on result count
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_result_limit() -> usize {
    search::DEFAULT_RESULT_LIMIT
}

fn default_max_limit() -> usize {
    search::MAX_RESULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_result_limit(),
            max_limit: default_max_limit(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CAR_AGENT_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("CAR_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}
