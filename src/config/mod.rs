//! Engine configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MCDA_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mcda_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Iteration ceiling: {}", config.aggregation.max_iterations);
//! ```

mod aggregation;
mod error;
mod logging;
mod numeric;

pub use aggregation::AggregationConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};
pub use numeric::NumericConfig;

use serde::Deserialize;
use std::path::Path;

/// Root engine configuration
///
/// Every section has defaults, so an empty environment yields a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Expert aggregation tuning (epsilons, iteration ceiling, concordance)
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Quadrature and root-finding tolerances
    #[serde(default)]
    pub numeric: NumericConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MCDA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MCDA__AGGREGATION__MAX_ITERATIONS=500` -> `aggregation.max_iterations = 500`
    /// - `MCDA__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a TOML or JSON file, with environment
    /// variables layered on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for non-positive tolerances, zero iteration
    /// ceilings, a Rykov power below 1, a concordance threshold outside
    /// [0, 1] or an unparsable log directive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.aggregation.validate()?;
        self.numeric.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::default().prefix("MCDA").separator("__")
}
