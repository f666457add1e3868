//! Logging configuration and subscriber setup

use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Rust log filter directive
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Build the env filter, preferring `RUST_LOG` when set
    pub fn filter(&self) -> Result<EnvFilter, ValidationError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| ValidationError::InvalidLogDirective(e.to_string()))
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogDirective(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info,mcda_engine=debug".to_string()
}

/// Install the global tracing subscriber.
///
/// Output goes to stderr so stdout stays reserved for results.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ValidationError> {
    let filter = config.filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
    Ok(())
}
