//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{0}' must be positive")]
    NonPositive(&'static str),

    #[error("'{0}' must be at least 1")]
    ZeroIterations(&'static str),

    #[error("Rykov power must be at least 1")]
    RykovPowerBelowOne,

    #[error("Concordance threshold must lie in [0, 1]")]
    ConcordanceThresholdOutOfRange,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogDirective(String),
}
