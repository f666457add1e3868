//! Numeric configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::fuzzy::NumericSettings;

/// Quadrature and root-finding tolerances
#[derive(Debug, Clone, Deserialize)]
pub struct NumericConfig {
    #[serde(default = "default_quadrature_tolerance")]
    pub quadrature_tolerance: f64,

    /// Maximum bisection depth of adaptive Simpson
    #[serde(default = "default_quadrature_max_depth")]
    pub quadrature_max_depth: u32,

    #[serde(default = "default_root_tolerance")]
    pub root_tolerance: f64,

    #[serde(default = "default_root_max_iterations")]
    pub root_max_iterations: u32,
}

impl NumericConfig {
    /// Settings for the fuzzy evaluator
    pub fn settings(&self) -> NumericSettings {
        NumericSettings {
            quadrature_tolerance: self.quadrature_tolerance,
            quadrature_max_depth: self.quadrature_max_depth,
            root_tolerance: self.root_tolerance,
            root_max_iterations: self.root_max_iterations,
        }
    }

    /// Validate numeric configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.quadrature_tolerance > 0.0) {
            return Err(ValidationError::NonPositive("quadrature_tolerance"));
        }
        if !(self.root_tolerance > 0.0) {
            return Err(ValidationError::NonPositive("root_tolerance"));
        }
        if self.quadrature_max_depth == 0 {
            return Err(ValidationError::ZeroIterations("quadrature_max_depth"));
        }
        if self.root_max_iterations == 0 {
            return Err(ValidationError::ZeroIterations("root_max_iterations"));
        }
        Ok(())
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            quadrature_tolerance: default_quadrature_tolerance(),
            quadrature_max_depth: default_quadrature_max_depth(),
            root_tolerance: default_root_tolerance(),
            root_max_iterations: default_root_max_iterations(),
        }
    }
}

fn default_quadrature_tolerance() -> f64 {
    1e-10
}

fn default_quadrature_max_depth() -> u32 {
    48
}

fn default_root_tolerance() -> f64 {
    1e-12
}

fn default_root_max_iterations() -> u32 {
    200
}
