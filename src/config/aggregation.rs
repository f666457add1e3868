//! Aggregation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::aggregation::{
    AggregationParams, EvlanovKutuzovParams, RankingMetric, RykovMode, RykovParams,
};

/// Expert aggregation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Convergence threshold of the Evlanov-Kutuzov fixed point
    #[serde(default = "default_evlanov_kutuzov_epsilon")]
    pub evlanov_kutuzov_epsilon: f64,

    /// Rykov weight-change threshold
    #[serde(default = "default_rykov_epsilon")]
    pub rykov_epsilon: f64,

    /// Rykov score-change threshold
    #[serde(default = "default_rykov_convergence_epsilon")]
    pub rykov_convergence_epsilon: f64,

    /// Rykov power mean exponent
    #[serde(default = "default_rykov_power")]
    pub rykov_power: f64,

    #[serde(default)]
    pub rykov_mode: RykovMode,

    #[serde(default)]
    pub ranking_metric: RankingMetric,

    /// Iteration ceiling shared by both competence fixed points
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Kendall concordance required for generalized ranking
    #[serde(default = "default_concordance_threshold")]
    pub concordance_threshold: f64,
}

impl AggregationConfig {
    /// Aggregation parameters for the domain layer
    pub fn params(&self) -> AggregationParams {
        AggregationParams {
            evlanov_kutuzov: EvlanovKutuzovParams {
                epsilon: self.evlanov_kutuzov_epsilon,
                max_iterations: self.max_iterations,
            },
            rykov: RykovParams {
                p: self.rykov_power,
                epsilon: self.rykov_epsilon,
                convergence_epsilon: self.rykov_convergence_epsilon,
                mode: self.rykov_mode,
                max_iterations: self.max_iterations,
            },
            ranking_metric: self.ranking_metric,
        }
    }

    /// Validate aggregation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("evlanov_kutuzov_epsilon", self.evlanov_kutuzov_epsilon),
            ("rykov_epsilon", self.rykov_epsilon),
            ("rykov_convergence_epsilon", self.rykov_convergence_epsilon),
        ] {
            if !(value > 0.0) {
                return Err(ValidationError::NonPositive(name));
            }
        }
        if self.max_iterations == 0 {
            return Err(ValidationError::ZeroIterations("max_iterations"));
        }
        if !(self.rykov_power >= 1.0) {
            return Err(ValidationError::RykovPowerBelowOne);
        }
        if !(0.0..=1.0).contains(&self.concordance_threshold) {
            return Err(ValidationError::ConcordanceThresholdOutOfRange);
        }
        Ok(())
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            evlanov_kutuzov_epsilon: default_evlanov_kutuzov_epsilon(),
            rykov_epsilon: default_rykov_epsilon(),
            rykov_convergence_epsilon: default_rykov_convergence_epsilon(),
            rykov_power: default_rykov_power(),
            rykov_mode: RykovMode::default(),
            ranking_metric: RankingMetric::default(),
            max_iterations: default_max_iterations(),
            concordance_threshold: default_concordance_threshold(),
        }
    }
}

fn default_evlanov_kutuzov_epsilon() -> f64 {
    0.001
}

fn default_rykov_epsilon() -> f64 {
    0.01
}

fn default_rykov_convergence_epsilon() -> f64 {
    0.001
}

fn default_rykov_power() -> f64 {
    1.0
}

fn default_max_iterations() -> usize {
    1000
}

fn default_concordance_threshold() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let params = AggregationConfig::default().params();
        assert_eq!(params, AggregationParams::default());
    }

    #[test]
    fn test_validation_rejects_zero_epsilon() {
        let config = AggregationConfig {
            rykov_epsilon: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::NonPositive("rykov_epsilon")));
    }

    #[test]
    fn test_validation_rejects_small_power() {
        let config = AggregationConfig {
            rykov_power: 0.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::RykovPowerBelowOne));
    }

    #[test]
    fn test_validation_rejects_threshold_outside_unit_interval() {
        let config = AggregationConfig {
            concordance_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_iterations() {
        let config = AggregationConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
