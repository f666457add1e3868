//! Resolution parameters and their validation.

use serde::{Deserialize, Serialize};

use super::regime::ResolutionMethod;
use crate::domain::foundation::{ConfigurationError, ValidationError};

/// Probabilities must sum to one within this tolerance.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Reference value the min-MSE criterion measures deviations against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MseBaseline {
    /// Largest expectation across alternatives.
    #[default]
    Continuous,
    /// Mean expectation across alternatives.
    Discrete,
}

/// Method parameters for one uncertain criterion. Each method reads the
/// fields it needs; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionParams {
    /// One probability per state.
    pub probabilities: Option<Vec<f64>>,
    /// Max-probability: minimum acceptable outcome.
    pub threshold: Option<f64>,
    /// Min-MSE baseline.
    pub baseline: MseBaseline,
    /// Hurwicz risk attitude; 0 is pure optimism, 1 pure pessimism.
    pub alpha: Option<f64>,
    /// Hodges-Lehmann confidence in the probabilities.
    pub beta: Option<f64>,
    /// Universal criterion: deviation penalty coefficient.
    pub additional_param: Option<f64>,
    /// Universal criterion: share of the Hurwicz term.
    pub trust_level: Option<f64>,
}

impl ResolutionParams {
    pub fn with_probabilities(probabilities: Vec<f64>) -> Self {
        Self {
            probabilities: Some(probabilities),
            ..Self::default()
        }
    }
}

/// Checks a probability vector against the state list.
///
/// # Errors
/// - `DimensionMismatch` if the vector length differs from the state count
/// - `NegativeProbability` for any negative entry
/// - `ProbabilitiesDoNotSumToOne` if the sum is off by more than 1e-6
pub fn validate_probabilities(probabilities: &[f64], states: &[String]) -> Result<(), ValidationError> {
    if probabilities.len() != states.len() {
        return Err(ValidationError::dimension_mismatch(
            "probabilities",
            states.len(),
            probabilities.len(),
        ));
    }
    for (state, &p) in states.iter().zip(probabilities) {
        if !p.is_finite() {
            return Err(ValidationError::non_finite("probabilities", 0, 0));
        }
        if p < 0.0 {
            return Err(ValidationError::NegativeProbability {
                state: state.clone(),
                value: p,
            });
        }
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(ValidationError::ProbabilitiesDoNotSumToOne { sum });
    }
    Ok(())
}

/// Unwraps an optional parameter or reports it missing for `method`.
pub(crate) fn required(
    value: Option<f64>,
    method: ResolutionMethod,
    parameter: &str,
) -> Result<f64, ConfigurationError> {
    value.ok_or_else(|| ConfigurationError::missing_parameter(method.as_str(), parameter))
}

/// Fails unless `value` lies in [0, 1].
pub(crate) fn unit_interval(field: &str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(field, 0.0, 1.0, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<String> {
        vec!["boom".to_string(), "bust".to_string()]
    }

    #[test]
    fn valid_probabilities_pass() {
        assert!(validate_probabilities(&[0.3, 0.7], &states()).is_ok());
    }

    #[test]
    fn probabilities_within_tolerance_pass() {
        assert!(validate_probabilities(&[0.3, 0.7000005], &states()).is_ok());
    }

    #[test]
    fn probabilities_must_sum_to_one() {
        let result = validate_probabilities(&[0.3, 0.6], &states());
        assert!(matches!(
            result,
            Err(ValidationError::ProbabilitiesDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn negative_probability_is_rejected() {
        let result = validate_probabilities(&[-0.5, 1.5], &states());
        assert!(matches!(result, Err(ValidationError::NegativeProbability { .. })));
    }

    #[test]
    fn probability_count_must_match_states() {
        let result = validate_probabilities(&[1.0], &states());
        assert!(matches!(result, Err(ValidationError::DimensionMismatch { .. })));
    }

    #[test]
    fn missing_parameter_names_method() {
        let err = required(None, ResolutionMethod::Hurwicz, "alpha").unwrap_err();
        assert_eq!(err, ConfigurationError::missing_parameter("hurwicz", "alpha"));
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(unit_interval("alpha", 0.0).is_ok());
        assert!(unit_interval("alpha", 1.0).is_ok());
        assert!(unit_interval("alpha", 1.5).is_err());
    }
}
