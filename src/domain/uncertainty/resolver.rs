//! UncertaintyResolver - reduces a state table to one scalar row per alternative.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ignorance;
use super::params::{required, unit_interval, validate_probabilities, ResolutionParams};
use super::probabilistic;
use super::regime::{PriorInformationRegime, ResolutionMethod};
use super::risk::{self, UniversalCoefficients};
use super::state_table::StateTable;
use crate::domain::foundation::numeric::ensure_finite;
use crate::domain::foundation::{AnalysisError, ConfigurationError};

/// A labelled intermediate table kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intermediate {
    pub label: String,
    pub rows: Vec<Vec<f64>>,
}

impl Intermediate {
    pub fn new(label: impl Into<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }

    pub fn row(label: impl Into<String>, row: Vec<f64>) -> Self {
        Self::new(label, vec![row])
    }

    pub fn scalar(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, vec![vec![value]])
    }
}

/// Audit trail of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    pub regime: PriorInformationRegime,
    pub method: ResolutionMethod,
    /// Parameters actually used, after regime defaults were applied.
    pub applied: ResolutionParams,
    pub intermediates: Vec<Intermediate>,
}

/// Resolved row for one uncertain criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub criterion: String,
    pub alternatives: Vec<String>,
    pub row: Vec<f64>,
    pub trace: ResolutionTrace,
}

/// Uncertainty resolution rules.
pub struct UncertaintyResolver;

impl UncertaintyResolver {
    /// Resolves one state table.
    ///
    /// # Errors
    /// - `ConfigurationError::MethodNotAllowed` if the method is illegal for the regime
    /// - `ConfigurationError::MissingParameter` if a required parameter is absent
    /// - `ValidationError` for malformed probabilities or out-of-range coefficients
    /// - `NumericError` if the result is not finite
    pub fn resolve(
        table: &StateTable,
        regime: PriorInformationRegime,
        method: ResolutionMethod,
        params: &ResolutionParams,
    ) -> Result<Resolution, AnalysisError> {
        regime.ensure_allows(method)?;

        let mut applied = params.clone();
        if !regime.uses_probabilities() {
            if applied.probabilities.is_some() {
                debug!(criterion = table.criterion(), "probabilities ignored under ignorance");
            }
            applied.probabilities = None;
        }
        if let Some(probabilities) = &applied.probabilities {
            validate_probabilities(probabilities, table.states())?;
        }

        let (row, intermediates) = match method {
            ResolutionMethod::BayesLaplace => {
                probabilistic::bayes_laplace(table, probabilities(&applied, method)?)
            }
            ResolutionMethod::MinMse => {
                probabilistic::min_mse(table, probabilities(&applied, method)?, applied.baseline)
            }
            ResolutionMethod::MaxProbability => {
                let threshold = required(applied.threshold, method, "threshold")?;
                probabilistic::max_probability(table, probabilities(&applied, method)?, threshold)
            }
            ResolutionMethod::Modal => probabilistic::modal(table, probabilities(&applied, method)?),
            ResolutionMethod::MinEntropy => {
                probabilistic::min_entropy(table, probabilities(&applied, method)?)?
            }
            ResolutionMethod::Hermeyer => {
                probabilistic::hermeyer(table, probabilities(&applied, method)?)
            }
            ResolutionMethod::Wald => ignorance::wald(table),
            ResolutionMethod::MinimaxRegret => ignorance::minimax_regret(table),
            ResolutionMethod::Hurwicz => {
                let alpha = unit_interval("alpha", required(applied.alpha, method, "alpha")?)?;
                risk::hurwicz(table, alpha)
            }
            ResolutionMethod::HodgesLehmann => {
                let beta = unit_interval("beta", required(applied.beta, method, "beta")?)?;
                risk::hodges_lehmann(table, probabilities(&applied, method)?, beta)
            }
            ResolutionMethod::Universal => {
                let coefficients = universal_coefficients(regime, &mut applied)?;
                let probabilities = match regime {
                    PriorInformationRegime::Ignorance => None,
                    _ => Some(probabilities(&applied, method)?),
                };
                risk::universal(table, probabilities, coefficients)
            }
        };

        ensure_finite(&row, method.as_str())?;
        debug!(
            criterion = table.criterion(),
            regime = %regime,
            method = %method,
            "uncertainty resolved"
        );

        Ok(Resolution {
            criterion: table.criterion().to_string(),
            alternatives: table.alternatives().to_vec(),
            row,
            trace: ResolutionTrace {
                regime,
                method,
                applied,
                intermediates,
            },
        })
    }
}

fn probabilities(params: &ResolutionParams, method: ResolutionMethod) -> Result<&[f64], ConfigurationError> {
    params
        .probabilities
        .as_deref()
        .ok_or_else(|| ConfigurationError::missing_parameter(method.as_str(), "probabilities"))
}

/// Fills regime defaults into `applied` and returns the coefficients.
///
/// Certainty defaults to tau = 0 and alpha = 0; ignorance to tau = 1 and
/// k = 0; risk has no defaults. Supplied values always win.
fn universal_coefficients(
    regime: PriorInformationRegime,
    applied: &mut ResolutionParams,
) -> Result<UniversalCoefficients, AnalysisError> {
    let method = ResolutionMethod::Universal;
    match regime {
        PriorInformationRegime::Certainty => {
            applied.trust_level.get_or_insert(0.0);
            applied.alpha.get_or_insert(0.0);
        }
        PriorInformationRegime::Ignorance => {
            applied.trust_level.get_or_insert(1.0);
            applied.additional_param.get_or_insert(0.0);
        }
        PriorInformationRegime::Risk => {}
    }

    let alpha = unit_interval("alpha", required(applied.alpha, method, "alpha")?)?;
    let trust_level = unit_interval(
        "trust_level",
        required(applied.trust_level, method, "trust_level")?,
    )?;
    let additional_param = required(applied.additional_param, method, "additional_param")?;

    Ok(UniversalCoefficients {
        alpha,
        additional_param,
        trust_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    fn table() -> StateTable {
        StateTable::builder("profit")
            .alternatives(vec!["A1", "A2"])
            .state("s1", vec![1.0, 9.0])
            .state("s2", vec![8.0, 2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn wald_under_ignorance_takes_row_minimum() {
        let resolution = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Ignorance,
            ResolutionMethod::Wald,
            &ResolutionParams::default(),
        )
        .unwrap();
        assert_eq!(resolution.row, vec![1.0, 2.0]);
        assert_eq!(resolution.criterion, "profit");
    }

    #[test]
    fn illegal_method_for_regime_is_configuration_error() {
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Risk,
            ResolutionMethod::BayesLaplace,
            &ResolutionParams::with_probabilities(vec![0.5, 0.5]),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(ConfigurationError::MethodNotAllowed { .. }))
        ));
    }

    #[test]
    fn missing_probabilities_is_configuration_error() {
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Certainty,
            ResolutionMethod::BayesLaplace,
            &ResolutionParams::default(),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(ConfigurationError::MissingParameter { .. }))
        ));
    }

    #[test]
    fn bad_probabilities_are_validation_errors() {
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Certainty,
            ResolutionMethod::BayesLaplace,
            &ResolutionParams::with_probabilities(vec![0.5, 0.6]),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::ProbabilitiesDoNotSumToOne { .. }))
        ));
    }

    #[test]
    fn ignorance_drops_supplied_probabilities() {
        let resolution = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Ignorance,
            ResolutionMethod::MinimaxRegret,
            &ResolutionParams::with_probabilities(vec![0.9, 0.9]),
        )
        .unwrap();
        assert!(resolution.trace.applied.probabilities.is_none());
    }

    #[test]
    fn hurwicz_requires_alpha() {
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Risk,
            ResolutionMethod::Hurwicz,
            &ResolutionParams::default(),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(ConfigurationError::MissingParameter { .. }))
        ));
    }

    #[test]
    fn hurwicz_rejects_alpha_outside_unit_interval() {
        let params = ResolutionParams {
            alpha: Some(1.5),
            ..ResolutionParams::default()
        };
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Risk,
            ResolutionMethod::Hurwicz,
            &params,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    // Universal criterion wiring

    #[test]
    fn universal_under_ignorance_is_pure_hurwicz() {
        let params = ResolutionParams {
            alpha: Some(0.5),
            ..ResolutionParams::default()
        };
        let resolution = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Ignorance,
            ResolutionMethod::Universal,
            &params,
        )
        .unwrap();
        assert_eq!(resolution.row, vec![4.5, 5.5]);
        assert_eq!(resolution.trace.applied.trust_level, Some(1.0));
        assert_eq!(resolution.trace.applied.additional_param, Some(0.0));
    }

    #[test]
    fn universal_under_certainty_defaults_to_deviation_criterion() {
        let params = ResolutionParams {
            probabilities: Some(vec![0.5, 0.5]),
            additional_param: Some(1.0),
            ..ResolutionParams::default()
        };
        let resolution = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Certainty,
            ResolutionMethod::Universal,
            &params,
        )
        .unwrap();
        assert_eq!(resolution.row, vec![1.0, 2.0]);
        assert_eq!(resolution.trace.applied.trust_level, Some(0.0));
        assert_eq!(resolution.trace.applied.alpha, Some(0.0));
    }

    #[test]
    fn universal_explicit_values_override_defaults() {
        let params = ResolutionParams {
            probabilities: Some(vec![0.5, 0.5]),
            additional_param: Some(1.0),
            trust_level: Some(1.0),
            ..ResolutionParams::default()
        };
        let resolution = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Certainty,
            ResolutionMethod::Universal,
            &params,
        )
        .unwrap();
        // full trust with the default alpha = 0 is the optimistic column max
        assert_eq!(resolution.row, vec![8.0, 9.0]);
        assert_eq!(resolution.trace.applied.trust_level, Some(1.0));
    }

    #[test]
    fn universal_under_risk_requires_every_coefficient() {
        let params = ResolutionParams {
            probabilities: Some(vec![0.5, 0.5]),
            alpha: Some(0.5),
            additional_param: Some(1.0),
            ..ResolutionParams::default()
        };
        let result = UncertaintyResolver::resolve(
            &table(),
            PriorInformationRegime::Risk,
            ResolutionMethod::Universal,
            &params,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(ConfigurationError::MissingParameter { .. }))
        ));
    }

    #[test]
    fn min_entropy_tolerates_zero_probability_state() {
        let table = StateTable::builder("profit")
            .alternatives(vec!["A", "B"])
            .state("s1", vec![1.0, 2.0])
            .state("s2", vec![3.0, 4.0])
            .build()
            .unwrap();
        let resolution = UncertaintyResolver::resolve(
            &table,
            PriorInformationRegime::Certainty,
            ResolutionMethod::MinEntropy,
            &ResolutionParams::with_probabilities(vec![1.0, 0.0]),
        )
        .unwrap();
        // one state carries all weight, so both entropies are zero
        assert_eq!(resolution.row, vec![0.0, 0.0]);
    }
}
