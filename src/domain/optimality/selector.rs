//! OptimalitySelector - applies one principle to a finalized decision matrix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::concession;
use super::deviation::DeviationTable;
use super::equality;
use super::lexicographic;
use super::main_criterion;
use super::pareto;
use super::params::SelectionParams;
use super::principle::OptimalityPrinciple;
use super::reference_point;
use super::trace::SelectionTrace;
use super::weights::CriterionWeights;
use crate::domain::foundation::{AnalysisError, DecisionMatrix};

/// Winning alternatives for one principle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub principle: OptimalityPrinciple,
    pub winners: Vec<String>,
    pub trace: SelectionTrace,
}

/// Optimality selection over a decision matrix.
pub struct OptimalitySelector;

impl OptimalitySelector {
    /// Applies `principle` to `matrix`.
    ///
    /// # Errors
    /// - `ConfigurationError::MainCriterionInapplicable` for main-criterion
    ///   with tied maximum weights
    /// - `ValidationError` for weights, reference points, thresholds or
    ///   deviation tables that do not match the matrix
    /// - `NumericError::NonFinite` for a degenerate weighted product
    pub fn select(
        matrix: &DecisionMatrix,
        weights: &CriterionWeights,
        principle: OptimalityPrinciple,
        params: &SelectionParams,
    ) -> Result<Selection, AnalysisError> {
        let w = weights.for_matrix(matrix)?;
        params.ensure_thresholds_known(matrix)?;

        let (indices, trace) = match principle {
            OptimalityPrinciple::IdealPoint => reference_point::select_ideal(matrix, &w, params)?,
            OptimalityPrinciple::AntiIdealPoint => {
                reference_point::select_anti_ideal(matrix, &w, params)?
            }
            OptimalityPrinciple::Pareto => pareto::select_pareto(matrix, &w),
            OptimalityPrinciple::Equal => equality::select_equal(matrix, &w),
            OptimalityPrinciple::QuasiEqual => {
                let tolerances = match &params.deviation {
                    Some(table) => table.aligned(matrix)?,
                    None => DeviationTable::zeros(matrix.criteria()).aligned(matrix)?,
                };
                equality::select_within(matrix, &w, tolerances)
            }
            OptimalityPrinciple::AbsoluteConcession => concession::select_absolute(matrix, &w),
            OptimalityPrinciple::RelativeConcession => concession::select_relative(matrix, &w)?,
            OptimalityPrinciple::MainCriterion => {
                main_criterion::select_main(matrix, &w, &params.main_thresholds)?
            }
            OptimalityPrinciple::LexEqual => lexicographic::select_lex_equal(matrix, &w),
            OptimalityPrinciple::LexQuasiEqual => {
                lexicographic::select_lex_quasi_equal(matrix, &w, &params.lex_thresholds)
            }
        };

        let winners: Vec<String> = indices
            .iter()
            .map(|&i| matrix.alternatives()[i].clone())
            .collect();
        debug!(principle = %principle, winners = ?winners, "principle evaluated");

        Ok(Selection {
            principle,
            winners,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ConfigurationError, ValidationError};

    fn scenario_a() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A1", "A2", "A3"])
            .criterion("c1", vec![10.0, 20.0, 30.0])
            .criterion("c2", vec![30.0, 20.0, 10.0])
            .build()
            .unwrap()
    }

    fn select(principle: OptimalityPrinciple) -> Result<Selection, AnalysisError> {
        OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform(),
            principle,
            &SelectionParams::default(),
        )
    }

    #[test]
    fn pareto_front_of_scenario_a_is_everyone() {
        let selection = select(OptimalityPrinciple::Pareto).unwrap();
        assert_eq!(selection.winners, vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn ideal_point_of_scenario_a_is_the_balanced_alternative() {
        let selection = select(OptimalityPrinciple::IdealPoint).unwrap();
        assert_eq!(selection.winners, vec!["A2"]);
    }

    #[test]
    fn absolute_concession_of_scenario_a_is_a_three_way_tie() {
        let selection = select(OptimalityPrinciple::AbsoluteConcession).unwrap();
        assert_eq!(selection.winners.len(), 3);
    }

    #[test]
    fn equal_of_scenario_a_picks_a2() {
        let selection = select(OptimalityPrinciple::Equal).unwrap();
        assert_eq!(selection.winners, vec!["A2"]);
    }

    #[test]
    fn main_criterion_with_uniform_weights_is_inapplicable() {
        let err = select(OptimalityPrinciple::MainCriterion).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Configuration(ConfigurationError::MainCriterionInapplicable { .. })
        ));
    }

    #[test]
    fn quasi_equal_uses_supplied_deviation_table() {
        let deviation = DeviationTable::new(
            vec!["c1".to_string(), "c2".to_string()],
            vec![vec![0.0, 20.0], vec![20.0, 0.0]],
        )
        .unwrap();
        let params = SelectionParams {
            deviation: Some(deviation),
            ..SelectionParams::default()
        };
        let selection = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform(),
            OptimalityPrinciple::QuasiEqual,
            &params,
        )
        .unwrap();
        assert_eq!(selection.winners, vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn deviation_table_missing_a_criterion_is_rejected() {
        let deviation = DeviationTable::new(vec!["c1".to_string()], vec![vec![0.0]]).unwrap();
        let params = SelectionParams {
            deviation: Some(deviation),
            ..SelectionParams::default()
        };
        let result = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform(),
            OptimalityPrinciple::QuasiEqual,
            &params,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::UnknownName { .. }))
        ));
    }

    #[test]
    fn unknown_weight_is_validation_error() {
        let result = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform().with("c9", 2.0),
            OptimalityPrinciple::Pareto,
            &SelectionParams::default(),
        );
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn unknown_main_threshold_is_rejected() {
        let params = SelectionParams {
            main_thresholds: [("c3".to_string(), 15.0)].into_iter().collect(),
            ..SelectionParams::default()
        };
        let result = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform().with("c1", 2.0),
            OptimalityPrinciple::MainCriterion,
            &params,
        );
        match result {
            Err(AnalysisError::Validation(ValidationError::UnknownName { name, .. })) => {
                assert_eq!(name, "c3")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn unknown_lex_threshold_is_rejected() {
        let params = SelectionParams {
            lex_thresholds: [("C1".to_string(), 5.0)].into_iter().collect(),
            ..SelectionParams::default()
        };
        let result = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform(),
            OptimalityPrinciple::LexQuasiEqual,
            &params,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::UnknownName { .. }))
        ));
    }

    #[test]
    fn known_thresholds_still_restrict_main_criterion() {
        let params = SelectionParams {
            main_thresholds: [("c2".to_string(), 15.0)].into_iter().collect(),
            ..SelectionParams::default()
        };
        let selection = OptimalitySelector::select(
            &scenario_a(),
            &CriterionWeights::uniform().with("c1", 2.0),
            OptimalityPrinciple::MainCriterion,
            &params,
        )
        .unwrap();
        assert_eq!(selection.winners, vec!["A2"]);
    }
}
