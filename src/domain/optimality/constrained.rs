//! Constrained selection - restriction criteria filter, goal criteria choose.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::concession::{weighted_products, weighted_sums};
use super::params::SelectionParams;
use super::principle::OptimalityPrinciple;
use super::reference_point::{anti_ideal_point, distances, ideal_point};
use super::selector::{OptimalitySelector, Selection};
use super::weights::CriterionWeights;
use crate::domain::foundation::{AnalysisError, ConfigurationError, DecisionMatrix, ValidationError};

/// Goal/restriction partition of the criteria plus the principle and limit
/// used on the restriction side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstrainedTask {
    pub goals: Vec<String>,
    pub restrictions: Vec<String>,
    pub principle: OptimalityPrinciple,
    pub limit: f64,
}

impl ConstrainedTask {
    /// Checks the partition against the matrix and the principle against the
    /// four supported in constrained mode.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` for empty goal or restriction lists
    /// - `ValidationError::UnknownName` for a criterion not in the matrix
    /// - `ValidationError::DuplicateName` for a criterion listed on both sides
    /// - `ConfigurationError::UnsupportedConstrainedPrinciple`
    pub fn validate(&self, matrix: &DecisionMatrix) -> Result<(), AnalysisError> {
        if !self.principle.supports_constraints() {
            return Err(ConfigurationError::UnsupportedConstrainedPrinciple {
                principle: self.principle.to_string(),
            }
            .into());
        }
        if self.goals.is_empty() {
            return Err(ValidationError::empty_field("goals").into());
        }
        if self.restrictions.is_empty() {
            return Err(ValidationError::empty_field("restrictions").into());
        }
        if !self.limit.is_finite() {
            return Err(ValidationError::non_finite("limit", 0, 0).into());
        }
        for name in self.goals.iter().chain(&self.restrictions) {
            if matrix.criterion_index(name).is_none() {
                return Err(ValidationError::unknown_name("criterion", name.clone()).into());
            }
        }
        if let Some(both) = self.goals.iter().find(|g| self.restrictions.contains(g)) {
            return Err(ValidationError::duplicate_name("criterion", both.clone()).into());
        }
        Ok(())
    }
}

/// Outcome of a constrained selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstrainedSelection {
    pub principle: OptimalityPrinciple,
    /// Restriction-side score per alternative (distance, sum or product).
    pub restriction_scores: Vec<f64>,
    pub survivors: Vec<String>,
    /// Goal-side selection; absent when no alternative survived.
    pub goal: Option<Selection>,
    pub winners: Vec<String>,
}

impl OptimalitySelector {
    /// Filters alternatives whose restriction score passes `limit`, then
    /// applies the same principle to the goal criteria among the survivors.
    ///
    /// Ideal point keeps distance < limit, anti-ideal keeps distance > limit,
    /// both concessions keep score > limit. No survivors means no winners.
    pub fn select_constrained(
        matrix: &DecisionMatrix,
        weights: &CriterionWeights,
        task: &ConstrainedTask,
        params: &SelectionParams,
    ) -> Result<ConstrainedSelection, AnalysisError> {
        task.validate(matrix)?;
        params.ensure_thresholds_known(matrix)?;

        let restricted = matrix.select_criteria(&task.restrictions)?;
        let restriction_weights = weights
            .restricted_to(&task.restrictions)
            .for_matrix(&restricted)?;
        let restriction_params = params.restricted_to(&task.restrictions);

        let restriction_scores = match task.principle {
            OptimalityPrinciple::IdealPoint => {
                let reference = ideal_point(&restricted, &restriction_params)?;
                distances(&restricted, &restriction_weights, &reference, restriction_params.metric)
            }
            OptimalityPrinciple::AntiIdealPoint => {
                let reference = anti_ideal_point(&restricted, &restriction_params)?;
                distances(&restricted, &restriction_weights, &reference, restriction_params.metric)
            }
            OptimalityPrinciple::AbsoluteConcession => weighted_sums(&restricted, &restriction_weights),
            OptimalityPrinciple::RelativeConcession => {
                weighted_products(&restricted, &restriction_weights)?
            }
            other => {
                return Err(ConfigurationError::UnsupportedConstrainedPrinciple {
                    principle: other.to_string(),
                }
                .into())
            }
        };
        let keep = |score: f64| match task.principle {
            OptimalityPrinciple::IdealPoint => score < task.limit,
            _ => score > task.limit,
        };

        let survivors: Vec<String> = matrix
            .alternatives()
            .iter()
            .zip(&restriction_scores)
            .filter(|(_, score)| keep(**score))
            .map(|(name, _)| name.clone())
            .collect();
        debug!(
            principle = %task.principle,
            limit = task.limit,
            survivors = ?survivors,
            "restrictions applied"
        );

        if survivors.is_empty() {
            info!(principle = %task.principle, "no alternative satisfies the restrictions");
            return Ok(ConstrainedSelection {
                principle: task.principle,
                restriction_scores,
                survivors,
                goal: None,
                winners: Vec::new(),
            });
        }

        let goal_matrix = matrix
            .select_criteria(&task.goals)?
            .select_alternatives(&survivors)?;
        let goal = Self::select(
            &goal_matrix,
            &weights.restricted_to(&task.goals),
            task.principle,
            &params.restricted_to(&task.goals),
        )?;
        let winners = goal.winners.clone();

        Ok(ConstrainedSelection {
            principle: task.principle,
            restriction_scores,
            survivors,
            goal: Some(goal),
            winners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("profit", vec![9.0, 6.0, 4.0])
            .criterion("safety", vec![1.0, 5.0, 6.0])
            .criterion("comfort", vec![2.0, 4.0, 5.0])
            .build()
            .unwrap()
    }

    fn task(principle: OptimalityPrinciple, limit: f64) -> ConstrainedTask {
        ConstrainedTask {
            goals: vec!["profit".to_string()],
            restrictions: vec!["safety".to_string(), "comfort".to_string()],
            principle,
            limit,
        }
    }

    fn run(task: &ConstrainedTask) -> Result<ConstrainedSelection, AnalysisError> {
        OptimalitySelector::select_constrained(
            &matrix(),
            &CriterionWeights::uniform(),
            task,
            &SelectionParams::default(),
        )
    }

    #[test]
    fn absolute_concession_filters_then_maximizes_goal() {
        // restriction sums: 3, 9, 11
        let selection = run(&task(OptimalityPrinciple::AbsoluteConcession, 5.0)).unwrap();
        assert_eq!(selection.restriction_scores, vec![3.0, 9.0, 11.0]);
        assert_eq!(selection.survivors, vec!["B", "C"]);
        assert_eq!(selection.winners, vec!["B"]);
    }

    #[test]
    fn ideal_point_keeps_alternatives_closer_than_limit() {
        // ideal (6, 5): distances A ~ 5.83, B ~ 1.41, C = 0
        let selection = run(&task(OptimalityPrinciple::IdealPoint, 2.0)).unwrap();
        assert_eq!(selection.survivors, vec!["B", "C"]);
        assert_eq!(selection.winners, vec!["B"]);
    }

    #[test]
    fn anti_ideal_point_keeps_alternatives_farther_than_limit() {
        // anti-ideal (1, 2): distances A = 0, B ~ 4.47, C ~ 5.83
        let selection = run(&task(OptimalityPrinciple::AntiIdealPoint, 5.0)).unwrap();
        assert_eq!(selection.survivors, vec!["C"]);
        assert_eq!(selection.winners, vec!["C"]);
    }

    #[test]
    fn relative_concession_uses_products() {
        // restriction products: 2, 20, 30
        let selection = run(&task(OptimalityPrinciple::RelativeConcession, 25.0)).unwrap();
        assert_eq!(selection.survivors, vec!["C"]);
    }

    #[test]
    fn no_survivors_gives_empty_winners() {
        let selection = run(&task(OptimalityPrinciple::AbsoluteConcession, 100.0)).unwrap();
        assert!(selection.survivors.is_empty());
        assert!(selection.goal.is_none());
        assert!(selection.winners.is_empty());
    }

    #[test]
    fn unsupported_principle_is_configuration_error() {
        let result = run(&task(OptimalityPrinciple::Pareto, 1.0));
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(
                ConfigurationError::UnsupportedConstrainedPrinciple { .. }
            ))
        ));
    }

    #[test]
    fn overlapping_partition_is_rejected() {
        let mut overlapping = task(OptimalityPrinciple::IdealPoint, 1.0);
        overlapping.goals.push("safety".to_string());
        assert!(matches!(
            run(&overlapping),
            Err(AnalysisError::Validation(ValidationError::DuplicateName { .. }))
        ));
    }

    #[test]
    fn empty_goals_are_rejected() {
        let mut empty = task(OptimalityPrinciple::IdealPoint, 1.0);
        empty.goals.clear();
        assert!(matches!(
            run(&empty),
            Err(AnalysisError::Validation(ValidationError::EmptyField { .. }))
        ));
    }

    #[test]
    fn unknown_restriction_is_rejected() {
        let mut unknown = task(OptimalityPrinciple::IdealPoint, 1.0);
        unknown.restrictions.push("noise".to_string());
        assert!(matches!(
            run(&unknown),
            Err(AnalysisError::Validation(ValidationError::UnknownName { .. }))
        ));
    }

    #[test]
    fn misspelled_threshold_is_rejected_before_restriction() {
        let params = SelectionParams {
            main_thresholds: [("saftey".to_string(), 3.0)].into_iter().collect(),
            ..SelectionParams::default()
        };
        let result = OptimalitySelector::select_constrained(
            &matrix(),
            &CriterionWeights::uniform(),
            &task(OptimalityPrinciple::AbsoluteConcession, 5.0),
            &params,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::UnknownName { .. }))
        ));
    }
}
