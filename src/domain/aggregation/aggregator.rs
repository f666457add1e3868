//! ExpertAggregator - reduces an expert panel to one consensus row.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::competence::{self, CompetenceTrace};
use super::concordance::kendall_concordance;
use super::generalized_ranking::{self, RankingTrace};
use super::method::{AggregationMethod, AggregationParams};
use super::panel::ExpertPanel;
use crate::domain::foundation::{AnalysisError, ConfigurationError, DecisionMatrix, ValidationError};

/// Method-specific audit data for one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AggregationTrace {
    Average,
    Competence(CompetenceTrace),
    Ranking(RankingTrace),
}

/// Consensus row for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub criterion: String,
    pub method: AggregationMethod,
    pub alternatives: Vec<String>,
    pub row: Vec<f64>,
    pub trace: AggregationTrace,
}

/// Expert aggregation strategies.
pub struct ExpertAggregator;

impl ExpertAggregator {
    /// Aggregates one panel with the chosen method.
    ///
    /// The concordance precondition for generalized ranking is the caller's
    /// responsibility; see [`ExpertAggregator::available_methods`].
    pub fn aggregate(
        panel: &ExpertPanel,
        method: AggregationMethod,
        params: &AggregationParams,
    ) -> Result<Aggregation, AnalysisError> {
        let (row, trace) = match method {
            AggregationMethod::Average => (column_means(panel), AggregationTrace::Average),
            AggregationMethod::EvlanovKutuzov => {
                let trace = competence::evlanov_kutuzov(panel, &params.evlanov_kutuzov)?;
                (
                    panel.weighted_row(trace.final_weights()),
                    AggregationTrace::Competence(trace),
                )
            }
            AggregationMethod::Rykov => {
                let trace = competence::rykov(panel, &params.rykov)?;
                (
                    panel.weighted_row(trace.final_weights()),
                    AggregationTrace::Competence(trace),
                )
            }
            AggregationMethod::GeneralizedRanking => {
                let (chosen, trace) = generalized_ranking::select_expert(panel, params.ranking_metric);
                (panel.scores()[chosen].clone(), AggregationTrace::Ranking(trace))
            }
        };

        debug!(criterion = panel.criterion(), method = %method, "expert panel aggregated");

        Ok(Aggregation {
            criterion: panel.criterion().to_string(),
            method,
            alternatives: panel.alternatives().to_vec(),
            row,
            trace,
        })
    }

    /// Lists the methods legal for a panel. Generalized ranking is offered
    /// only when Kendall's concordance exceeds `threshold`.
    pub fn available_methods(panel: &ExpertPanel, threshold: f64) -> Vec<AggregationMethod> {
        let concordant = kendall_concordance(panel) > threshold;
        AggregationMethod::all()
            .iter()
            .copied()
            .filter(|m| *m != AggregationMethod::GeneralizedRanking || concordant)
            .collect()
    }

    /// Fails with `ConfigurationError::InsufficientConcordance` when `method`
    /// is generalized ranking and the panel is not concordant enough.
    pub fn ensure_method_available(
        panel: &ExpertPanel,
        method: AggregationMethod,
        threshold: f64,
    ) -> Result<(), ConfigurationError> {
        if method != AggregationMethod::GeneralizedRanking {
            return Ok(());
        }
        let concordance = kendall_concordance(panel);
        if concordance > threshold {
            Ok(())
        } else {
            Err(ConfigurationError::InsufficientConcordance {
                concordance,
                threshold,
            })
        }
    }

    /// Stacks aggregated rows into a matrix, one criterion per aggregation.
    ///
    /// Columns follow the first aggregation's alternative order; later rows
    /// are aligned by alternative name.
    pub fn to_matrix(aggregations: &[Aggregation]) -> Result<DecisionMatrix, ValidationError> {
        let (first, rest) = aggregations
            .split_first()
            .ok_or_else(|| ValidationError::empty_field("aggregations"))?;

        let mut matrix = DecisionMatrix::new(
            vec![first.criterion.clone()],
            first.alternatives.clone(),
            vec![first.row.clone()],
        )?;
        for aggregation in rest {
            let single = DecisionMatrix::new(
                vec![aggregation.criterion.clone()],
                aggregation.alternatives.clone(),
                vec![aggregation.row.clone()],
            )?;
            matrix = matrix.stack(&single)?;
        }
        Ok(matrix)
    }
}

fn column_means(panel: &ExpertPanel) -> Vec<f64> {
    let n = panel.expert_count() as f64;
    (0..panel.alternative_count())
        .map(|alt| panel.scores().iter().map(|row| row[alt]).sum::<f64>() / n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::method::RankingMetric;

    fn unanimous() -> ExpertPanel {
        unanimous_at(5.0)
    }

    fn unanimous_at(score: f64) -> ExpertPanel {
        ExpertPanel::builder("comfort")
            .alternatives(vec!["A", "B", "C"])
            .expert("E1", vec![score; 3])
            .expert("E2", vec![score; 3])
            .expert("E3", vec![score; 3])
            .build()
            .unwrap()
    }

    fn diverse() -> ExpertPanel {
        ExpertPanel::builder("comfort")
            .alternatives(vec!["A", "B", "C"])
            .expert("E1", vec![9.0, 6.0, 3.0])
            .expert("E2", vec![8.0, 7.0, 2.0])
            .expert("E3", vec![7.0, 5.0, 4.0])
            .build()
            .unwrap()
    }

    fn approx(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn average_of_unanimous_panel_is_unchanged() {
        let result =
            ExpertAggregator::aggregate(&unanimous(), AggregationMethod::Average, &Default::default())
                .unwrap();
        assert_eq!(result.row, vec![5.0, 5.0, 5.0]);
        assert_eq!(result.trace, AggregationTrace::Average);
    }

    #[test]
    fn every_method_reproduces_unanimous_scores() {
        for score in [5.0, 0.0] {
            for method in AggregationMethod::all() {
                let result = ExpertAggregator::aggregate(
                    &unanimous_at(score),
                    *method,
                    &AggregationParams::default(),
                )
                .unwrap();
                assert!(approx(&result.row, &[score; 3]), "method {} at {}", method, score);
            }
        }
    }

    #[test]
    fn average_takes_column_means() {
        let result =
            ExpertAggregator::aggregate(&diverse(), AggregationMethod::Average, &Default::default())
                .unwrap();
        assert!(approx(&result.row, &[8.0, 6.0, 3.0]));
    }

    #[test]
    fn competence_methods_record_weight_history() {
        let result =
            ExpertAggregator::aggregate(&diverse(), AggregationMethod::Rykov, &Default::default())
                .unwrap();
        match result.trace {
            AggregationTrace::Competence(trace) => {
                assert!(!trace.history.is_empty());
                let total: f64 = trace.final_weights().iter().sum();
                assert!((total - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn generalized_ranking_returns_a_raw_expert_row() {
        let params = AggregationParams {
            ranking_metric: RankingMetric::Mean,
            ..AggregationParams::default()
        };
        let panel = diverse();
        let result =
            ExpertAggregator::aggregate(&panel, AggregationMethod::GeneralizedRanking, &params)
                .unwrap();
        assert!(panel.scores().iter().any(|row| *row == result.row));
    }

    #[test]
    fn available_methods_hides_ranking_for_discordant_panel() {
        let discordant = ExpertPanel::builder("comfort")
            .alternatives(vec!["A", "B", "C"])
            .expert("E1", vec![1.0, 2.0, 3.0])
            .expert("E2", vec![3.0, 2.0, 1.0])
            .build()
            .unwrap();

        let methods = ExpertAggregator::available_methods(&discordant, 0.5);
        assert!(!methods.contains(&AggregationMethod::GeneralizedRanking));
        assert_eq!(methods.len(), 3);

        let all = ExpertAggregator::available_methods(&diverse(), 0.5);
        assert!(all.contains(&AggregationMethod::GeneralizedRanking));
    }

    #[test]
    fn ensure_method_available_rejects_ranking_without_concordance() {
        let discordant = ExpertPanel::builder("comfort")
            .alternatives(vec!["A", "B"])
            .expert("E1", vec![1.0, 2.0])
            .expert("E2", vec![2.0, 1.0])
            .build()
            .unwrap();
        let result = ExpertAggregator::ensure_method_available(
            &discordant,
            AggregationMethod::GeneralizedRanking,
            0.5,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::InsufficientConcordance { .. })
        ));
        assert!(ExpertAggregator::ensure_method_available(
            &discordant,
            AggregationMethod::Average,
            0.5
        )
        .is_ok());
    }

    #[test]
    fn to_matrix_aligns_alternatives_by_name() {
        let first =
            ExpertAggregator::aggregate(&diverse(), AggregationMethod::Average, &Default::default())
                .unwrap();
        let reordered = ExpertPanel::builder("style")
            .alternatives(vec!["C", "A", "B"])
            .expert("E1", vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let second =
            ExpertAggregator::aggregate(&reordered, AggregationMethod::Average, &Default::default())
                .unwrap();

        let matrix = ExpertAggregator::to_matrix(&[first, second]).unwrap();
        assert_eq!(matrix.criteria(), &["comfort".to_string(), "style".to_string()]);
        assert_eq!(matrix.row(1), &[2.0, 3.0, 1.0]);
    }

    #[test]
    fn to_matrix_rejects_empty_input() {
        assert!(ExpertAggregator::to_matrix(&[]).is_err());
    }
}
