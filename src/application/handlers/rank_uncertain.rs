//! RankUncertainAlternativesHandler - ranks alternatives when some criteria
//! depend on states of nature.
//!
//! Each state table is flipped and normalized as one block, then resolved to
//! a single row. Resolved rows join the certain criteria and the combined
//! matrix goes through constrained selection or the full consensus.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::trace::emit;
use crate::domain::foundation::{AnalysisError, DecisionMatrix, RunId, Timestamp, ValidationError};
use crate::domain::optimality::{
    Consensus, ConstrainedSelection, ConstrainedTask, CriterionWeights, OptimalitySelector,
    SelectionParams,
};
use crate::domain::scaling::{
    DirectionChange, DirectionChanger, DirectionPlan, NormalizationMethod, NormalizationPlan,
    Normalizer,
};
use crate::domain::uncertainty::{
    PriorInformationRegime, Resolution, ResolutionMethod, ResolutionParams, StateTable,
    UncertaintyResolver,
};
use crate::ports::TraceObserver;

/// One state-dependent criterion with its preprocessing and resolution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertainCriterion {
    pub table: StateTable,
    pub regime: PriorInformationRegime,
    pub method: ResolutionMethod,
    #[serde(default)]
    pub params: ResolutionParams,
    #[serde(default)]
    pub direction: DirectionChange,
    #[serde(default)]
    pub normalization: NormalizationMethod,
}

/// Command to rank alternatives under uncertainty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankUncertainAlternativesCommand {
    /// Criteria known with certainty.
    pub certain: Option<DecisionMatrix>,
    pub directions: DirectionPlan,
    pub normalization: NormalizationPlan,
    pub uncertain: Vec<UncertainCriterion>,
    pub weights: CriterionWeights,
    pub selection: SelectionParams,
    /// Goal/restriction split; consensus over all principles when absent.
    pub constraints: Option<ConstrainedTask>,
}

/// Final selection of an uncertain run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RankingOutcome {
    Constrained(ConstrainedSelection),
    Consensus(Consensus),
}

impl RankingOutcome {
    pub fn winners(&self) -> &[String] {
        match self {
            RankingOutcome::Constrained(selection) => &selection.winners,
            RankingOutcome::Consensus(consensus) => &consensus.winners,
        }
    }
}

/// Result of an uncertain-task run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankUncertainAlternativesResult {
    pub run_id: RunId,
    pub resolutions: Vec<Resolution>,
    /// Certain rows followed by resolved rows.
    pub matrix: DecisionMatrix,
    pub outcome: RankingOutcome,
}

/// Handler for uncertain-task ranking.
pub struct RankUncertainAlternativesHandler {
    observer: Arc<dyn TraceObserver>,
}

impl RankUncertainAlternativesHandler {
    pub fn new(observer: Arc<dyn TraceObserver>) -> Self {
        Self { observer }
    }

    pub fn handle(
        &self,
        cmd: RankUncertainAlternativesCommand,
    ) -> Result<RankUncertainAlternativesResult, AnalysisError> {
        let run_id = RunId::new();
        let started = Timestamp::now();
        info!(%run_id, uncertain = cmd.uncertain.len(), "ranking uncertain alternatives");

        // 1. Resolve every state table
        let mut resolutions = Vec::with_capacity(cmd.uncertain.len());
        for criterion in &cmd.uncertain {
            let resolution = self.resolve(run_id, criterion)?;
            resolutions.push(resolution);
        }

        // 2. Scale the certain criteria
        let certain = match &cmd.certain {
            Some(matrix) => {
                let flipped = DirectionChanger::change_direction(matrix, &cmd.directions)
                    .map_err(|e| e.in_stage("direction-change", "certain"))?;
                let scaled = Normalizer::normalize(&flipped, &cmd.normalization)
                    .map_err(|e| e.in_stage("normalization", "certain"))?;
                emit(self.observer.as_ref(), run_id, "normalization", "certain", &scaled);
                Some(scaled)
            }
            None => None,
        };

        // 3. Combine into one matrix
        let matrix = combine(certain, &resolutions)
            .map_err(|e| AnalysisError::from(e).in_stage("assembly", "matrix"))?;
        emit(self.observer.as_ref(), run_id, "assembly", "matrix", &matrix);

        // 4. Select
        let outcome = match &cmd.constraints {
            Some(task) => {
                let selection = OptimalitySelector::select_constrained(
                    &matrix,
                    &cmd.weights,
                    task,
                    &cmd.selection,
                )
                .map_err(|e| e.in_stage("constrained-selection", task.principle.as_str()))?;
                emit(
                    self.observer.as_ref(),
                    run_id,
                    "constrained-selection",
                    task.principle.as_str(),
                    &selection,
                );
                RankingOutcome::Constrained(selection)
            }
            None => {
                let consensus =
                    OptimalitySelector::consensus(&matrix, &cmd.weights, &cmd.selection)?;
                for verdict in &consensus.verdicts {
                    emit(
                        self.observer.as_ref(),
                        run_id,
                        "selection",
                        verdict.principle().as_str(),
                        verdict,
                    );
                }
                emit(self.observer.as_ref(), run_id, "consensus", "votes", &consensus.mark_table());
                RankingOutcome::Consensus(consensus)
            }
        };
        info!(
            %run_id,
            elapsed_ms = Timestamp::now().millis_since(&started),
            winners = ?outcome.winners(),
            "uncertain ranking complete"
        );

        Ok(RankUncertainAlternativesResult {
            run_id,
            resolutions,
            matrix,
            outcome,
        })
    }

    fn resolve(
        &self,
        run_id: RunId,
        criterion: &UncertainCriterion,
    ) -> Result<Resolution, AnalysisError> {
        let name = criterion.table.criterion();
        let table = criterion
            .table
            .change_direction(criterion.direction)
            .and_then(|t| t.normalize(criterion.normalization))
            .map_err(|e| AnalysisError::from(e).in_stage("scaling", name))?;
        emit(self.observer.as_ref(), run_id, "scaling", name, &table);

        let resolution =
            UncertaintyResolver::resolve(&table, criterion.regime, criterion.method, &criterion.params)
                .map_err(|e| e.in_stage("resolution", name))?;
        emit(self.observer.as_ref(), run_id, "resolution", name, &resolution);
        Ok(resolution)
    }
}

/// Certain rows first, then each resolved row with the normalization floor
/// reapplied, since resolution can produce fresh zeros.
fn combine(
    certain: Option<DecisionMatrix>,
    resolutions: &[Resolution],
) -> Result<DecisionMatrix, ValidationError> {
    let mut combined = certain;
    for resolution in resolutions {
        let row = DecisionMatrix::new(
            vec![resolution.criterion.clone()],
            resolution.alternatives.clone(),
            vec![Normalizer::apply_floor(&resolution.row)],
        )?;
        combined = Some(match combined {
            Some(matrix) => matrix.stack(&row)?,
            None => row,
        });
    }
    combined.ok_or_else(|| ValidationError::empty_field("criteria"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTraceRecorder;
    use crate::domain::foundation::{ConfigurationError, ErrorCode};
    use crate::domain::optimality::OptimalityPrinciple;

    fn comfort(alternatives: Vec<&str>, s1: Vec<f64>, s2: Vec<f64>) -> UncertainCriterion {
        UncertainCriterion {
            table: StateTable::builder("comfort")
                .alternatives(alternatives)
                .state("s1", s1)
                .state("s2", s2)
                .build()
                .unwrap(),
            regime: PriorInformationRegime::Ignorance,
            method: ResolutionMethod::Wald,
            params: ResolutionParams::default(),
            direction: DirectionChange::None,
            normalization: NormalizationMethod::None,
        }
    }

    fn certain() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("profit", vec![9.0, 6.0, 4.0])
            .criterion("safety", vec![1.0, 5.0, 6.0])
            .build()
            .unwrap()
    }

    #[test]
    fn resolved_rows_are_aligned_by_alternative_name() {
        let cmd = RankUncertainAlternativesCommand {
            certain: Some(certain()),
            // columns given in reverse order
            uncertain: vec![comfort(vec!["C", "B", "A"], vec![5.0, 4.0, 2.0], vec![7.0, 6.0, 3.0])],
            ..Default::default()
        };
        let result = RankUncertainAlternativesHandler::new(Arc::new(InMemoryTraceRecorder::new()))
            .handle(cmd)
            .unwrap();

        assert_eq!(result.matrix.row_by_name("comfort").unwrap(), &[2.0, 4.0, 5.0]);
        assert!(matches!(result.outcome, RankingOutcome::Consensus(_)));
    }

    #[test]
    fn constrained_task_filters_then_selects() {
        let cmd = RankUncertainAlternativesCommand {
            certain: Some(certain()),
            uncertain: vec![comfort(vec!["A", "B", "C"], vec![2.0, 4.0, 5.0], vec![3.0, 6.0, 7.0])],
            constraints: Some(ConstrainedTask {
                goals: vec!["profit".to_string()],
                restrictions: vec!["safety".to_string(), "comfort".to_string()],
                principle: OptimalityPrinciple::AbsoluteConcession,
                limit: 5.0,
            }),
            ..Default::default()
        };
        let recorder = Arc::new(InMemoryTraceRecorder::new());
        let result = RankUncertainAlternativesHandler::new(recorder.clone())
            .handle(cmd)
            .unwrap();

        match &result.outcome {
            RankingOutcome::Constrained(selection) => {
                assert_eq!(selection.restriction_scores, vec![3.0, 9.0, 11.0]);
                assert_eq!(selection.survivors, vec!["B".to_string(), "C".to_string()]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(result.outcome.winners(), &["B".to_string()]);
        for stage in ["scaling", "resolution", "normalization", "assembly", "constrained-selection"] {
            assert!(recorder.has_stage(stage), "missing stage {}", stage);
        }
    }

    #[test]
    fn uncertain_only_task_needs_no_certain_matrix() {
        let cmd = RankUncertainAlternativesCommand {
            uncertain: vec![comfort(vec!["A", "B"], vec![1.0, 9.0], vec![8.0, 2.0])],
            ..Default::default()
        };
        let result = RankUncertainAlternativesHandler::new(Arc::new(InMemoryTraceRecorder::new()))
            .handle(cmd)
            .unwrap();
        assert_eq!(result.matrix.criteria(), &["comfort".to_string()]);
        assert_eq!(result.outcome.winners(), &["B".to_string()]);
    }

    #[test]
    fn minimax_regret_row_is_floored() {
        let mut criterion = comfort(vec!["A", "B", "C"], vec![1.0, 9.0, 5.0], vec![8.0, 2.0, 5.0]);
        criterion.method = ResolutionMethod::MinimaxRegret;
        let cmd = RankUncertainAlternativesCommand {
            uncertain: vec![criterion],
            ..Default::default()
        };
        let result = RankUncertainAlternativesHandler::new(Arc::new(InMemoryTraceRecorder::new()))
            .handle(cmd)
            .unwrap();

        let row = result.matrix.row_by_name("comfort").unwrap();
        let floor = 4.0 * 1e-4;
        assert!(row.iter().all(|v| v.abs() >= floor), "row {:?}", row);
        assert_eq!(row[1], 2.0);
        assert_eq!(row[2], 4.0);
    }

    #[test]
    fn illegal_method_reports_resolution_stage() {
        let mut criterion = comfort(vec!["A", "B"], vec![1.0, 9.0], vec![8.0, 2.0]);
        criterion.method = ResolutionMethod::BayesLaplace;
        let cmd = RankUncertainAlternativesCommand {
            uncertain: vec![criterion],
            ..Default::default()
        };
        let err = RankUncertainAlternativesHandler::new(Arc::new(InMemoryTraceRecorder::new()))
            .handle(cmd)
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ConfigurationError);
        assert!(matches!(
            err.root(),
            AnalysisError::Configuration(ConfigurationError::MethodNotAllowed { .. })
        ));
        assert!(matches!(err, AnalysisError::Stage { ref stage, .. } if stage == "resolution"));
    }

    #[test]
    fn empty_command_is_validation_error() {
        let err = RankUncertainAlternativesHandler::new(Arc::new(InMemoryTraceRecorder::new()))
            .handle(RankUncertainAlternativesCommand::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
