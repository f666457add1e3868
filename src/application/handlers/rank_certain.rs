//! RankCertainAlternativesHandler - ranks alternatives under certainty.
//!
//! Pipeline: aggregate expert panels, stack with numeric criteria, change
//! direction, normalize, then vote with all ten optimality principles.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::trace::emit;
use crate::config::EngineConfig;
use crate::domain::aggregation::{Aggregation, AggregationMethod, AggregationParams, ExpertAggregator, ExpertPanel};
use crate::domain::foundation::{AnalysisError, DecisionMatrix, RunId, Timestamp, ValidationError};
use crate::domain::optimality::{Consensus, CriterionWeights, OptimalitySelector, SelectionParams, Verdict};
use crate::domain::scaling::{DirectionChanger, DirectionPlan, NormalizationPlan, Normalizer};
use crate::ports::TraceObserver;

/// One expert-judged criterion and the method that aggregates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertCriterion {
    pub panel: ExpertPanel,
    pub method: AggregationMethod,
}

/// Command to rank alternatives with fully known criterion values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankCertainAlternativesCommand {
    /// Criteria scored by expert panels.
    pub expert_criteria: Vec<ExpertCriterion>,
    /// Criteria with measured values.
    pub numeric: Option<DecisionMatrix>,
    pub directions: DirectionPlan,
    pub normalization: NormalizationPlan,
    pub weights: CriterionWeights,
    pub selection: SelectionParams,
}

/// Result of a certain-task run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankCertainAlternativesResult {
    pub run_id: RunId,
    pub aggregations: Vec<Aggregation>,
    /// Matrix after direction change and normalization.
    pub matrix: DecisionMatrix,
    pub consensus: Consensus,
}

/// Handler for certain-task ranking.
pub struct RankCertainAlternativesHandler {
    observer: Arc<dyn TraceObserver>,
    params: AggregationParams,
    concordance_threshold: f64,
}

impl RankCertainAlternativesHandler {
    pub fn new(
        observer: Arc<dyn TraceObserver>,
        params: AggregationParams,
        concordance_threshold: f64,
    ) -> Self {
        Self {
            observer,
            params,
            concordance_threshold,
        }
    }

    pub fn from_config(observer: Arc<dyn TraceObserver>, config: &EngineConfig) -> Self {
        Self::new(
            observer,
            config.aggregation.params(),
            config.aggregation.concordance_threshold,
        )
    }

    pub fn handle(
        &self,
        cmd: RankCertainAlternativesCommand,
    ) -> Result<RankCertainAlternativesResult, AnalysisError> {
        let run_id = RunId::new();
        let started = Timestamp::now();
        info!(%run_id, expert_criteria = cmd.expert_criteria.len(), "ranking certain alternatives");

        // 1. Aggregate every expert panel
        let mut aggregations = Vec::with_capacity(cmd.expert_criteria.len());
        for criterion in &cmd.expert_criteria {
            let name = criterion.panel.criterion();
            let aggregation = ExpertAggregator::ensure_method_available(
                &criterion.panel,
                criterion.method,
                self.concordance_threshold,
            )
            .map_err(AnalysisError::from)
            .and_then(|_| ExpertAggregator::aggregate(&criterion.panel, criterion.method, &self.params))
            .map_err(|e| e.in_stage("aggregation", name))?;
            emit(self.observer.as_ref(), run_id, "aggregation", name, &aggregation);
            aggregations.push(aggregation);
        }

        // 2. Stack with numeric criteria
        let matrix = combine(cmd.numeric.as_ref(), &aggregations)
            .map_err(|e| AnalysisError::from(e).in_stage("assembly", "matrix"))?;

        // 3. Direction change
        let matrix = DirectionChanger::change_direction(&matrix, &cmd.directions)
            .map_err(|e| e.in_stage("direction-change", "matrix"))?;
        emit(self.observer.as_ref(), run_id, "direction-change", "matrix", &matrix);

        // 4. Normalization
        let matrix = Normalizer::normalize(&matrix, &cmd.normalization)
            .map_err(|e| e.in_stage("normalization", "matrix"))?;
        emit(self.observer.as_ref(), run_id, "normalization", "matrix", &matrix);

        // 5. Consensus over all principles
        let consensus = OptimalitySelector::consensus(&matrix, &cmd.weights, &cmd.selection)?;
        for verdict in &consensus.verdicts {
            let principle = verdict.principle();
            emit(self.observer.as_ref(), run_id, "selection", principle.as_str(), verdict);
            if let Verdict::Inapplicable { reason, .. } = verdict {
                info!(%run_id, %principle, reason = %reason, "principle inapplicable");
            }
        }
        emit(self.observer.as_ref(), run_id, "consensus", "votes", &consensus.mark_table());
        info!(
            %run_id,
            elapsed_ms = Timestamp::now().millis_since(&started),
            winners = ?consensus.winners,
            "certain ranking complete"
        );

        Ok(RankCertainAlternativesResult {
            run_id,
            aggregations,
            matrix,
            consensus,
        })
    }
}

/// Numeric rows first, then aggregated rows aligned by alternative name.
fn combine(
    numeric: Option<&DecisionMatrix>,
    aggregations: &[Aggregation],
) -> Result<DecisionMatrix, ValidationError> {
    match (numeric, aggregations.is_empty()) {
        (Some(numeric), true) => Ok(numeric.clone()),
        (Some(numeric), false) => numeric.stack(&ExpertAggregator::to_matrix(aggregations)?),
        (None, false) => ExpertAggregator::to_matrix(aggregations),
        (None, true) => Err(ValidationError::empty_field("criteria")),
    }
}
