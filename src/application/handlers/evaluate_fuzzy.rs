//! EvaluateFuzzyAlternativesHandler - runs one fuzzy evaluation task.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::trace::emit;
use crate::config::EngineConfig;
use crate::domain::foundation::{AnalysisError, RunId, Timestamp};
use crate::domain::fuzzy::{FuzzyEvaluation, FuzzyEvaluator, FuzzyTask, NumericSettings};
use crate::ports::TraceObserver;

/// Result of a fuzzy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateFuzzyAlternativesResult {
    pub run_id: RunId,
    pub evaluation: FuzzyEvaluation,
}

/// Handler for fuzzy evaluation tasks.
pub struct EvaluateFuzzyAlternativesHandler {
    observer: Arc<dyn TraceObserver>,
    settings: NumericSettings,
}

impl EvaluateFuzzyAlternativesHandler {
    pub fn new(observer: Arc<dyn TraceObserver>, settings: NumericSettings) -> Self {
        Self { observer, settings }
    }

    pub fn from_config(observer: Arc<dyn TraceObserver>, config: &EngineConfig) -> Self {
        Self::new(observer, config.numeric.settings())
    }

    pub fn handle(&self, task: FuzzyTask) -> Result<EvaluateFuzzyAlternativesResult, AnalysisError> {
        let run_id = RunId::new();
        let started = Timestamp::now();
        let kind = task.kind();
        info!(%run_id, task = %kind, "evaluating fuzzy alternatives");

        let evaluation = FuzzyEvaluator::evaluate(&task, &self.settings)
            .map_err(|e| e.in_stage("fuzzy-evaluation", kind.as_str()))?;
        emit(self.observer.as_ref(), run_id, "fuzzy-evaluation", kind.as_str(), &evaluation);
        info!(
            %run_id,
            elapsed_ms = Timestamp::now().millis_since(&started),
            winners = ?evaluation.winners,
            "fuzzy evaluation complete"
        );

        Ok(EvaluateFuzzyAlternativesResult { run_id, evaluation })
    }
}
