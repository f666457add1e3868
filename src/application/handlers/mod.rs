//! Application handlers.
//!
//! One handler per pipeline. Each run gets a fresh `RunId` and reports every
//! stage to the configured `TraceObserver`.

mod evaluate_fuzzy;
mod rank_certain;
mod rank_uncertain;
mod trace;

pub use evaluate_fuzzy::{EvaluateFuzzyAlternativesHandler, EvaluateFuzzyAlternativesResult};
pub use rank_certain::{
    ExpertCriterion, RankCertainAlternativesCommand, RankCertainAlternativesHandler,
    RankCertainAlternativesResult,
};
pub use rank_uncertain::{
    RankUncertainAlternativesCommand, RankUncertainAlternativesHandler,
    RankUncertainAlternativesResult, RankingOutcome, UncertainCriterion,
};
