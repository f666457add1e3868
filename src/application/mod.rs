//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and reports each stage through
//! the trace port.

pub mod handlers;

pub use handlers::{
    // Certain pipeline
    ExpertCriterion, RankCertainAlternativesCommand, RankCertainAlternativesHandler,
    RankCertainAlternativesResult,
    // Uncertain pipeline
    RankUncertainAlternativesCommand, RankUncertainAlternativesHandler,
    RankUncertainAlternativesResult, RankingOutcome, UncertainCriterion,
    // Fuzzy pipeline
    EvaluateFuzzyAlternativesHandler, EvaluateFuzzyAlternativesResult,
};
