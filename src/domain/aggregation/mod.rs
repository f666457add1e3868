//! Aggregation module - expert opinion aggregation.
//!
//! Reduces an experts x alternatives score table for one criterion to a single
//! consensus row by averaging, by competence-weighted averaging (Evlanov-Kutuzov
//! or Rykov) or by generalized ranking.

mod aggregator;
mod competence;
mod concordance;
mod generalized_ranking;
mod method;
mod panel;

pub use aggregator::{Aggregation, AggregationTrace, ExpertAggregator};
pub use competence::{evlanov_kutuzov, rykov, CompetenceTrace};
pub use concordance::{kendall_concordance, to_ranks};
pub use generalized_ranking::{comparison_matrix, select_expert, PairDistance, RankingTrace};
pub use method::{
    AggregationMethod, AggregationParams, EvlanovKutuzovParams, RankingMetric, RykovMode,
    RykovParams,
};
pub use panel::{ExpertPanel, ExpertPanelBuilder};
