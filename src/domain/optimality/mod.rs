//! Optimality module - choosing winners from a finalized decision matrix.
//!
//! Ten principles (reference points, Pareto, equality, concessions,
//! main criterion, lexicographic) are applied one at a time, all together
//! as a vote, or in constrained goal/restriction mode.

mod concession;
mod consensus;
mod constrained;
mod deviation;
mod equality;
mod lexicographic;
mod main_criterion;
mod metric;
mod params;
mod pareto;
mod principle;
mod reference_point;
mod selector;
mod trace;
mod weights;

pub use concession::{weighted_products, weighted_sums};
pub use consensus::{Consensus, Verdict};
pub use constrained::{ConstrainedSelection, ConstrainedTask};
pub use deviation::DeviationTable;
pub use lexicographic::priority_order;
pub use main_criterion::main_criterion;
pub use metric::DistanceMetric;
pub use params::SelectionParams;
pub use pareto::dominates;
pub use principle::OptimalityPrinciple;
pub use selector::{OptimalitySelector, Selection};
pub use trace::{LexStep, SelectionTrace};
pub use weights::CriterionWeights;
