//! Uncertainty module - resolution of states-of-nature tables.
//!
//! Each uncertain criterion carries a states x alternatives table and a
//! prior-information regime. The regime decides which decision rules are
//! legal; the chosen rule reduces the table to one row that joins the
//! certain criteria in the decision matrix.

mod ignorance;
mod params;
mod probabilistic;
mod regime;
mod resolver;
mod risk;
mod state_table;

pub use params::{validate_probabilities, MseBaseline, ResolutionParams, PROBABILITY_SUM_TOLERANCE};
pub use regime::{PriorInformationRegime, ResolutionMethod};
pub use resolver::{Intermediate, Resolution, ResolutionTrace, UncertaintyResolver};
pub use state_table::{StateTable, StateTableBuilder};
