//! Consensus selection - every principle votes, the most-voted alternatives win.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::params::SelectionParams;
use super::principle::OptimalityPrinciple;
use super::selector::{OptimalitySelector, Selection};
use super::weights::CriterionWeights;
use crate::domain::foundation::numeric::argmax_set;
use crate::domain::foundation::{AnalysisError, ConfigurationError, DecisionMatrix};

/// Outcome of one principle within a consensus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Verdict {
    Selected(Selection),
    /// The principle could not be applied; it casts no votes.
    Inapplicable {
        principle: OptimalityPrinciple,
        reason: String,
    },
}

impl Verdict {
    pub fn principle(&self) -> OptimalityPrinciple {
        match self {
            Verdict::Selected(selection) => selection.principle,
            Verdict::Inapplicable { principle, .. } => *principle,
        }
    }

    /// Whether this principle selected `alternative`.
    pub fn selects(&self, alternative: &str) -> bool {
        match self {
            Verdict::Selected(selection) => selection.winners.iter().any(|w| w == alternative),
            Verdict::Inapplicable { .. } => false,
        }
    }
}

/// Result of running all ten principles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub alternatives: Vec<String>,
    /// One verdict per principle, in consensus-table order.
    pub verdicts: Vec<Verdict>,
    /// `marks[p][a]` is true when principle `p` selected alternative `a`.
    pub marks: Vec<Vec<bool>>,
    /// Number of principles selecting each alternative.
    pub votes: Vec<usize>,
    pub winners: Vec<String>,
}

impl Consensus {
    /// Renders the vote table with one row per principle and check marks.
    pub fn mark_table(&self) -> Vec<(String, Vec<&'static str>)> {
        self.verdicts
            .iter()
            .zip(&self.marks)
            .map(|(verdict, row)| {
                let cells = row.iter().map(|m| if *m { "✓" } else { "✗" }).collect();
                (verdict.principle().to_string(), cells)
            })
            .collect()
    }
}

impl OptimalitySelector {
    /// Runs every principle and picks the alternatives with the most votes.
    ///
    /// Main-criterion is recorded as inapplicable (not an error) when weights
    /// tie at the maximum. A numeric failure inside one principle, such as a
    /// fractional power of a negative value, also marks only that principle
    /// inapplicable. Validation and configuration failures abort the run.
    pub fn consensus(
        matrix: &DecisionMatrix,
        weights: &CriterionWeights,
        params: &SelectionParams,
    ) -> Result<Consensus, AnalysisError> {
        let mut verdicts = Vec::with_capacity(OptimalityPrinciple::all().len());
        for &principle in OptimalityPrinciple::all() {
            match Self::select(matrix, weights, principle, params) {
                Ok(selection) => verdicts.push(Verdict::Selected(selection)),
                Err(AnalysisError::Configuration(
                    err @ ConfigurationError::MainCriterionInapplicable { .. },
                )) => {
                    info!(reason = %err, "main-criterion principle skipped");
                    verdicts.push(Verdict::Inapplicable {
                        principle,
                        reason: err.to_string(),
                    });
                }
                Err(AnalysisError::Numeric(err)) => {
                    warn!(%principle, reason = %err, "principle skipped after numeric failure");
                    verdicts.push(Verdict::Inapplicable {
                        principle,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err.in_stage("selection", principle.as_str())),
            }
        }

        let alternatives = matrix.alternatives().to_vec();
        let marks: Vec<Vec<bool>> = verdicts
            .iter()
            .map(|v| alternatives.iter().map(|a| v.selects(a)).collect())
            .collect();
        let votes: Vec<usize> = (0..alternatives.len())
            .map(|a| marks.iter().filter(|row| row[a]).count())
            .collect();

        let as_float: Vec<f64> = votes.iter().map(|&v| v as f64).collect();
        let winners: Vec<String> = argmax_set(&as_float)
            .into_iter()
            .map(|i| alternatives[i].clone())
            .collect();
        debug!(votes = ?votes, winners = ?winners, "consensus reached");

        Ok(Consensus {
            alternatives,
            verdicts,
            marks,
            votes,
            winners,
        })
    }
}
