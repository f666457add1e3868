//! Generalized ranking - picks the expert whose pairwise ordering of the
//! alternatives sits closest to everyone else's.

use serde::{Deserialize, Serialize};

use super::method::RankingMetric;
use super::panel::ExpertPanel;
use crate::domain::foundation::numeric::is_close;

/// Distance between two experts' comparison matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDistance {
    pub first: String,
    pub second: String,
    pub distance: f64,
}

/// Audit trail of a generalized ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTrace {
    pub metric: RankingMetric,
    /// One `alternatives x alternatives` matrix of -1/0/1 per expert.
    pub comparisons: Vec<Vec<Vec<i8>>>,
    /// Distances for every unordered expert pair.
    pub distances: Vec<PairDistance>,
    /// Total distance from each expert to all others.
    pub totals: Vec<f64>,
    pub chosen_expert: String,
}

/// Pairwise comparison matrix for one expert: entry `(i, j)` is 1 when
/// alternative `i` scores above `j`, -1 when below and 0 when tied.
pub fn comparison_matrix(scores: &[f64]) -> Vec<Vec<i8>> {
    scores
        .iter()
        .map(|&a| {
            scores
                .iter()
                .map(|&b| {
                    if is_close(a, b) {
                        0
                    } else if a > b {
                        1
                    } else {
                        -1
                    }
                })
                .collect()
        })
        .collect()
}

/// Distance between two comparison matrices under the given metric.
pub fn distance(first: &[Vec<i8>], second: &[Vec<i8>], metric: RankingMetric) -> f64 {
    let summed: f64 = first
        .iter()
        .flatten()
        .zip(second.iter().flatten())
        .map(|(&a, &b)| {
            let diff = f64::from(a - b);
            match metric {
                RankingMetric::Median => diff.abs(),
                RankingMetric::Mean => diff * diff,
            }
        })
        .sum();
    0.5 * summed
}

/// Selects the expert minimizing total distance to all others.
///
/// Returns the chosen expert's index and the trace. Ties go to the expert
/// listed first.
pub fn select_expert(panel: &ExpertPanel, metric: RankingMetric) -> (usize, RankingTrace) {
    let comparisons: Vec<Vec<Vec<i8>>> = panel
        .scores()
        .iter()
        .map(|row| comparison_matrix(row))
        .collect();
    let n = comparisons.len();

    let mut totals = vec![0.0; n];
    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = distance(&comparisons[i], &comparisons[j], metric);
            totals[i] += d;
            totals[j] += d;
            distances.push(PairDistance {
                first: panel.experts()[i].clone(),
                second: panel.experts()[j].clone(),
                distance: d,
            });
        }
    }

    let chosen = totals
        .iter()
        .enumerate()
        .fold(0, |best, (i, &total)| if total < totals[best] { i } else { best });

    let trace = RankingTrace {
        metric,
        comparisons,
        distances,
        totals,
        chosen_expert: panel.experts()[chosen].clone(),
    };
    (chosen, trace)
}
