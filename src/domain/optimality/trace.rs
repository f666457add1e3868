//! Intermediate tables recorded while selecting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metric::DistanceMetric;

/// One lexicographic filtering step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexStep {
    pub criterion: String,
    pub survivors: Vec<String>,
}

/// Principle-specific audit data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionTrace {
    ReferencePoint {
        reference: Vec<f64>,
        metric: DistanceMetric,
        /// Distance per alternative, in matrix column order.
        distances: Vec<f64>,
    },
    Pareto {
        /// Dominated alternative -> alternatives dominating it.
        dominated_by: BTreeMap<String, Vec<String>>,
        /// Weighted criterion sum for every alternative on the front.
        front_weighted_sums: BTreeMap<String, f64>,
    },
    Equality {
        /// Weighted values, criteria x alternatives.
        weighted: Vec<Vec<f64>>,
        /// Tolerances used for each criterion pair, all zero for strict equality.
        tolerances: Vec<Vec<f64>>,
    },
    Concession {
        /// Weighted sum or weighted product per alternative.
        scores: Vec<f64>,
    },
    MainCriterion {
        main: String,
        thresholds: BTreeMap<String, f64>,
        survivors: Vec<String>,
    },
    Lexicographic {
        order: Vec<String>,
        steps: Vec<LexStep>,
    },
}
