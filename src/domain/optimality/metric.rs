//! Distance metrics for the reference-point principles.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{resolve_identifier, ConfigurationError};

/// Weighted distance between an alternative and a reference point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    /// `sqrt(sum((w * (x - y))^2))`
    #[default]
    WeightedEuclidean,
    /// `sum(|w * (x - y)|)`
    WeightedManhattan,
    /// `max(|w * (x - y)|)`
    WeightedChebyshev,
}

static METRICS: Lazy<HashMap<&'static str, DistanceMetric>> = Lazy::new(|| {
    HashMap::from([
        ("euclidean", DistanceMetric::WeightedEuclidean),
        ("weighted-euclidean", DistanceMetric::WeightedEuclidean),
        ("manhattan", DistanceMetric::WeightedManhattan),
        ("weighted-manhattan", DistanceMetric::WeightedManhattan),
        ("chebyshev", DistanceMetric::WeightedChebyshev),
        ("weighted-chebyshev", DistanceMetric::WeightedChebyshev),
    ])
});

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::WeightedEuclidean => "weighted-euclidean",
            DistanceMetric::WeightedManhattan => "weighted-manhattan",
            DistanceMetric::WeightedChebyshev => "weighted-chebyshev",
        }
    }

    /// Distance between `point` and `reference` with per-coordinate `weights`.
    pub fn distance(&self, point: &[f64], reference: &[f64], weights: &[f64]) -> f64 {
        let terms = point
            .iter()
            .zip(reference)
            .zip(weights)
            .map(|((x, y), w)| (w * (x - y)).abs());
        match self {
            DistanceMetric::WeightedEuclidean => terms.map(|t| t * t).sum::<f64>().sqrt(),
            DistanceMetric::WeightedManhattan => terms.sum(),
            DistanceMetric::WeightedChebyshev => terms.fold(0.0, f64::max),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&METRICS, "distance metric", s)
    }
}
