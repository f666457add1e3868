//! Aggregation methods and their tuning parameters.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{resolve_identifier, ConfigurationError};

/// Strategy reducing an expert panel to one consensus row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationMethod {
    /// Column means across experts.
    Average,
    /// Competence-weighted mean, weights from the Evlanov-Kutuzov fixed point.
    EvlanovKutuzov,
    /// Competence-weighted mean, weights from Rykov's distance-penalty iteration.
    Rykov,
    /// Raw row of the expert whose ranking is closest to everyone else's.
    GeneralizedRanking,
}

static AGGREGATION_METHODS: Lazy<HashMap<&'static str, AggregationMethod>> = Lazy::new(|| {
    HashMap::from([
        ("average", AggregationMethod::Average),
        ("evlanov-kutuzov", AggregationMethod::EvlanovKutuzov),
        ("rykov", AggregationMethod::Rykov),
        ("generalized-ranking", AggregationMethod::GeneralizedRanking),
    ])
});

impl AggregationMethod {
    /// Returns all methods in presentation order.
    pub fn all() -> &'static [AggregationMethod] {
        &[
            AggregationMethod::Average,
            AggregationMethod::EvlanovKutuzov,
            AggregationMethod::Rykov,
            AggregationMethod::GeneralizedRanking,
        ]
    }

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::Average => "average",
            AggregationMethod::EvlanovKutuzov => "evlanov-kutuzov",
            AggregationMethod::Rykov => "rykov",
            AggregationMethod::GeneralizedRanking => "generalized-ranking",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AggregationMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&AGGREGATION_METHODS, "aggregation method", s)
    }
}

/// Weight update rule for Rykov's iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RykovMode {
    /// `K_e * delta_e`
    #[default]
    Multiplicative,
    /// `K_e + delta_e`
    Additive,
}

/// Distance between two experts' pairwise comparison matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMetric {
    /// Half the summed absolute differences.
    #[default]
    Median,
    /// Half the summed squared differences.
    Mean,
}

/// Parameters for the Evlanov-Kutuzov fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvlanovKutuzovParams {
    /// Stop when every weight moves less than this.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for EvlanovKutuzovParams {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            max_iterations: 1000,
        }
    }
}

/// Parameters for Rykov's iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RykovParams {
    /// Exponent of the distance norm; must be >= 1.
    pub p: f64,
    /// Regularizer added to the distance before inversion.
    pub epsilon: f64,
    /// Stop when every weight moves less than this.
    pub convergence_epsilon: f64,
    pub mode: RykovMode,
    pub max_iterations: usize,
}

impl Default for RykovParams {
    fn default() -> Self {
        Self {
            p: 1.0,
            epsilon: 0.01,
            convergence_epsilon: 0.001,
            mode: RykovMode::Multiplicative,
            max_iterations: 1000,
        }
    }
}

/// All aggregation tuning knobs; each method reads its own section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationParams {
    pub evlanov_kutuzov: EvlanovKutuzovParams,
    pub rykov: RykovParams,
    pub ranking_metric: RankingMetric,
}
