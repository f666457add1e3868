//! Normalization - rescales criterion rows (or whole state tables) onto a
//! comparable range and lifts near-zero values to a small positive floor.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::direction::ensure_plan_covers;
use crate::domain::foundation::numeric::{max_of, min_of, DEGENERATE_OFFSET, FLOOR_FACTOR};
use crate::domain::foundation::{
    resolve_identifier, AnalysisError, ConfigurationError, DecisionMatrix,
};

/// Rescaling applied to a criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMethod {
    #[default]
    None,
    /// Subtract the minimum.
    Comparative,
    /// Divide by the dominant magnitude.
    Relative,
    /// Divide by the range.
    Natural,
    /// Min-max scaling onto [0, 1].
    Full,
}

static NORMALIZATION_METHODS: Lazy<HashMap<&'static str, NormalizationMethod>> =
    Lazy::new(|| {
        HashMap::from([
            ("none", NormalizationMethod::None),
            ("comparative", NormalizationMethod::Comparative),
            ("relative", NormalizationMethod::Relative),
            ("natural", NormalizationMethod::Natural),
            ("full", NormalizationMethod::Full),
        ])
    });

impl NormalizationMethod {
    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMethod::None => "none",
            NormalizationMethod::Comparative => "comparative",
            NormalizationMethod::Relative => "relative",
            NormalizationMethod::Natural => "natural",
            NormalizationMethod::Full => "full",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NormalizationMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&NORMALIZATION_METHODS, "normalization method", s)
    }
}

/// Normalization per criterion name. Criteria not listed are left unscaled
/// but still pass through the floor clamp.
pub type NormalizationPlan = BTreeMap<String, NormalizationMethod>;

/// Normalization functions.
pub struct Normalizer;

impl Normalizer {
    /// Rescales one block of values without applying the floor.
    ///
    /// # Degenerate Ranges
    /// - Relative: divisor is |max| if max > 0, else |min| if max < 0, else
    ///   |min| if min != 0, else max + 1e-6
    /// - Natural / Full: divisor is the range, else max if non-zero, else max + 1e-6
    pub fn scale(values: &[f64], method: NormalizationMethod) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }
        let max = max_of(values);
        let min = min_of(values);

        match method {
            NormalizationMethod::None => values.to_vec(),
            NormalizationMethod::Comparative => values.iter().map(|v| v - min).collect(),
            NormalizationMethod::Relative => {
                let divisor = relative_divisor(min, max);
                values.iter().map(|v| v / divisor).collect()
            }
            NormalizationMethod::Natural => {
                let divisor = range_divisor(min, max);
                values.iter().map(|v| v / divisor).collect()
            }
            NormalizationMethod::Full => {
                let divisor = range_divisor(min, max);
                values.iter().map(|v| (v - min) / divisor).collect()
            }
        }
    }

    /// Lifts every value with |value| <= max * 1e-4 to max * 1e-4.
    pub fn apply_floor(values: &[f64]) -> Vec<f64> {
        let floor = max_of(values) * FLOOR_FACTOR;
        values
            .iter()
            .map(|&v| if v.abs() <= floor { floor } else { v })
            .collect()
    }

    /// Rescales a block and applies the floor.
    pub fn normalize_block(values: &[f64], method: NormalizationMethod) -> Vec<f64> {
        Self::apply_floor(&Self::scale(values, method))
    }

    /// Returns a new matrix with every row normalized per the plan and floored.
    ///
    /// # Errors
    /// - `ValidationError::UnknownName` if the plan names a criterion the matrix lacks
    pub fn normalize(
        matrix: &DecisionMatrix,
        plan: &NormalizationPlan,
    ) -> Result<DecisionMatrix, AnalysisError> {
        ensure_plan_covers(matrix, plan.keys())?;

        matrix.try_map_rows(|criterion, row| {
            let method = plan.get(criterion).copied().unwrap_or_default();
            Ok(Self::normalize_block(row, method))
        })
    }
}

fn relative_divisor(min: f64, max: f64) -> f64 {
    if max > 0.0 {
        max.abs()
    } else if max < 0.0 || min != 0.0 {
        min.abs()
    } else {
        warn!("relative normalization of an all-zero block, using offset divisor");
        max + DEGENERATE_OFFSET
    }
}

fn range_divisor(min: f64, max: f64) -> f64 {
    let range = max - min;
    if range != 0.0 {
        range
    } else if max != 0.0 {
        warn!(max, "normalization block has zero range, dividing by max");
        max
    } else {
        warn!("normalization block is all zero, using offset divisor");
        max + DEGENERATE_OFFSET
    }
}
