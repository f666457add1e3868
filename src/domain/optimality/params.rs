//! Parameters for optimality selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::deviation::DeviationTable;
use super::metric::DistanceMetric;
use crate::domain::foundation::{DecisionMatrix, ValidationError};

/// Per-principle inputs. Absent entries fall back to the data-driven defaults
/// described on each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Explicit ideal point; criteria not listed use their row maximum.
    pub ideal_point: BTreeMap<String, f64>,
    /// Explicit anti-ideal point; criteria not listed use their row minimum.
    pub anti_ideal_point: BTreeMap<String, f64>,
    pub metric: DistanceMetric,
    /// Quasi-equality tolerances; all zero when absent.
    pub deviation: Option<DeviationTable>,
    /// Main-criterion minimums for the non-main criteria; unlisted criteria are unrestricted.
    pub main_thresholds: BTreeMap<String, f64>,
    /// Lexicographic quasi-equality tolerances; unlisted criteria use 0.
    pub lex_thresholds: BTreeMap<String, f64>,
}

impl SelectionParams {
    /// Restricts every criterion-keyed entry to the named criteria.
    pub fn restricted_to(&self, criteria: &[String]) -> Self {
        let keep = |map: &BTreeMap<String, f64>| {
            map.iter()
                .filter(|(k, _)| criteria.contains(k))
                .map(|(k, v)| (k.clone(), *v))
                .collect()
        };
        Self {
            ideal_point: keep(&self.ideal_point),
            anti_ideal_point: keep(&self.anti_ideal_point),
            metric: self.metric,
            deviation: None,
            main_thresholds: keep(&self.main_thresholds),
            lex_thresholds: keep(&self.lex_thresholds),
        }
    }

    /// Rejects main-criterion and lexicographic thresholds keyed by a
    /// criterion the matrix does not have.
    pub(crate) fn ensure_thresholds_known(&self, matrix: &DecisionMatrix) -> Result<(), ValidationError> {
        self.main_thresholds
            .keys()
            .chain(self.lex_thresholds.keys())
            .find(|name| matrix.criterion_index(name).is_none())
            .map_or(Ok(()), |name| Err(ValidationError::unknown_name("criterion", name.clone())))
    }
}

/// Resolves a per-criterion map against the matrix, using `fallback(row)`
/// for criteria without an entry.
pub(crate) fn per_criterion<F>(
    matrix: &DecisionMatrix,
    map: &BTreeMap<String, f64>,
    field: &str,
    fallback: F,
) -> Result<Vec<f64>, ValidationError>
where
    F: Fn(&[f64]) -> f64,
{
    for (name, value) in map {
        let Some(index) = matrix.criterion_index(name) else {
            return Err(ValidationError::unknown_name("criterion", name.clone()));
        };
        if !value.is_finite() {
            return Err(ValidationError::non_finite(field, 0, index));
        }
    }
    Ok(matrix
        .criteria()
        .iter()
        .zip(matrix.rows())
        .map(|(name, row)| map.get(name).copied().unwrap_or_else(|| fallback(row)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::numeric::max_of;

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A", "B"])
            .criterion("cost", vec![1.0, 4.0])
            .criterion("quality", vec![2.0, 3.0])
            .build()
            .unwrap()
    }

    #[test]
    fn per_criterion_uses_fallback_for_missing_entries() {
        let map = BTreeMap::from([("quality".to_string(), 10.0)]);
        let values = per_criterion(&matrix(), &map, "ideal point", max_of).unwrap();
        assert_eq!(values, vec![4.0, 10.0]);
    }

    #[test]
    fn per_criterion_rejects_unknown_names() {
        let map = BTreeMap::from([("speed".to_string(), 1.0)]);
        assert!(per_criterion(&matrix(), &map, "ideal point", max_of).is_err());
    }

    #[test]
    fn restricted_to_filters_every_map() {
        let params = SelectionParams {
            ideal_point: BTreeMap::from([("cost".to_string(), 1.0), ("quality".to_string(), 2.0)]),
            lex_thresholds: BTreeMap::from([("cost".to_string(), 0.5)]),
            ..SelectionParams::default()
        };
        let restricted = params.restricted_to(&["quality".to_string()]);
        assert_eq!(restricted.ideal_point.len(), 1);
        assert!(restricted.lex_thresholds.is_empty());
    }
}
