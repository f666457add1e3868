//! Criterion weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DecisionMatrix, ValidationError};

/// Weight per criterion name. Criteria without an entry weigh 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionWeights(BTreeMap<String, f64>);

impl CriterionWeights {
    /// Uniform weights.
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Creates weights from `(criterion, weight)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Sets one weight.
    pub fn with(mut self, criterion: impl Into<String>, weight: f64) -> Self {
        self.0.insert(criterion.into(), weight);
        self
    }

    /// Weight for a criterion, 1 when absent.
    pub fn get(&self, criterion: &str) -> f64 {
        self.0.get(criterion).copied().unwrap_or(1.0)
    }

    /// Weights aligned to the matrix rows.
    ///
    /// # Errors
    /// - `ValidationError::UnknownName` for a weight naming no criterion of the matrix
    /// - `ValidationError::NonFinite` for a NaN or infinite weight
    pub fn for_matrix(&self, matrix: &DecisionMatrix) -> Result<Vec<f64>, ValidationError> {
        for (name, weight) in &self.0 {
            let Some(index) = matrix.criterion_index(name) else {
                return Err(ValidationError::unknown_name("criterion", name.clone()));
            };
            if !weight.is_finite() {
                return Err(ValidationError::non_finite("weights", 0, index));
            }
        }
        Ok(matrix.criteria().iter().map(|c| self.get(c)).collect())
    }

    /// Keeps only the weights of the named criteria.
    pub fn restricted_to(&self, criteria: &[String]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(name, _)| criteria.contains(name))
                .map(|(name, w)| (name.clone(), *w))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A"])
            .criterion("cost", vec![1.0])
            .criterion("quality", vec![2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn missing_weights_default_to_one() {
        let weights = CriterionWeights::uniform().with("quality", 3.0);
        assert_eq!(weights.for_matrix(&matrix()).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn unknown_criterion_is_rejected() {
        let weights = CriterionWeights::from_pairs([("speed", 2.0)]);
        assert!(matches!(
            weights.for_matrix(&matrix()),
            Err(ValidationError::UnknownName { .. })
        ));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let weights = CriterionWeights::from_pairs([("cost", f64::NAN)]);
        assert!(matches!(
            weights.for_matrix(&matrix()),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn restricted_to_drops_other_criteria() {
        let weights = CriterionWeights::from_pairs([("cost", 2.0), ("quality", 3.0)])
            .restricted_to(&["quality".to_string()]);
        assert_eq!(weights.get("cost"), 1.0);
        assert_eq!(weights.get("quality"), 3.0);
    }

    #[test]
    fn weights_deserialize_from_plain_map() {
        let weights: CriterionWeights = serde_json::from_str(r#"{"cost": 0.5}"#).unwrap();
        assert_eq!(weights.get("cost"), 0.5);
    }
}
