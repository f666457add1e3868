//! Linguistic scales mapping labels to triangular fuzzy numbers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::triangular::TriangularFuzzyNumber;
use crate::domain::foundation::ValidationError;

/// Labels such as "low", "medium", "high" with their fuzzy meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinguisticScale(BTreeMap<String, TriangularFuzzyNumber>);

impl LinguisticScale {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, TriangularFuzzyNumber)>,
        S: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Looks up a label.
    ///
    /// # Errors
    /// - `ValidationError::UnknownName` when the scale has no such label
    pub fn get(&self, label: &str) -> Result<&TriangularFuzzyNumber, ValidationError> {
        self.0
            .get(label)
            .ok_or_else(|| ValidationError::unknown_name("label", label))
    }

    /// Membership of `x` in the named label.
    pub fn membership(&self, label: &str, x: f64) -> Result<f64, ValidationError> {
        Ok(self.get(label)?.membership(x))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
