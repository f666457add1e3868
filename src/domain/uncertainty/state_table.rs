//! Environment State Table - states of nature x alternatives for one criterion.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::numeric::{max_of, min_of};
use crate::domain::foundation::ValidationError;
use crate::domain::scaling::{DirectionChange, DirectionChanger, NormalizationMethod, Normalizer};

/// Outcomes of every alternative under every state for one uncertain criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStateTable")]
pub struct StateTable {
    criterion: String,
    states: Vec<String>,
    alternatives: Vec<String>,
    /// One row per state, one entry per alternative.
    values: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawStateTable {
    criterion: String,
    states: Vec<String>,
    alternatives: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawStateTable> for StateTable {
    type Error = ValidationError;

    fn try_from(raw: RawStateTable) -> Result<Self, Self::Error> {
        StateTable::new(raw.criterion, raw.states, raw.alternatives, raw.values)
    }
}

impl StateTable {
    /// Creates a validated table.
    pub fn new(
        criterion: impl Into<String>,
        states: Vec<String>,
        alternatives: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let criterion = criterion.into();
        if criterion.is_empty() {
            return Err(ValidationError::empty_field("criterion"));
        }
        if states.is_empty() {
            return Err(ValidationError::empty_field("states"));
        }
        if alternatives.is_empty() {
            return Err(ValidationError::empty_field("alternatives"));
        }
        ensure_unique("state", &states)?;
        ensure_unique("alternative", &alternatives)?;

        if values.len() != states.len() {
            return Err(ValidationError::dimension_mismatch(
                "state rows",
                states.len(),
                values.len(),
            ));
        }
        for (row, outcomes) in values.iter().enumerate() {
            if outcomes.len() != alternatives.len() {
                return Err(ValidationError::dimension_mismatch(
                    format!("state '{}'", states[row]),
                    alternatives.len(),
                    outcomes.len(),
                ));
            }
            if let Some(column) = outcomes.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::non_finite("state table", row, column));
            }
        }

        Ok(Self {
            criterion,
            states,
            alternatives,
            values,
        })
    }

    /// Creates a builder for the named criterion.
    pub fn builder(criterion: impl Into<String>) -> StateTableBuilder {
        StateTableBuilder {
            criterion: criterion.into(),
            ..StateTableBuilder::default()
        }
    }

    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Outcome rows, one per state.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Outcomes of one alternative across all states.
    pub fn column(&self, alternative: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[alternative]).collect()
    }

    /// Worst outcome per alternative.
    pub fn column_mins(&self) -> Vec<f64> {
        (0..self.alternative_count())
            .map(|alt| min_of(&self.column(alt)))
            .collect()
    }

    /// Best outcome per alternative.
    pub fn column_maxes(&self) -> Vec<f64> {
        (0..self.alternative_count())
            .map(|alt| max_of(&self.column(alt)))
            .collect()
    }

    /// Largest value anywhere in the table.
    pub fn max_value(&self) -> f64 {
        self.values.iter().map(|row| max_of(row)).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Probability-weighted expectation per alternative.
    pub fn expectation(&self, probabilities: &[f64]) -> Vec<f64> {
        (0..self.alternative_count())
            .map(|alt| {
                self.values
                    .iter()
                    .zip(probabilities)
                    .map(|(row, p)| row[alt] * p)
                    .sum()
            })
            .collect()
    }

    /// Probability-weighted standard deviation around `expectation`, per alternative.
    pub fn deviation(&self, probabilities: &[f64], expectation: &[f64]) -> Vec<f64> {
        expectation
            .iter()
            .enumerate()
            .map(|(alt, mean)| {
                self.values
                    .iter()
                    .zip(probabilities)
                    .map(|(row, p)| p * (row[alt] - mean).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }

    /// Returns a copy with every value passed through `transform` as one block.
    pub fn map_block<F>(&self, transform: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(&[f64]) -> Vec<f64>,
    {
        let flat: Vec<f64> = self.values.iter().flatten().copied().collect();
        let mapped = transform(&flat);
        if mapped.len() != flat.len() {
            return Err(ValidationError::dimension_mismatch(
                "state table block",
                flat.len(),
                mapped.len(),
            ));
        }
        let width = self.alternative_count();
        let values = mapped.chunks(width).map(<[f64]>::to_vec).collect();

        Self::new(
            self.criterion.clone(),
            self.states.clone(),
            self.alternatives.clone(),
            values,
        )
    }

    /// Flips the whole table; Savage without a supplied maximum uses the table maximum.
    pub fn change_direction(&self, change: DirectionChange) -> Result<Self, ValidationError> {
        self.map_block(|block| DirectionChanger::apply(block, change))
    }

    /// Normalizes the whole table as one block and applies the floor clamp.
    pub fn normalize(&self, method: NormalizationMethod) -> Result<Self, ValidationError> {
        self.map_block(|block| Normalizer::normalize_block(block, method))
    }
}

fn ensure_unique(kind: &str, names: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    match names.iter().find(|name| !seen.insert(name.as_str())) {
        Some(duplicate) => Err(ValidationError::duplicate_name(kind, duplicate.clone())),
        None => Ok(()),
    }
}

/// Builder for constructing StateTable instances.
#[derive(Debug, Default)]
pub struct StateTableBuilder {
    criterion: String,
    alternatives: Vec<String>,
    states: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl StateTableBuilder {
    /// Sets the alternatives.
    pub fn alternatives(mut self, names: Vec<impl Into<String>>) -> Self {
        self.alternatives = names.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds one state with its outcome per alternative.
    pub fn state(mut self, name: impl Into<String>, outcomes: Vec<f64>) -> Self {
        self.states.push(name.into());
        self.values.push(outcomes);
        self
    }

    /// Builds and validates the table.
    pub fn build(self) -> Result<StateTable, ValidationError> {
        StateTable::new(self.criterion, self.states, self.alternatives, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StateTable {
        StateTable::builder("profit")
            .alternatives(vec!["A", "B"])
            .state("boom", vec![1.0, 9.0])
            .state("bust", vec![8.0, 2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn columns_read_across_states() {
        let table = table();
        assert_eq!(table.column(0), vec![1.0, 8.0]);
        assert_eq!(table.column_mins(), vec![1.0, 2.0]);
        assert_eq!(table.column_maxes(), vec![8.0, 9.0]);
        assert_eq!(table.max_value(), 9.0);
    }

    #[test]
    fn expectation_weights_states() {
        assert_eq!(table().expectation(&[0.5, 0.5]), vec![4.5, 5.5]);
    }

    #[test]
    fn deviation_is_weighted_root_mean_square() {
        let table = table();
        let mean = table.expectation(&[0.5, 0.5]);
        assert_eq!(table.deviation(&[0.5, 0.5], &mean), vec![3.5, 3.5]);
    }

    #[test]
    fn direction_change_uses_table_max() {
        let flipped = table()
            .change_direction(DirectionChange::Savage { max: None })
            .unwrap();
        assert_eq!(flipped.values(), &[vec![8.0, 0.0], vec![1.0, 7.0]]);
    }

    #[test]
    fn normalization_treats_table_as_one_block() {
        let normalized = table().normalize(NormalizationMethod::Full).unwrap();
        // min 1, range 8
        assert_eq!(normalized.values()[0][1], 1.0);
        assert_eq!(normalized.values()[1][0], 7.0 / 8.0);
        assert_eq!(normalized.values()[0][0], 1e-4);
    }

    #[test]
    fn table_rejects_ragged_states() {
        let result = StateTable::builder("profit")
            .alternatives(vec!["A", "B"])
            .state("boom", vec![1.0])
            .build();
        assert!(matches!(result, Err(ValidationError::DimensionMismatch { .. })));
    }

    #[test]
    fn table_rejects_duplicate_states() {
        let result = StateTable::builder("profit")
            .alternatives(vec!["A"])
            .state("boom", vec![1.0])
            .state("boom", vec![2.0])
            .build();
        assert!(matches!(result, Err(ValidationError::DuplicateName { .. })));
    }
}
