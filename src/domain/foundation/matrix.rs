//! Decision Matrix - criteria (rows) x alternatives (columns) of real values.
//!
//! Every transformation returns a new owned matrix; nothing in the pipeline
//! mutates a matrix another stage still holds.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AnalysisError, ValidationError};

/// Criteria x alternatives table of finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDecisionMatrix")]
pub struct DecisionMatrix {
    criteria: Vec<String>,
    alternatives: Vec<String>,
    /// One row per criterion, one entry per alternative.
    values: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawDecisionMatrix {
    criteria: Vec<String>,
    alternatives: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawDecisionMatrix> for DecisionMatrix {
    type Error = ValidationError;

    fn try_from(raw: RawDecisionMatrix) -> Result<Self, Self::Error> {
        DecisionMatrix::new(raw.criteria, raw.alternatives, raw.values)
    }
}

impl DecisionMatrix {
    /// Creates a validated matrix.
    ///
    /// # Errors
    /// - Empty criteria or alternatives
    /// - Duplicate criterion or alternative names
    /// - Row count or row length not matching the name lists
    /// - NaN or infinite values
    pub fn new(
        criteria: Vec<String>,
        alternatives: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        if criteria.is_empty() {
            return Err(ValidationError::empty_field("criteria"));
        }
        if alternatives.is_empty() {
            return Err(ValidationError::empty_field("alternatives"));
        }
        ensure_unique("criterion", &criteria)?;
        ensure_unique("alternative", &alternatives)?;

        if values.len() != criteria.len() {
            return Err(ValidationError::dimension_mismatch(
                "criteria rows",
                criteria.len(),
                values.len(),
            ));
        }
        for (row_index, row) in values.iter().enumerate() {
            if row.len() != alternatives.len() {
                return Err(ValidationError::dimension_mismatch(
                    format!("row '{}'", criteria[row_index]),
                    alternatives.len(),
                    row.len(),
                ));
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::non_finite("decision matrix", row_index, column));
            }
        }

        Ok(Self {
            criteria,
            alternatives,
            values,
        })
    }

    /// Creates a builder for constructing a matrix row by row.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    /// Criterion names in row order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Alternative names in column order.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Row for the criterion at `index`.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index]
    }

    /// Row for a named criterion.
    pub fn row_by_name(&self, criterion: &str) -> Option<&[f64]> {
        self.criterion_index(criterion).map(|i| self.row(i))
    }

    /// Values of every criterion for the alternative at `index`.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[index]).collect()
    }

    /// Single cell.
    pub fn value(&self, criterion: usize, alternative: usize) -> f64 {
        self.values[criterion][alternative]
    }

    /// Position of a criterion.
    pub fn criterion_index(&self, criterion: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c == criterion)
    }

    /// Position of an alternative.
    pub fn alternative_index(&self, alternative: &str) -> Option<usize> {
        self.alternatives.iter().position(|a| a == alternative)
    }

    /// Number of criteria.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Maps every row through `transform`, producing a new matrix.
    ///
    /// The result is revalidated, so a transform that yields NaN surfaces as
    /// a validation error rather than leaking downstream.
    pub fn try_map_rows<F>(&self, mut transform: F) -> Result<Self, AnalysisError>
    where
        F: FnMut(&str, &[f64]) -> Result<Vec<f64>, AnalysisError>,
    {
        let values = self
            .criteria
            .iter()
            .zip(&self.values)
            .map(|(criterion, row)| transform(criterion, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(
            self.criteria.clone(),
            self.alternatives.clone(),
            values,
        )?)
    }

    /// Keeps only the named criteria, in the given order.
    pub fn select_criteria(&self, criteria: &[String]) -> Result<Self, ValidationError> {
        let rows = criteria
            .iter()
            .map(|name| {
                self.row_by_name(name)
                    .map(|row| row.to_vec())
                    .ok_or_else(|| ValidationError::unknown_name("criterion", name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(criteria.to_vec(), self.alternatives.clone(), rows)
    }

    /// Keeps only the named alternatives, in the given order.
    pub fn select_alternatives(&self, alternatives: &[String]) -> Result<Self, ValidationError> {
        let indices = alternatives
            .iter()
            .map(|name| {
                self.alternative_index(name)
                    .ok_or_else(|| ValidationError::unknown_name("alternative", name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .values
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();

        Self::new(self.criteria.clone(), alternatives.to_vec(), rows)
    }

    /// Appends the rows of `other` below this matrix.
    ///
    /// `other` must cover the same alternatives; its columns are reordered to
    /// match this matrix.
    pub fn stack(&self, other: &DecisionMatrix) -> Result<Self, ValidationError> {
        if other.alternative_count() != self.alternative_count() {
            return Err(ValidationError::dimension_mismatch(
                "stacked alternatives",
                self.alternative_count(),
                other.alternative_count(),
            ));
        }
        let aligned = other.select_alternatives(&self.alternatives)?;

        let mut criteria = self.criteria.clone();
        criteria.extend(aligned.criteria.iter().cloned());
        let mut values = self.values.clone();
        values.extend(aligned.values.iter().cloned());

        Self::new(criteria, self.alternatives.clone(), values)
    }

    /// Returns a copy with one more criterion row appended.
    pub fn with_criterion(
        &self,
        criterion: impl Into<String>,
        row: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        let mut criteria = self.criteria.clone();
        criteria.push(criterion.into());
        let mut values = self.values.clone();
        values.push(row);

        Self::new(criteria, self.alternatives.clone(), values)
    }
}

fn ensure_unique(kind: &str, names: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::duplicate_name(kind, name.clone()));
        }
    }
    Ok(())
}

/// Builder for constructing DecisionMatrix instances.
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives.
    pub fn alternatives(mut self, names: Vec<impl Into<String>>) -> Self {
        self.alternatives = names.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds a criterion row.
    pub fn criterion(mut self, name: impl Into<String>, row: Vec<f64>) -> Self {
        self.criteria.push(name.into());
        self.values.push(row);
        self
    }

    /// Builds and validates the matrix.
    pub fn build(self) -> Result<DecisionMatrix, ValidationError> {
        DecisionMatrix::new(self.criteria, self.alternatives, self.values)
    }
}
