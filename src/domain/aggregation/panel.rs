//! Expert Panel - experts x alternatives raw scores for one criterion.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// Raw expert scores for one criterion; one row per expert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpertPanel")]
pub struct ExpertPanel {
    criterion: String,
    experts: Vec<String>,
    alternatives: Vec<String>,
    scores: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawExpertPanel {
    criterion: String,
    experts: Vec<String>,
    alternatives: Vec<String>,
    scores: Vec<Vec<f64>>,
}

impl TryFrom<RawExpertPanel> for ExpertPanel {
    type Error = ValidationError;

    fn try_from(raw: RawExpertPanel) -> Result<Self, Self::Error> {
        ExpertPanel::new(raw.criterion, raw.experts, raw.alternatives, raw.scores)
    }
}

impl ExpertPanel {
    /// Creates a validated panel.
    pub fn new(
        criterion: impl Into<String>,
        experts: Vec<String>,
        alternatives: Vec<String>,
        scores: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let criterion = criterion.into();
        if criterion.is_empty() {
            return Err(ValidationError::empty_field("criterion"));
        }
        if experts.is_empty() {
            return Err(ValidationError::empty_field("experts"));
        }
        if alternatives.is_empty() {
            return Err(ValidationError::empty_field("alternatives"));
        }
        unique("expert", &experts)?;
        unique("alternative", &alternatives)?;

        if scores.len() != experts.len() {
            return Err(ValidationError::dimension_mismatch(
                "expert rows",
                experts.len(),
                scores.len(),
            ));
        }
        for (row, expert_scores) in scores.iter().enumerate() {
            if expert_scores.len() != alternatives.len() {
                return Err(ValidationError::dimension_mismatch(
                    format!("scores of expert '{}'", experts[row]),
                    alternatives.len(),
                    expert_scores.len(),
                ));
            }
            if let Some(column) = expert_scores.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::non_finite("expert panel", row, column));
            }
        }

        Ok(Self {
            criterion,
            experts,
            alternatives,
            scores,
        })
    }

    /// Creates a builder for the named criterion.
    pub fn builder(criterion: impl Into<String>) -> ExpertPanelBuilder {
        ExpertPanelBuilder {
            criterion: criterion.into(),
            ..ExpertPanelBuilder::default()
        }
    }

    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    pub fn experts(&self) -> &[String] {
        &self.experts
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Score rows, one per expert.
    pub fn scores(&self) -> &[Vec<f64>] {
        &self.scores
    }

    pub fn expert_count(&self) -> usize {
        self.experts.len()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Consensus row `sum_e weight_e * score_e`.
    pub fn weighted_row(&self, weights: &[f64]) -> Vec<f64> {
        (0..self.alternative_count())
            .map(|alt| {
                self.scores
                    .iter()
                    .zip(weights)
                    .map(|(row, weight)| row[alt] * weight)
                    .sum()
            })
            .collect()
    }
}

fn unique(kind: &str, names: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    match names.iter().find(|name| !seen.insert(name.as_str())) {
        Some(duplicate) => Err(ValidationError::duplicate_name(kind, duplicate.clone())),
        None => Ok(()),
    }
}

/// Builder for constructing ExpertPanel instances.
#[derive(Debug, Default)]
pub struct ExpertPanelBuilder {
    criterion: String,
    alternatives: Vec<String>,
    experts: Vec<String>,
    scores: Vec<Vec<f64>>,
}

impl ExpertPanelBuilder {
    /// Sets the alternatives.
    pub fn alternatives(mut self, names: Vec<impl Into<String>>) -> Self {
        self.alternatives = names.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds one expert's scores.
    pub fn expert(mut self, name: impl Into<String>, scores: Vec<f64>) -> Self {
        self.experts.push(name.into());
        self.scores.push(scores);
        self
    }

    /// Builds and validates the panel.
    pub fn build(self) -> Result<ExpertPanel, ValidationError> {
        ExpertPanel::new(self.criterion, self.experts, self.alternatives, self.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_panel() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B"])
            .expert("E1", vec![1.0, 2.0])
            .expert("E2", vec![3.0, 4.0])
            .build()
            .unwrap();

        assert_eq!(panel.criterion(), "quality");
        assert_eq!(panel.expert_count(), 2);
        assert_eq!(panel.alternative_count(), 2);
    }

    #[test]
    fn panel_rejects_ragged_rows() {
        let result = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B"])
            .expert("E1", vec![1.0])
            .build();
        assert!(matches!(result, Err(ValidationError::DimensionMismatch { .. })));
    }

    #[test]
    fn panel_rejects_duplicate_experts() {
        let result = ExpertPanel::builder("quality")
            .alternatives(vec!["A"])
            .expert("E1", vec![1.0])
            .expert("E1", vec![2.0])
            .build();
        assert!(matches!(result, Err(ValidationError::DuplicateName { .. })));
    }

    #[test]
    fn panel_rejects_empty_experts() {
        let result = ExpertPanel::builder("quality").alternatives(vec!["A"]).build();
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn weighted_row_combines_experts() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B"])
            .expert("E1", vec![2.0, 4.0])
            .expert("E2", vec![6.0, 8.0])
            .build()
            .unwrap();

        assert_eq!(panel.weighted_row(&[0.5, 0.5]), vec![4.0, 6.0]);
        assert_eq!(panel.weighted_row(&[1.0, 0.0]), vec![2.0, 4.0]);
    }
}
