//! Mamdani rule inference over linguistic labels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::quadrature::{integrate_piecewise, NumericSettings};
use super::scale::LinguisticScale;
use crate::domain::foundation::{AnalysisError, DecisionMatrix, NumericError, ValidationError};

/// Conjunctive rule: every antecedent criterion must match its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    /// Criterion name to required label.
    pub antecedent: BTreeMap<String, String>,
    /// Output label.
    pub consequent: String,
}

impl FuzzyRule {
    pub fn new<I, S, L>(antecedent: I, consequent: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        Self {
            antecedent: antecedent
                .into_iter()
                .map(|(c, l)| (c.into(), l.into()))
                .collect(),
            consequent: consequent.into(),
        }
    }
}

/// A rule that fired for one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFiring {
    pub rule: usize,
    pub consequent: String,
    pub strength: f64,
}

/// Inference outcome for one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub alternative: String,
    pub active: Vec<RuleFiring>,
    pub score: f64,
    /// True when no rule fired and the score fell back to 0.
    pub no_active_rules: bool,
}

/// Checks that every rule names known criteria and labels.
pub fn validate_rules(
    rules: &[FuzzyRule],
    labels: &LinguisticScale,
    observations: &DecisionMatrix,
) -> Result<(), ValidationError> {
    if rules.is_empty() {
        return Err(ValidationError::empty_field("rules"));
    }
    for rule in rules {
        if rule.antecedent.is_empty() {
            return Err(ValidationError::empty_field("antecedent"));
        }
        for (criterion, label) in &rule.antecedent {
            if observations.criterion_index(criterion).is_none() {
                return Err(ValidationError::unknown_name("criterion", criterion.clone()));
            }
            labels.get(label)?;
        }
        labels.get(&rule.consequent)?;
    }
    Ok(())
}

/// Firing strength: the minimum antecedent membership of the observed values.
pub fn firing_strength(
    rule: &FuzzyRule,
    labels: &LinguisticScale,
    observations: &DecisionMatrix,
    alternative: usize,
) -> Result<f64, ValidationError> {
    let mut strength = f64::INFINITY;
    for (criterion, label) in &rule.antecedent {
        let index = observations
            .criterion_index(criterion)
            .ok_or_else(|| ValidationError::unknown_name("criterion", criterion.clone()))?;
        let observed = observations.value(index, alternative);
        strength = strength.min(labels.membership(label, observed)?);
    }
    Ok(strength)
}

/// Runs every rule for one alternative and defuzzifies the clipped output by
/// centroid over [0, 1].
///
/// # Errors
/// - `NumericError::ZeroDivision` if active rules produce an output with no area
/// - `NumericError::QuadratureDidNotConverge` from the integration
pub fn infer(
    rules: &[FuzzyRule],
    labels: &LinguisticScale,
    observations: &DecisionMatrix,
    alternative: usize,
    settings: &NumericSettings,
) -> Result<Inference, AnalysisError> {
    let name = observations.alternatives()[alternative].clone();

    let mut active = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        let strength = firing_strength(rule, labels, observations, alternative)?;
        if strength > 0.0 {
            active.push(RuleFiring {
                rule: index,
                consequent: rule.consequent.clone(),
                strength,
            });
        }
    }

    if active.is_empty() {
        warn!(alternative = %name, "no fuzzy rule fired, score set to 0");
        return Ok(Inference {
            alternative: name,
            active,
            score: 0.0,
            no_active_rules: true,
        });
    }

    let clipped = active
        .iter()
        .map(|firing| Ok((*labels.get(&firing.consequent)?, firing.strength)))
        .collect::<Result<Vec<_>, ValidationError>>()?;
    let output = |x: f64| {
        clipped
            .iter()
            .map(|(shape, strength)| shape.membership(x).min(*strength))
            .fold(0.0, f64::max)
    };

    let mut breakpoints = Vec::with_capacity(clipped.len() * 3);
    for (shape, _) in &clipped {
        breakpoints.extend([shape.start(), shape.peak(), shape.end()]);
    }

    let area = integrate_piecewise(&output, 0.0, 1.0, &breakpoints, settings)?;
    let moment = integrate_piecewise(&|x: f64| x * output(x), 0.0, 1.0, &breakpoints, settings)?;
    if area <= 0.0 {
        return Err(NumericError::zero_division("rule inference centroid").into());
    }

    Ok(Inference {
        alternative: name,
        active,
        score: moment / area,
        no_active_rules: false,
    })
}
