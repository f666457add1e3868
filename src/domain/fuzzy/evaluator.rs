//! FuzzyEvaluator - ranks alternatives from fuzzy degrees, labels or rules.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::defuzzify::Defuzzification;
use super::inference::{infer, validate_rules, FuzzyRule, Inference};
use super::quadrature::NumericSettings;
use super::scale::LinguisticScale;
use super::triangular::TriangularFuzzyNumber;
use crate::domain::foundation::numeric::{argmax_set, ensure_finite};
use crate::domain::foundation::{
    resolve_identifier, AnalysisError, ConfigurationError, DecisionMatrix, NumericError,
    ValidationError,
};
use crate::domain::optimality::CriterionWeights;

/// Kind of fuzzy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuzzyTaskKind {
    NonAdditive,
    AdditiveFuzzyNumbers,
    AdditiveMembership,
    RuleInference,
}

static TASK_KINDS: Lazy<HashMap<&'static str, FuzzyTaskKind>> = Lazy::new(|| {
    HashMap::from([
        ("non-additive", FuzzyTaskKind::NonAdditive),
        ("additive-fuzzy-numbers", FuzzyTaskKind::AdditiveFuzzyNumbers),
        ("additive-membership", FuzzyTaskKind::AdditiveMembership),
        ("rule-inference", FuzzyTaskKind::RuleInference),
        ("mamdani", FuzzyTaskKind::RuleInference),
    ])
});

impl FuzzyTaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuzzyTaskKind::NonAdditive => "non-additive",
            FuzzyTaskKind::AdditiveFuzzyNumbers => "additive-fuzzy-numbers",
            FuzzyTaskKind::AdditiveMembership => "additive-membership",
            FuzzyTaskKind::RuleInference => "rule-inference",
        }
    }
}

impl fmt::Display for FuzzyTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FuzzyTaskKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&TASK_KINDS, "fuzzy task", s)
    }
}

/// Linguistic ratings of one alternative, criterion name to compliance label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRating {
    pub alternative: String,
    pub ratings: BTreeMap<String, String>,
}

/// A complete fuzzy evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "kebab-case")]
pub enum FuzzyTask {
    /// Degrees of belonging in [0, 1], criteria x alternatives.
    NonAdditive {
        belonging: DecisionMatrix,
        #[serde(default)]
        weights: CriterionWeights,
    },
    AdditiveFuzzyNumbers {
        belonging: DecisionMatrix,
        #[serde(default)]
        weights: CriterionWeights,
    },
    AdditiveMembership {
        compliance: LinguisticScale,
        importance: LinguisticScale,
        /// Criterion name to importance label.
        criterion_weights: BTreeMap<String, String>,
        ratings: Vec<AlternativeRating>,
        defuzzification: Defuzzification,
    },
    RuleInference {
        labels: LinguisticScale,
        /// Observed values, criteria x alternatives.
        observations: DecisionMatrix,
        rules: Vec<FuzzyRule>,
    },
}

impl FuzzyTask {
    pub fn kind(&self) -> FuzzyTaskKind {
        match self {
            FuzzyTask::NonAdditive { .. } => FuzzyTaskKind::NonAdditive,
            FuzzyTask::AdditiveFuzzyNumbers { .. } => FuzzyTaskKind::AdditiveFuzzyNumbers,
            FuzzyTask::AdditiveMembership { .. } => FuzzyTaskKind::AdditiveMembership,
            FuzzyTask::RuleInference { .. } => FuzzyTaskKind::RuleInference,
        }
    }
}

/// Per-task audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FuzzyTrace {
    /// `weighted[c][a]` and the per-alternative minimum.
    NonAdditive {
        weighted: Vec<Vec<f64>>,
        worst: Vec<f64>,
    },
    /// `weighted[c][a]` and the per-alternative weighted mean.
    AdditiveFuzzyNumbers {
        weighted: Vec<Vec<f64>>,
        averages: Vec<f64>,
    },
    AdditiveMembership {
        aggregates: Vec<TriangularFuzzyNumber>,
        defuzzification: Defuzzification,
    },
    RuleInference { inferences: Vec<Inference> },
}

/// Scores and winners of a fuzzy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyEvaluation {
    pub task: FuzzyTaskKind,
    pub alternatives: Vec<String>,
    pub scores: Vec<f64>,
    pub winners: Vec<String>,
    pub trace: FuzzyTrace,
}

/// Fuzzy evaluation methods.
pub struct FuzzyEvaluator;

impl FuzzyEvaluator {
    /// Evaluates `task` and returns the argmax alternatives of the crisp score.
    ///
    /// # Errors
    /// - `ValidationError` for degrees outside [0, 1], unknown labels or
    ///   criteria, or ratings that do not cover every weighted criterion
    /// - `NumericError` for zero total weight or non-converging integration
    pub fn evaluate(
        task: &FuzzyTask,
        settings: &NumericSettings,
    ) -> Result<FuzzyEvaluation, AnalysisError> {
        let (alternatives, scores, trace) = match task {
            FuzzyTask::NonAdditive { belonging, weights } => non_additive(belonging, weights)?,
            FuzzyTask::AdditiveFuzzyNumbers { belonging, weights } => {
                additive_fuzzy_numbers(belonging, weights)?
            }
            FuzzyTask::AdditiveMembership {
                compliance,
                importance,
                criterion_weights,
                ratings,
                defuzzification,
            } => additive_membership(
                compliance,
                importance,
                criterion_weights,
                ratings,
                *defuzzification,
                settings,
            )?,
            FuzzyTask::RuleInference {
                labels,
                observations,
                rules,
            } => rule_inference(labels, observations, rules, settings)?,
        };

        ensure_finite(&scores, task.kind().as_str())?;
        let winners: Vec<String> = argmax_set(&scores)
            .into_iter()
            .map(|i| alternatives[i].clone())
            .collect();
        debug!(task = %task.kind(), winners = ?winners, "fuzzy evaluation complete");

        Ok(FuzzyEvaluation {
            task: task.kind(),
            alternatives,
            scores,
            winners,
            trace,
        })
    }
}

type Scored = (Vec<String>, Vec<f64>, FuzzyTrace);

fn ensure_degrees(belonging: &DecisionMatrix) -> Result<(), ValidationError> {
    for (c, row) in belonging.rows().iter().enumerate() {
        if let Some(v) = row.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(ValidationError::out_of_range(
                format!("belonging '{}'", belonging.criteria()[c]),
                0.0,
                1.0,
                *v,
            ));
        }
    }
    Ok(())
}

fn weighted_rows<F>(belonging: &DecisionMatrix, weights: &[f64], op: F) -> Vec<Vec<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    belonging
        .rows()
        .iter()
        .zip(weights)
        .map(|(row, w)| row.iter().map(|v| op(*v, *w)).collect())
        .collect()
}

fn non_additive(belonging: &DecisionMatrix, weights: &CriterionWeights) -> Result<Scored, AnalysisError> {
    ensure_degrees(belonging)?;
    let w = weights.for_matrix(belonging)?;
    let weighted = weighted_rows(belonging, &w, f64::powf);
    let worst: Vec<f64> = (0..belonging.alternative_count())
        .map(|a| weighted.iter().map(|row| row[a]).fold(f64::INFINITY, f64::min))
        .collect();
    Ok((
        belonging.alternatives().to_vec(),
        worst.clone(),
        FuzzyTrace::NonAdditive { weighted, worst },
    ))
}

fn additive_fuzzy_numbers(
    belonging: &DecisionMatrix,
    weights: &CriterionWeights,
) -> Result<Scored, AnalysisError> {
    ensure_degrees(belonging)?;
    let w = weights.for_matrix(belonging)?;
    let total: f64 = w.iter().sum();
    if total == 0.0 {
        return Err(NumericError::zero_division("additive fuzzy numbers").into());
    }
    let weighted = weighted_rows(belonging, &w, |v, w| v * w);
    let averages: Vec<f64> = (0..belonging.alternative_count())
        .map(|a| weighted.iter().map(|row| row[a]).sum::<f64>() / total)
        .collect();
    Ok((
        belonging.alternatives().to_vec(),
        averages.clone(),
        FuzzyTrace::AdditiveFuzzyNumbers { weighted, averages },
    ))
}

fn additive_membership(
    compliance: &LinguisticScale,
    importance: &LinguisticScale,
    criterion_weights: &BTreeMap<String, String>,
    ratings: &[AlternativeRating],
    defuzzification: Defuzzification,
    settings: &NumericSettings,
) -> Result<Scored, AnalysisError> {
    if ratings.is_empty() {
        return Err(ValidationError::empty_field("ratings").into());
    }
    if criterion_weights.is_empty() {
        return Err(ValidationError::empty_field("criterion_weights").into());
    }

    let mut alternatives = Vec::with_capacity(ratings.len());
    let mut aggregates = Vec::with_capacity(ratings.len());
    for rating in ratings {
        if alternatives.contains(&rating.alternative) {
            return Err(ValidationError::duplicate_name("alternative", rating.alternative.clone()).into());
        }
        if let Some(extra) = rating.ratings.keys().find(|c| !criterion_weights.contains_key(*c)) {
            return Err(ValidationError::unknown_name("criterion", extra.clone()).into());
        }

        let mut total: Option<TriangularFuzzyNumber> = None;
        for (criterion, weight_label) in criterion_weights {
            let label = rating.ratings.get(criterion).ok_or_else(|| {
                ValidationError::unknown_name(
                    "rating",
                    format!("{}/{}", rating.alternative, criterion),
                )
            })?;
            let term = compliance.get(label)?.product(importance.get(weight_label)?)?;
            total = Some(match total {
                Some(sum) => sum + term,
                None => term,
            });
        }
        if let Some(total) = total {
            alternatives.push(rating.alternative.clone());
            aggregates.push(total);
        }
    }

    let scores = aggregates
        .iter()
        .map(|number| defuzzification.apply(number, settings))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((
        alternatives,
        scores,
        FuzzyTrace::AdditiveMembership {
            aggregates,
            defuzzification,
        },
    ))
}

fn rule_inference(
    labels: &LinguisticScale,
    observations: &DecisionMatrix,
    rules: &[FuzzyRule],
    settings: &NumericSettings,
) -> Result<Scored, AnalysisError> {
    validate_rules(rules, labels, observations)?;
    let inferences = (0..observations.alternative_count())
        .map(|a| infer(rules, labels, observations, a, settings))
        .collect::<Result<Vec<_>, _>>()?;
    let scores = inferences.iter().map(|i| i.score).collect();
    Ok((
        observations.alternatives().to_vec(),
        scores,
        FuzzyTrace::RuleInference { inferences },
    ))
}
