//! Direction change - turns minimization criteria into the maximize convention.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::numeric::max_of;
use crate::domain::foundation::{
    resolve_identifier, AnalysisError, ConfigurationError, DecisionMatrix, ValidationError,
};

/// How a criterion is flipped before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum DirectionChange {
    /// Keep values as they are.
    #[default]
    None,
    /// Multiply every value by -1.
    Negation,
    /// Subtract every value from `max`, or from the largest value when absent.
    Savage {
        #[serde(default)]
        max: Option<f64>,
    },
}

static DIRECTION_CHANGES: Lazy<HashMap<&'static str, DirectionChange>> = Lazy::new(|| {
    HashMap::from([
        ("none", DirectionChange::None),
        ("negation", DirectionChange::Negation),
        ("savage", DirectionChange::Savage { max: None }),
    ])
});

impl DirectionChange {
    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionChange::None => "none",
            DirectionChange::Negation => "negation",
            DirectionChange::Savage { .. } => "savage",
        }
    }
}

impl fmt::Display for DirectionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DirectionChange {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&DIRECTION_CHANGES, "direction change", s)
    }
}

/// Direction change per criterion name. Criteria not listed keep their direction.
pub type DirectionPlan = BTreeMap<String, DirectionChange>;

/// Applies direction changes to rows, whole matrices and state blocks.
pub struct DirectionChanger;

impl DirectionChanger {
    /// Flips one block of values (a criterion row or a whole state table).
    ///
    /// # Edge Cases
    /// - Savage without an explicit maximum uses the largest value in the block
    /// - Empty block: returns an empty Vec
    pub fn apply(values: &[f64], change: DirectionChange) -> Vec<f64> {
        match change {
            DirectionChange::None => values.to_vec(),
            DirectionChange::Negation => values.iter().map(|v| -v).collect(),
            DirectionChange::Savage { max } => {
                let reference = max.unwrap_or_else(|| max_of(values));
                values.iter().map(|v| reference - v).collect()
            }
        }
    }

    /// Returns a new matrix with every planned criterion flipped.
    ///
    /// # Errors
    /// - `ValidationError::UnknownName` if the plan names a criterion the matrix lacks
    pub fn change_direction(
        matrix: &DecisionMatrix,
        plan: &DirectionPlan,
    ) -> Result<DecisionMatrix, AnalysisError> {
        ensure_plan_covers(matrix, plan.keys())?;

        matrix.try_map_rows(|criterion, row| {
            let change = plan.get(criterion).copied().unwrap_or_default();
            Ok(Self::apply(row, change))
        })
    }
}

pub(crate) fn ensure_plan_covers<'a>(
    matrix: &DecisionMatrix,
    planned: impl Iterator<Item = &'a String>,
) -> Result<(), ValidationError> {
    for criterion in planned {
        if matrix.criterion_index(criterion).is_none() {
            return Err(ValidationError::unknown_name("criterion", criterion.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("cost", vec![10.0, 20.0, 30.0])
            .criterion("quality", vec![3.0, 2.0, 1.0])
            .build()
            .unwrap()
    }

    #[test]
    fn negation_flips_sign() {
        assert_eq!(
            DirectionChanger::apply(&[1.0, -2.0], DirectionChange::Negation),
            vec![-1.0, 2.0]
        );
    }

    #[test]
    fn savage_uses_row_max_by_default() {
        assert_eq!(
            DirectionChanger::apply(&[10.0, 20.0, 30.0], DirectionChange::Savage { max: None }),
            vec![20.0, 10.0, 0.0]
        );
    }

    #[test]
    fn savage_uses_supplied_max() {
        assert_eq!(
            DirectionChanger::apply(&[10.0, 20.0], DirectionChange::Savage { max: Some(100.0) }),
            vec![90.0, 80.0]
        );
    }

    #[test]
    fn change_direction_only_touches_planned_rows() {
        let plan = DirectionPlan::from([("cost".to_string(), DirectionChange::Negation)]);
        let original = matrix();
        let changed = DirectionChanger::change_direction(&original, &plan).unwrap();

        assert_eq!(changed.row(0), &[-10.0, -20.0, -30.0]);
        assert_eq!(changed.row(1), &[3.0, 2.0, 1.0]);
        assert_eq!(original.row(0), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn change_direction_rejects_unknown_criterion() {
        let plan = DirectionPlan::from([("speed".to_string(), DirectionChange::Negation)]);
        let result = DirectionChanger::change_direction(&matrix(), &plan);
        assert!(matches!(
            result,
            Err(AnalysisError::Validation(ValidationError::UnknownName { .. }))
        ));
    }

    #[test]
    fn direction_change_parses_identifiers() {
        assert_eq!("Negation".parse::<DirectionChange>().unwrap(), DirectionChange::Negation);
        assert_eq!(
            "savage".parse::<DirectionChange>().unwrap(),
            DirectionChange::Savage { max: None }
        );
        assert!("invert".parse::<DirectionChange>().is_err());
    }

    #[test]
    fn direction_change_deserializes_tagged() {
        let change: DirectionChange =
            serde_json::from_str(r#"{"method":"savage","max":50.0}"#).unwrap();
        assert_eq!(change, DirectionChange::Savage { max: Some(50.0) });
    }
}
