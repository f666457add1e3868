//! Main-criterion principle.

use std::collections::BTreeMap;

use super::trace::SelectionTrace;
use crate::domain::foundation::numeric::{argmax_set, is_close};
use crate::domain::foundation::{ConfigurationError, DecisionMatrix};

/// Index of the unique heaviest criterion.
///
/// # Errors
/// - `ConfigurationError::MainCriterionInapplicable` listing the tied criteria
///   when two or more share the maximum weight
pub fn main_criterion(matrix: &DecisionMatrix, weights: &[f64]) -> Result<usize, ConfigurationError> {
    let heaviest = argmax_set(weights);
    match heaviest.as_slice() {
        [single] => Ok(*single),
        tied => Err(ConfigurationError::MainCriterionInapplicable {
            tied: tied.iter().map(|&i| matrix.criteria()[i].clone()).collect(),
        }),
    }
}

/// Keeps alternatives meeting every other criterion's minimum, then takes the
/// argmax of the main criterion among them. A threshold on the main criterion
/// itself is ignored. Threshold names are checked against the matrix by the
/// selector.
pub fn select_main(
    matrix: &DecisionMatrix,
    weights: &[f64],
    thresholds: &BTreeMap<String, f64>,
) -> Result<(Vec<usize>, SelectionTrace), ConfigurationError> {
    let main = main_criterion(matrix, weights)?;
    let main_name = matrix.criteria()[main].clone();

    let restrictions: Vec<(usize, f64)> = thresholds
        .iter()
        .filter(|(name, _)| **name != main_name)
        .filter_map(|(name, t)| matrix.criterion_index(name).map(|i| (i, *t)))
        .collect();

    let survivors: Vec<usize> = (0..matrix.alternative_count())
        .filter(|&alt| {
            restrictions
                .iter()
                .all(|&(criterion, t)| matrix.value(criterion, alt) >= t)
        })
        .collect();

    let best = survivors
        .iter()
        .map(|&alt| matrix.value(main, alt))
        .fold(f64::NEG_INFINITY, f64::max);
    let winners = survivors
        .iter()
        .copied()
        .filter(|&alt| is_close(matrix.value(main, alt), best))
        .collect();

    let trace = SelectionTrace::MainCriterion {
        main: main_name,
        thresholds: thresholds.clone(),
        survivors: survivors
            .iter()
            .map(|&alt| matrix.alternatives()[alt].clone())
            .collect(),
    };
    Ok((winners, trace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("price", vec![9.0, 7.0, 8.0])
            .criterion("safety", vec![2.0, 6.0, 5.0])
            .build()
            .unwrap()
    }

    #[test]
    fn main_criterion_without_thresholds_is_plain_argmax() {
        let (winners, _) = select_main(&matrix(), &[2.0, 1.0], &BTreeMap::new()).unwrap();
        assert_eq!(winners, vec![0]);
    }

    #[test]
    fn thresholds_filter_before_argmax() {
        let thresholds = BTreeMap::from([("safety".to_string(), 5.0)]);
        let (winners, trace) = select_main(&matrix(), &[2.0, 1.0], &thresholds).unwrap();
        assert_eq!(winners, vec![2]);
        match trace {
            SelectionTrace::MainCriterion { main, survivors, .. } => {
                assert_eq!(main, "price");
                assert_eq!(survivors, vec!["B".to_string(), "C".to_string()]);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn threshold_on_main_criterion_is_ignored() {
        let thresholds = BTreeMap::from([("price".to_string(), 100.0)]);
        let (winners, _) = select_main(&matrix(), &[2.0, 1.0], &thresholds).unwrap();
        assert_eq!(winners, vec![0]);
    }

    #[test]
    fn no_survivors_gives_empty_winners() {
        let thresholds = BTreeMap::from([("safety".to_string(), 50.0)]);
        let (winners, _) = select_main(&matrix(), &[2.0, 1.0], &thresholds).unwrap();
        assert!(winners.is_empty());
    }

    #[test]
    fn tied_max_weight_is_reported_inapplicable() {
        let err = select_main(&matrix(), &[1.0, 1.0], &BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MainCriterionInapplicable {
                tied: vec!["price".to_string(), "safety".to_string()],
            }
        );
    }
}
