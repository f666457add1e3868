//! Lexicographic equality and quasi-equality principles.

use std::collections::BTreeMap;

use super::trace::{LexStep, SelectionTrace};
use crate::domain::foundation::numeric::is_close_with;
use crate::domain::foundation::DecisionMatrix;

/// Criterion indices by descending weight; equal weights keep matrix order.
pub fn priority_order(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
    order
}

/// Filters alternatives criterion by criterion in priority order, keeping
/// those within `tolerance(criterion)` of the best survivor, until one
/// remains or the criteria run out.
pub fn select_lexicographic<F>(
    matrix: &DecisionMatrix,
    weights: &[f64],
    tolerance: F,
) -> (Vec<usize>, SelectionTrace)
where
    F: Fn(&str) -> f64,
{
    let order = priority_order(weights);
    let mut survivors: Vec<usize> = (0..matrix.alternative_count()).collect();
    let mut steps = Vec::new();

    for &criterion in &order {
        let name = &matrix.criteria()[criterion];
        let threshold = tolerance(name);
        let best = survivors
            .iter()
            .map(|&alt| matrix.value(criterion, alt))
            .fold(f64::NEG_INFINITY, f64::max);
        survivors.retain(|&alt| is_close_with(matrix.value(criterion, alt), best, threshold));

        steps.push(LexStep {
            criterion: name.clone(),
            survivors: survivors
                .iter()
                .map(|&alt| matrix.alternatives()[alt].clone())
                .collect(),
        });
        if survivors.len() == 1 {
            break;
        }
    }

    let trace = SelectionTrace::Lexicographic {
        order: order.iter().map(|&i| matrix.criteria()[i].clone()).collect(),
        steps,
    };
    (survivors, trace)
}

/// Strict lexicographic equality.
pub fn select_lex_equal(matrix: &DecisionMatrix, weights: &[f64]) -> (Vec<usize>, SelectionTrace) {
    select_lexicographic(matrix, weights, |_| 0.0)
}

/// Lexicographic quasi-equality; criteria without a threshold use 0.
/// Threshold names are checked against the matrix by the selector.
pub fn select_lex_quasi_equal(
    matrix: &DecisionMatrix,
    weights: &[f64],
    thresholds: &BTreeMap<String, f64>,
) -> (Vec<usize>, SelectionTrace) {
    select_lexicographic(matrix, weights, |name| {
        thresholds.get(name).copied().unwrap_or(0.0)
    })
}
