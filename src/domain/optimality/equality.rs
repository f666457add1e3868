//! Equality and quasi-equality principles.
//!
//! An alternative is optimal when its weighted criterion values are all equal
//! to each other, exactly (up to float noise) or within the tolerance the
//! deviation table grants for each criterion pair.

use super::trace::SelectionTrace;
use crate::domain::foundation::numeric::is_close_with;
use crate::domain::foundation::DecisionMatrix;

/// Criteria x alternatives table of `weight * value`.
pub fn weighted_values(matrix: &DecisionMatrix, weights: &[f64]) -> Vec<Vec<f64>> {
    matrix
        .rows()
        .iter()
        .zip(weights)
        .map(|(row, w)| row.iter().map(|x| x * w).collect())
        .collect()
}

/// Alternatives whose weighted values agree pairwise within `tolerances[i][j]`.
pub fn select_within(
    matrix: &DecisionMatrix,
    weights: &[f64],
    tolerances: Vec<Vec<f64>>,
) -> (Vec<usize>, SelectionTrace) {
    let weighted = weighted_values(matrix, weights);
    let n = matrix.criterion_count();

    let winners = (0..matrix.alternative_count())
        .filter(|&alt| {
            (0..n).all(|i| {
                (0..n).all(|j| is_close_with(weighted[i][alt], weighted[j][alt], tolerances[i][j]))
            })
        })
        .collect();

    (
        winners,
        SelectionTrace::Equality {
            weighted,
            tolerances,
        },
    )
}

/// Strict equality.
pub fn select_equal(matrix: &DecisionMatrix, weights: &[f64]) -> (Vec<usize>, SelectionTrace) {
    let n = matrix.criterion_count();
    select_within(matrix, weights, vec![vec![0.0; n]; n])
}
