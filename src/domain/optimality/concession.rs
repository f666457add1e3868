//! Absolute and relative concession principles.

use super::trace::SelectionTrace;
use crate::domain::foundation::numeric::{argmax_set, ensure_finite};
use crate::domain::foundation::{DecisionMatrix, NumericError};

/// Weighted sum per alternative.
pub fn weighted_sums(matrix: &DecisionMatrix, weights: &[f64]) -> Vec<f64> {
    (0..matrix.alternative_count())
        .map(|alt| {
            matrix
                .rows()
                .iter()
                .zip(weights)
                .map(|(row, w)| row[alt] * w)
                .sum()
        })
        .collect()
}

/// Weighted product `prod(value^weight)` per alternative.
///
/// # Errors
/// - `NumericError::NonFinite` when a product is NaN or infinite, e.g. a
///   negative value raised to a fractional weight
pub fn weighted_products(matrix: &DecisionMatrix, weights: &[f64]) -> Result<Vec<f64>, NumericError> {
    let products: Vec<f64> = (0..matrix.alternative_count())
        .map(|alt| {
            matrix
                .rows()
                .iter()
                .zip(weights)
                .map(|(row, w)| row[alt].powf(*w))
                .product()
        })
        .collect();
    ensure_finite(&products, "relative concession")?;
    Ok(products)
}

/// Argmax of the weighted sum.
pub fn select_absolute(matrix: &DecisionMatrix, weights: &[f64]) -> (Vec<usize>, SelectionTrace) {
    let scores = weighted_sums(matrix, weights);
    (argmax_set(&scores), SelectionTrace::Concession { scores })
}

/// Argmax of the weighted product.
///
/// A negative value under a fractional weight has no real power, so the
/// product is NaN. Hermeyer resolution and negation produce such rows as a
/// matter of course. Callers treat the resulting `NumericError::NonFinite` as
/// "this principle does not apply to this matrix"; the consensus records it as
/// an inapplicable verdict.
///
/// # Errors
/// - `NumericError::NonFinite` when any product is NaN or infinite
pub fn select_relative(
    matrix: &DecisionMatrix,
    weights: &[f64],
) -> Result<(Vec<usize>, SelectionTrace), NumericError> {
    let scores = weighted_products(matrix, weights)?;
    Ok((argmax_set(&scores), SelectionTrace::Concession { scores }))
}
