//! Ideal and anti-ideal point principles.

use super::metric::DistanceMetric;
use super::params::{per_criterion, SelectionParams};
use super::trace::SelectionTrace;
use crate::domain::foundation::numeric::{argmax_set, argmin_set, max_of, min_of};
use crate::domain::foundation::{DecisionMatrix, ValidationError};

/// Distances of every alternative to `reference`.
pub fn distances(
    matrix: &DecisionMatrix,
    weights: &[f64],
    reference: &[f64],
    metric: DistanceMetric,
) -> Vec<f64> {
    (0..matrix.alternative_count())
        .map(|alt| metric.distance(&matrix.column(alt), reference, weights))
        .collect()
}

/// Ideal point: per-criterion maximum unless supplied.
pub fn ideal_point(matrix: &DecisionMatrix, params: &SelectionParams) -> Result<Vec<f64>, ValidationError> {
    per_criterion(matrix, &params.ideal_point, "ideal point", max_of)
}

/// Anti-ideal point: per-criterion minimum unless supplied.
pub fn anti_ideal_point(
    matrix: &DecisionMatrix,
    params: &SelectionParams,
) -> Result<Vec<f64>, ValidationError> {
    per_criterion(matrix, &params.anti_ideal_point, "anti-ideal point", min_of)
}

/// Alternatives closest to the ideal point.
pub fn select_ideal(
    matrix: &DecisionMatrix,
    weights: &[f64],
    params: &SelectionParams,
) -> Result<(Vec<usize>, SelectionTrace), ValidationError> {
    let reference = ideal_point(matrix, params)?;
    let distances = distances(matrix, weights, &reference, params.metric);
    let winners = argmin_set(&distances);
    Ok((
        winners,
        SelectionTrace::ReferencePoint {
            reference,
            metric: params.metric,
            distances,
        },
    ))
}

/// Alternatives farthest from the anti-ideal point.
pub fn select_anti_ideal(
    matrix: &DecisionMatrix,
    weights: &[f64],
    params: &SelectionParams,
) -> Result<(Vec<usize>, SelectionTrace), ValidationError> {
    let reference = anti_ideal_point(matrix, params)?;
    let distances = distances(matrix, weights, &reference, params.metric);
    let winners = argmax_set(&distances);
    Ok((
        winners,
        SelectionTrace::ReferencePoint {
            reference,
            metric: params.metric,
            distances,
        },
    ))
}
