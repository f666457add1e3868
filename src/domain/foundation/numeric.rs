//! Numeric helpers shared by every analysis module.
//!
//! Ties between alternatives are detected with a relative tolerance so that
//! values produced by different arithmetic paths still compare equal.

use super::NumericError;

/// Values whose magnitude falls below `row_max * FLOOR_FACTOR` are lifted to that floor.
pub const FLOOR_FACTOR: f64 = 1e-4;

/// Offset used when a normalization divisor would otherwise be zero.
pub const DEGENERATE_OFFSET: f64 = 1e-6;

/// Relative tolerance used for tie detection.
pub const REL_TOLERANCE: f64 = 1e-9;

/// Float comparison with relative tolerance only.
pub fn is_close(a: f64, b: f64) -> bool {
    is_close_with(a, b, 0.0)
}

/// Float comparison with relative tolerance and an absolute tolerance floor.
pub fn is_close_with(a: f64, b: f64, abs_tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (REL_TOLERANCE * a.abs().max(b.abs())).max(abs_tolerance)
}

/// Maximum of a slice. Returns `f64::NEG_INFINITY` for an empty slice.
pub fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Minimum of a slice. Returns `f64::INFINITY` for an empty slice.
pub fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Indices of every value tied with the maximum.
pub fn argmax_set(values: &[f64]) -> Vec<usize> {
    let best = max_of(values);
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| is_close(v, best))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of every value tied with the minimum.
pub fn argmin_set(values: &[f64]) -> Vec<usize> {
    let best = min_of(values);
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| is_close(v, best))
        .map(|(i, _)| i)
        .collect()
}

/// `max(values) - value` for every entry, turning a "smaller is better" row around.
pub fn invert_against_max(values: &[f64]) -> Vec<f64> {
    let max = max_of(values);
    values.iter().map(|v| max - v).collect()
}

/// Fails with `NumericError::NonFinite` if any value is NaN or infinite.
pub fn ensure_finite(values: &[f64], operation: &str) -> Result<(), NumericError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(NumericError::non_finite(operation))
    }
}
