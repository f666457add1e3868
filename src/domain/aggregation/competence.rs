//! Competence fixed points - iterative expert weighting.
//!
//! Both iterations start from uniform weights and recompute the consensus row
//! from the current weights on every step. They stop once no weight moves by
//! more than the convergence epsilon, or when the iteration ceiling is reached
//! (reported through `CompetenceTrace::converged`).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::method::{EvlanovKutuzovParams, RykovMode, RykovParams};
use super::panel::ExpertPanel;
use crate::domain::foundation::numeric::ensure_finite;
use crate::domain::foundation::{AnalysisError, NumericError, ValidationError};

/// Weight history of one fixed-point run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetenceTrace {
    /// Weight vector at the start of every iteration, followed by the final vector.
    pub history: Vec<Vec<f64>>,
    pub iterations: usize,
    pub converged: bool,
}

impl CompetenceTrace {
    /// Final competence weights.
    pub fn final_weights(&self) -> &[f64] {
        self.history.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Runs the Evlanov-Kutuzov iteration.
///
/// `K_e <- sum_alt(x_alt * raw_e,alt) / lambda` where `x` is the current
/// weighted consensus and `lambda = sum_e sum_alt(x_alt * raw_e,alt)`.
///
/// # Errors
/// - `ValidationError::OutOfRange` for a non-positive epsilon
///
/// A vanishing lambda (an all-zero panel) leaves the current weights in
/// place and ends the run as converged.
pub fn evlanov_kutuzov(
    panel: &ExpertPanel,
    params: &EvlanovKutuzovParams,
) -> Result<CompetenceTrace, AnalysisError> {
    require_positive("evlanov_kutuzov.epsilon", params.epsilon)?;

    run_fixed_point(
        panel,
        "evlanov-kutuzov",
        params.epsilon,
        params.max_iterations,
        |weights| {
            let consensus = panel.weighted_row(weights);
            let support: Vec<f64> = panel
                .scores()
                .iter()
                .map(|row| row.iter().zip(&consensus).map(|(raw, x)| raw * x).sum())
                .collect();
            let lambda: f64 = support.iter().sum();
            if lambda == 0.0 {
                debug!(criterion = panel.criterion(), "zero support, keeping current weights");
                return Ok(weights.to_vec());
            }
            Ok(support.into_iter().map(|s| s / lambda).collect())
        },
    )
}

/// Runs Rykov's iteration.
///
/// `delta_e = 1 / (||x - raw_e||_p + epsilon)`, then `K_e * delta_e` or
/// `K_e + delta_e` depending on the mode, renormalized to sum 1.
///
/// # Errors
/// - `ValidationError::OutOfRange` for `p < 1` or non-positive epsilons
/// - `NumericError::ZeroDivision` if the updated weights sum to zero
pub fn rykov(panel: &ExpertPanel, params: &RykovParams) -> Result<CompetenceTrace, AnalysisError> {
    if params.p < 1.0 || !params.p.is_finite() {
        return Err(ValidationError::out_of_range("rykov.p", 1.0, f64::INFINITY, params.p).into());
    }
    require_positive("rykov.epsilon", params.epsilon)?;
    require_positive("rykov.convergence_epsilon", params.convergence_epsilon)?;

    run_fixed_point(
        panel,
        "rykov",
        params.convergence_epsilon,
        params.max_iterations,
        |weights| {
            let consensus = panel.weighted_row(weights);
            let updated: Vec<f64> = panel
                .scores()
                .iter()
                .zip(weights)
                .map(|(row, weight)| {
                    let distance = row
                        .iter()
                        .zip(&consensus)
                        .map(|(raw, x)| (x - raw).abs().powf(params.p))
                        .sum::<f64>()
                        .powf(1.0 / params.p);
                    let delta = 1.0 / (distance + params.epsilon);
                    match params.mode {
                        RykovMode::Multiplicative => weight * delta,
                        RykovMode::Additive => weight + delta,
                    }
                })
                .collect();
            let total: f64 = updated.iter().sum();
            if total == 0.0 {
                return Err(NumericError::zero_division("rykov renormalization").into());
            }
            Ok(updated.into_iter().map(|w| w / total).collect())
        },
    )
}

fn run_fixed_point<F>(
    panel: &ExpertPanel,
    method: &str,
    epsilon: f64,
    max_iterations: usize,
    mut step: F,
) -> Result<CompetenceTrace, AnalysisError>
where
    F: FnMut(&[f64]) -> Result<Vec<f64>, AnalysisError>,
{
    let n = panel.expert_count();
    let mut weights = vec![1.0 / n as f64; n];
    let mut history = Vec::new();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        history.push(weights.clone());
        let next = step(&weights)?;
        ensure_finite(&next, method)?;
        iterations += 1;

        let max_delta = weights
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        weights = next;

        if max_delta < epsilon {
            converged = true;
            break;
        }
    }
    history.push(weights);

    if converged {
        debug!(criterion = panel.criterion(), method, iterations, "competence weights converged");
    } else {
        warn!(
            criterion = panel.criterion(),
            method,
            max_iterations,
            "competence weights did not converge within the iteration ceiling"
        );
    }

    Ok(CompetenceTrace {
        history,
        iterations,
        converged,
    })
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0.0, f64::INFINITY, value))
    }
}
