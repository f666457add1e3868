//! Criteria for states with known probabilities.

use super::params::MseBaseline;
use super::resolver::Intermediate;
use super::state_table::StateTable;
use crate::domain::foundation::numeric::{invert_against_max, is_close, max_of, DEGENERATE_OFFSET, FLOOR_FACTOR};
use crate::domain::foundation::NumericError;

/// Bayes-Laplace: probability-weighted expectation.
pub fn bayes_laplace(table: &StateTable, probabilities: &[f64]) -> (Vec<f64>, Vec<Intermediate>) {
    (table.expectation(probabilities), Vec::new())
}

/// Min-MSE: weighted root-mean-square distance of each alternative's outcomes
/// from a common baseline, inverted so that smaller spread ranks higher.
pub fn min_mse(
    table: &StateTable,
    probabilities: &[f64],
    baseline: MseBaseline,
) -> (Vec<f64>, Vec<Intermediate>) {
    let expectation = table.expectation(probabilities);
    let reference = match baseline {
        MseBaseline::Continuous => max_of(&expectation),
        MseBaseline::Discrete => expectation.iter().sum::<f64>() / expectation.len() as f64,
    };

    let squared: Vec<Vec<f64>> = table
        .values()
        .iter()
        .map(|row| row.iter().map(|x| (x - reference).powi(2)).collect())
        .collect();
    let deviation: Vec<f64> = (0..table.alternative_count())
        .map(|alt| {
            squared
                .iter()
                .zip(probabilities)
                .map(|(row, p)| p * row[alt])
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    let intermediates = vec![
        Intermediate::row("expectation", expectation),
        Intermediate::scalar("baseline", reference),
        Intermediate::new("squared differences", squared),
        Intermediate::row("deviation", deviation.clone()),
    ];
    (invert_against_max(&deviation), intermediates)
}

/// Max-probability: total probability of the states where the outcome
/// reaches `threshold`.
pub fn max_probability(
    table: &StateTable,
    probabilities: &[f64],
    threshold: f64,
) -> (Vec<f64>, Vec<Intermediate>) {
    let qualifying: Vec<Vec<f64>> = table
        .values()
        .iter()
        .zip(probabilities)
        .map(|(row, p)| row.iter().map(|x| if *x >= threshold { *p } else { 0.0 }).collect())
        .collect();
    let row = (0..table.alternative_count())
        .map(|alt| qualifying.iter().map(|r| r[alt]).sum())
        .collect();

    (row, vec![Intermediate::new("qualifying probability", qualifying)])
}

/// Modal: mean outcome over the most probable state(s).
pub fn modal(table: &StateTable, probabilities: &[f64]) -> (Vec<f64>, Vec<Intermediate>) {
    let top = max_of(probabilities);
    let modal_states: Vec<usize> = probabilities
        .iter()
        .enumerate()
        .filter(|(_, p)| is_close(**p, top))
        .map(|(i, _)| i)
        .collect();
    let count = modal_states.len() as f64;

    let row = (0..table.alternative_count())
        .map(|alt| {
            modal_states
                .iter()
                .map(|&state| table.values()[state][alt])
                .sum::<f64>()
                / count
        })
        .collect();

    let indices = modal_states.iter().map(|&i| i as f64).collect();
    (row, vec![Intermediate::row("modal states", indices)])
}

/// Min-entropy: Shannon entropy of each alternative's probability-weighted
/// outcome distribution, inverted so that the most concentrated ranks highest.
///
/// Tables with non-positive values are first reflected through
/// `(max + eps) - x` so every weight is positive.
///
/// # Errors
/// - `NumericError::ZeroDivision` if an alternative's weighted outcomes sum to zero
pub fn min_entropy(
    table: &StateTable,
    probabilities: &[f64],
) -> Result<(Vec<f64>, Vec<Intermediate>), NumericError> {
    let all_positive = table.values().iter().flatten().all(|v| *v > 0.0);
    let adjusted = if all_positive {
        table.values().to_vec()
    } else {
        let pivot = table.max_value() + offset(table.max_value());
        table
            .values()
            .iter()
            .map(|row| row.iter().map(|x| pivot - x).collect())
            .collect()
    };

    let mut entropy = Vec::with_capacity(table.alternative_count());
    for alt in 0..table.alternative_count() {
        let weighted: Vec<f64> = adjusted
            .iter()
            .zip(probabilities)
            .map(|(row, p)| p * row[alt])
            .collect();
        let total: f64 = weighted.iter().sum();
        if total == 0.0 {
            return Err(NumericError::zero_division("min-entropy weighting"));
        }
        let h: f64 = weighted
            .iter()
            .map(|w| w / total)
            .filter(|w| *w > 0.0)
            .map(|w| -w * w.log2())
            .sum();
        entropy.push(h);
    }

    let intermediates = vec![
        Intermediate::new("adjusted outcomes", adjusted),
        Intermediate::row("entropy", entropy.clone()),
    ];
    Ok((invert_against_max(&entropy), intermediates))
}

/// Hermeyer: smallest probability-weighted outcome. Tables that are not
/// entirely negative are first shifted through `x - (max + eps)`.
pub fn hermeyer(table: &StateTable, probabilities: &[f64]) -> (Vec<f64>, Vec<Intermediate>) {
    let all_negative = table.values().iter().flatten().all(|v| *v < 0.0);
    let pivot = table.max_value() + offset(table.max_value());

    let weighted: Vec<Vec<f64>> = table
        .values()
        .iter()
        .zip(probabilities)
        .map(|(row, p)| {
            row.iter()
                .map(|x| if all_negative { p * x } else { p * (x - pivot) })
                .collect()
        })
        .collect();
    let row = (0..table.alternative_count())
        .map(|alt| weighted.iter().map(|r| r[alt]).fold(f64::INFINITY, f64::min))
        .collect();

    (row, vec![Intermediate::new("weighted outcomes", weighted)])
}

fn offset(max: f64) -> f64 {
    let eps = max.abs() * FLOOR_FACTOR;
    if eps == 0.0 {
        DEGENERATE_OFFSET
    } else {
        eps
    }
}
