//! Criteria for states with no known probabilities.

use super::resolver::Intermediate;
use super::state_table::StateTable;
use crate::domain::foundation::numeric::{invert_against_max, max_of};

/// Wald: worst outcome per alternative.
pub fn wald(table: &StateTable) -> (Vec<f64>, Vec<Intermediate>) {
    (table.column_mins(), Vec::new())
}

/// Minimax regret (Savage): regret is the gap to the best alternative in the
/// same state; the largest regret per alternative is inverted so that the
/// smallest worst-case regret ranks highest.
pub fn minimax_regret(table: &StateTable) -> (Vec<f64>, Vec<Intermediate>) {
    let regret: Vec<Vec<f64>> = table
        .values()
        .iter()
        .map(|row| {
            let best = max_of(row);
            row.iter().map(|x| best - x).collect()
        })
        .collect();
    let worst: Vec<f64> = (0..table.alternative_count())
        .map(|alt| regret.iter().map(|r| r[alt]).fold(f64::NEG_INFINITY, f64::max))
        .collect();

    let intermediates = vec![
        Intermediate::new("regret", regret),
        Intermediate::row("max regret", worst.clone()),
    ];
    (invert_against_max(&worst), intermediates)
}
