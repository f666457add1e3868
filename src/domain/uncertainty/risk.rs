//! Risk-attitude criteria and the universal criterion.

use super::resolver::Intermediate;
use super::state_table::StateTable;

/// Hurwicz: `(1 - alpha) * best + alpha * worst` per alternative.
pub fn hurwicz(table: &StateTable, alpha: f64) -> (Vec<f64>, Vec<Intermediate>) {
    let row = table
        .column_maxes()
        .iter()
        .zip(table.column_mins())
        .map(|(best, worst)| (1.0 - alpha) * best + alpha * worst)
        .collect();
    (row, Vec::new())
}

/// Hodges-Lehmann: `beta * expectation + (1 - beta) * worst` per alternative.
pub fn hodges_lehmann(
    table: &StateTable,
    probabilities: &[f64],
    beta: f64,
) -> (Vec<f64>, Vec<Intermediate>) {
    let expectation = table.expectation(probabilities);
    let worst = table.column_mins();
    let row = expectation
        .iter()
        .zip(&worst)
        .map(|(e, w)| beta * e + (1.0 - beta) * w)
        .collect();

    let intermediates = vec![
        Intermediate::row("expectation", expectation),
        Intermediate::row("worst outcome", worst),
    ];
    (row, intermediates)
}

/// Coefficients of the universal criterion after regime defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniversalCoefficients {
    pub alpha: f64,
    pub additional_param: f64,
    pub trust_level: f64,
}

/// Universal criterion: `(1 - tau) * (E - k * sigma) + tau * Hurwicz`.
///
/// Without probabilities only the Hurwicz term remains.
pub fn universal(
    table: &StateTable,
    probabilities: Option<&[f64]>,
    coefficients: UniversalCoefficients,
) -> (Vec<f64>, Vec<Intermediate>) {
    let (hurwicz_row, _) = hurwicz(table, coefficients.alpha);
    let Some(probabilities) = probabilities else {
        return (hurwicz_row.clone(), vec![Intermediate::row("hurwicz", hurwicz_row)]);
    };

    let expectation = table.expectation(probabilities);
    let sigma = table.deviation(probabilities, &expectation);
    let deviation_criterion: Vec<f64> = expectation
        .iter()
        .zip(&sigma)
        .map(|(e, s)| e - coefficients.additional_param * s)
        .collect();

    let tau = coefficients.trust_level;
    let row = deviation_criterion
        .iter()
        .zip(&hurwicz_row)
        .map(|(d, h)| (1.0 - tau) * d + tau * h)
        .collect();

    let intermediates = vec![
        Intermediate::row("expectation", expectation),
        Intermediate::row("deviation", sigma),
        Intermediate::row("deviation criterion", deviation_criterion),
        Intermediate::row("hurwicz", hurwicz_row),
    ];
    (row, intermediates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StateTable {
        StateTable::builder("profit")
            .alternatives(vec!["A", "B"])
            .state("s1", vec![1.0, 9.0])
            .state("s2", vec![8.0, 2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn hurwicz_alpha_zero_is_column_max() {
        let (row, _) = hurwicz(&table(), 0.0);
        assert_eq!(row, vec![8.0, 9.0]);
    }

    #[test]
    fn hurwicz_alpha_one_is_column_min() {
        let (row, _) = hurwicz(&table(), 1.0);
        assert_eq!(row, vec![1.0, 2.0]);
    }

    #[test]
    fn hurwicz_blends_extremes() {
        let (row, _) = hurwicz(&table(), 0.5);
        assert_eq!(row, vec![4.5, 5.5]);
    }

    #[test]
    fn hodges_lehmann_blends_expectation_and_worst() {
        let (row, _) = hodges_lehmann(&table(), &[0.5, 0.5], 0.5);
        // expectation [4.5, 5.5], worst [1, 2]
        assert_eq!(row, vec![2.75, 3.75]);
    }

    #[test]
    fn universal_without_probabilities_is_hurwicz() {
        let coefficients = UniversalCoefficients {
            alpha: 0.25,
            additional_param: 0.7,
            trust_level: 0.1,
        };
        let (row, _) = universal(&table(), None, coefficients);
        let (expected, _) = hurwicz(&table(), 0.25);
        assert_eq!(row, expected);
    }

    #[test]
    fn universal_with_zero_trust_is_deviation_criterion() {
        let coefficients = UniversalCoefficients {
            alpha: 0.0,
            additional_param: 1.0,
            trust_level: 0.0,
        };
        let (row, _) = universal(&table(), Some(&[0.5, 0.5]), coefficients);
        // sigma is 3.5 for both
        assert_eq!(row, vec![1.0, 2.0]);
    }

    #[test]
    fn universal_with_full_trust_is_hurwicz() {
        let coefficients = UniversalCoefficients {
            alpha: 0.5,
            additional_param: 1.0,
            trust_level: 1.0,
        };
        let (row, _) = universal(&table(), Some(&[0.5, 0.5]), coefficients);
        assert_eq!(row, vec![4.5, 5.5]);
    }
}
