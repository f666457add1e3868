//! Pareto principle - the non-dominated front.

use std::collections::BTreeMap;

use super::trace::SelectionTrace;
use crate::domain::foundation::DecisionMatrix;

/// `first` dominates `second` when it is at least as good on every criterion
/// and strictly better on one.
pub fn dominates(first: &[f64], second: &[f64]) -> bool {
    first.iter().zip(second).all(|(a, b)| a >= b) && first.iter().zip(second).any(|(a, b)| a > b)
}

/// Non-dominated alternatives, with the dominance map and weighted sums of the front.
pub fn select_pareto(matrix: &DecisionMatrix, weights: &[f64]) -> (Vec<usize>, SelectionTrace) {
    let columns: Vec<Vec<f64>> = (0..matrix.alternative_count())
        .map(|alt| matrix.column(alt))
        .collect();

    let mut front = Vec::new();
    let mut dominated_by = BTreeMap::new();
    for (i, candidate) in columns.iter().enumerate() {
        let dominators: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && dominates(other, candidate))
            .map(|(j, _)| matrix.alternatives()[j].clone())
            .collect();
        if dominators.is_empty() {
            front.push(i);
        } else {
            dominated_by.insert(matrix.alternatives()[i].clone(), dominators);
        }
    }

    let front_weighted_sums = front
        .iter()
        .map(|&i| {
            let sum = columns[i].iter().zip(weights).map(|(x, w)| x * w).sum();
            (matrix.alternatives()[i].clone(), sum)
        })
        .collect();

    (
        front,
        SelectionTrace::Pareto {
            dominated_by,
            front_weighted_sums,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_requires_one_strict_improvement() {
        assert!(dominates(&[2.0, 2.0], &[2.0, 1.0]));
        assert!(!dominates(&[2.0, 2.0], &[2.0, 2.0]));
        assert!(!dominates(&[3.0, 1.0], &[2.0, 2.0]));
    }

    #[test]
    fn trade_offs_all_stay_on_front() {
        let matrix = DecisionMatrix::builder()
            .alternatives(vec!["A1", "A2", "A3"])
            .criterion("c1", vec![10.0, 20.0, 30.0])
            .criterion("c2", vec![30.0, 20.0, 10.0])
            .build()
            .unwrap();
        let (front, trace) = select_pareto(&matrix, &[1.0, 1.0]);
        assert_eq!(front, vec![0, 1, 2]);
        match trace {
            SelectionTrace::Pareto {
                dominated_by,
                front_weighted_sums,
            } => {
                assert!(dominated_by.is_empty());
                assert_eq!(front_weighted_sums["A2"], 40.0);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn dominated_alternative_is_mapped_to_its_dominators() {
        let matrix = DecisionMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("c1", vec![5.0, 4.0, 1.0])
            .criterion("c2", vec![5.0, 6.0, 1.0])
            .build()
            .unwrap();
        let (front, trace) = select_pareto(&matrix, &[1.0, 1.0]);
        assert_eq!(front, vec![0, 1]);
        match trace {
            SelectionTrace::Pareto { dominated_by, .. } => {
                assert_eq!(dominated_by["C"], vec!["A".to_string(), "B".to_string()]);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn identical_alternatives_do_not_dominate_each_other() {
        let matrix = DecisionMatrix::builder()
            .alternatives(vec!["A", "B"])
            .criterion("c1", vec![1.0, 1.0])
            .build()
            .unwrap();
        let (front, _) = select_pareto(&matrix, &[1.0]);
        assert_eq!(front, vec![0, 1]);
    }
}
