//! Kendall's coefficient of concordance across a panel of experts.

use super::panel::ExpertPanel;
use crate::domain::foundation::numeric::is_close;

/// Converts scores into ranks, rank 1 being the highest score.
/// Tied scores share the mean of the ranks they occupy.
pub fn to_ranks(scores: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && is_close(scores[order[end]], scores[order[start]]) {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = shared;
        }
        start = end;
    }
    ranks
}

/// Kendall's W = 12 S / (n^2 (m^3 - m)), clamped to [0, 1].
///
/// `n` is the number of experts, `m` the number of alternatives and `S` the
/// sum of squared deviations of per-alternative rank sums from their mean.
/// A panel with fewer than two experts or alternatives is fully concordant.
pub fn kendall_concordance(panel: &ExpertPanel) -> f64 {
    let n = panel.expert_count();
    let m = panel.alternative_count();
    if n < 2 || m < 2 {
        return 1.0;
    }

    let mut rank_sums = vec![0.0; m];
    for row in panel.scores() {
        for (sum, rank) in rank_sums.iter_mut().zip(to_ranks(row)) {
            *sum += rank;
        }
    }
    let mean = rank_sums.iter().sum::<f64>() / m as f64;
    let s: f64 = rank_sums.iter().map(|r| (r - mean).powi(2)).sum();

    let (n, m) = (n as f64, m as f64);
    let w = 12.0 * s / (n * n * (m.powi(3) - m));
    w.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descend_from_highest_score() {
        assert_eq!(to_ranks(&[10.0, 30.0, 20.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn tied_scores_share_mean_rank() {
        assert_eq!(to_ranks(&[5.0, 5.0, 1.0]), vec![1.5, 1.5, 3.0]);
        assert_eq!(to_ranks(&[2.0, 2.0, 2.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn identical_rankings_are_fully_concordant() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B", "C"])
            .expert("E1", vec![1.0, 2.0, 3.0])
            .expert("E2", vec![10.0, 20.0, 30.0])
            .expert("E3", vec![0.1, 0.2, 0.3])
            .build()
            .unwrap();
        assert!((kendall_concordance(&panel) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_rankings_have_zero_concordance() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B", "C"])
            .expert("E1", vec![1.0, 2.0, 3.0])
            .expert("E2", vec![3.0, 2.0, 1.0])
            .build()
            .unwrap();
        assert!(kendall_concordance(&panel).abs() < 1e-12);
    }

    #[test]
    fn single_expert_is_fully_concordant() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B"])
            .expert("E1", vec![1.0, 2.0])
            .build()
            .unwrap();
        assert_eq!(kendall_concordance(&panel), 1.0);
    }

    #[test]
    fn concordance_stays_within_unit_interval() {
        let panel = ExpertPanel::builder("quality")
            .alternatives(vec!["A", "B", "C", "D"])
            .expert("E1", vec![4.0, 3.0, 2.0, 1.0])
            .expert("E2", vec![4.0, 2.0, 3.0, 1.0])
            .expert("E3", vec![1.0, 4.0, 2.0, 3.0])
            .build()
            .unwrap();
        let w = kendall_concordance(&panel);
        assert!((0.0..=1.0).contains(&w));
    }
}
