//! Fractional ranking.

/// Assigns 1-based ranks to `values`, giving tied values the average of the
/// ranks they span.
///
/// The output is parallel to the input: `ranks[i]` is the rank of `values[i]`.
///
/// # Examples
///
/// ```
/// use melif_stats::rank::average_ranks;
///
/// assert_eq!(average_ranks(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
/// assert_eq!(average_ranks(&[5.0, 5.0, 5.0]), vec![2.0, 2.0, 2.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end (0-based) share ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(average_ranks(&[]).is_empty());
    }

    #[test]
    fn test_ties_in_the_middle() {
        let ranks = average_ranks(&[0.5, 0.1, 0.5, 0.9, 0.5]);
        assert_eq!(ranks, vec![3.0, 1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn test_rank_sum_is_preserved() {
        let values = [4.0, 4.0, 1.0, 7.0, 7.0, 7.0];
        let sum: f64 = average_ranks(&values).iter().sum();
        assert!((sum - 21.0).abs() < 1e-12);
    }
}
