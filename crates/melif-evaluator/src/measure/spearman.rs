use melif_dataset::FeatureDataSet;
use melif_stats::rank::average_ranks;

use super::RelevanceMeasure;

/// Absolute Spearman rank correlation between a feature and the class label.
///
/// Ties receive average ranks. A feature (or label vector) with no variation
/// scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpearmanRankCorrelation;

impl RelevanceMeasure for SpearmanRankCorrelation {
    fn name(&self) -> &str {
        "spearman"
    }

    fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64> {
        let class_ranks = average_ranks(&to_f64(dataset.classes()));
        dataset
            .features()
            .iter()
            .map(|f| pearson(&average_ranks(&to_f64(f.values())), &class_ranks).abs())
            .collect()
    }

    fn min_value(&self) -> f64 {
        0.0
    }

    fn max_value(&self) -> f64 {
        1.0
    }
}

fn to_f64(values: &[i32]) -> Vec<f64> {
    values.iter().copied().map(f64::from).collect()
}

#[expect(clippy::cast_precision_loss)]
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return 0.0;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use melif_dataset::Feature;

    use super::*;

    fn dataset(features: Vec<Vec<i32>>, classes: Vec<i32>) -> FeatureDataSet {
        let features = features
            .into_iter()
            .enumerate()
            .map(|(i, v)| Feature::new(format!("f{i}"), v))
            .collect();
        FeatureDataSet::new(features, classes, "test").unwrap()
    }

    #[test]
    fn test_perfect_and_inverse_correlation() {
        let ds = dataset(
            vec![vec![1, 2, 3, 4], vec![4, 3, 2, 1], vec![7, 7, 7, 7]],
            vec![0, 0, 1, 1],
        );
        let scores = SpearmanRankCorrelation.evaluate(&ds);
        // monotone in either direction ranks the same; a constant column is irrelevant
        assert!((scores[0] - scores[1]).abs() < 1e-12);
        assert!(scores[0] > 0.8);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_uncorrelated_feature() {
        let ds = dataset(vec![vec![1, 0, 1, 0]], vec![0, 0, 1, 1]);
        let scores = SpearmanRankCorrelation.evaluate(&ds);
        assert!(scores[0].abs() < 1e-12);
    }

    #[test]
    fn test_scores_within_declared_bounds() {
        let ds = dataset(
            vec![vec![3, 1, 2, 5, 4], vec![0, 0, 1, 1, 1], vec![2, 2, 1, 9, 2]],
            vec![0, 1, 0, 1, 1],
        );
        let m = SpearmanRankCorrelation;
        for s in m.evaluate(&ds) {
            assert!((m.min_value()..=m.max_value()).contains(&s));
        }
    }

    #[test]
    fn test_no_samples() {
        let ds = dataset(vec![vec![]], vec![]);
        assert_eq!(SpearmanRankCorrelation.evaluate(&ds), vec![0.0]);
    }
}
