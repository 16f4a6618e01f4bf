use std::collections::BTreeMap;

use melif_dataset::FeatureDataSet;

use super::RelevanceMeasure;

/// Value Difference Metric relevance.
///
/// For two feature values `a` and `b` the class-conditional distance is
/// `δ(a, b) = Σ_c |P(c | a) − P(c | b)|`. A feature's relevance is the mean of
/// `δ` over all pairs of samples that carry different labels: a feature whose
/// values separate the classes cleanly scores 2, one whose values say nothing
/// about the class scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueDifferenceMetric;

impl RelevanceMeasure for ValueDifferenceMetric {
    fn name(&self) -> &str {
        "vdm"
    }

    fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64> {
        let classes = dataset.classes();
        let class_ids = classes
            .iter()
            .copied()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        dataset
            .features()
            .iter()
            .map(|f| feature_vdm(f.values(), classes, &class_ids))
            .collect()
    }

    fn min_value(&self) -> f64 {
        0.0
    }

    fn max_value(&self) -> f64 {
        2.0
    }
}

#[expect(clippy::cast_precision_loss)]
fn feature_vdm(values: &[i32], classes: &[i32], class_ids: &[i32]) -> f64 {
    // (value, class) -> number of samples
    let mut cells = BTreeMap::<(i32, i32), usize>::new();
    let mut value_counts = BTreeMap::<i32, usize>::new();
    for (&v, &c) in values.iter().zip(classes) {
        *cells.entry((v, c)).or_default() += 1;
        *value_counts.entry(v).or_default() += 1;
    }

    let conditional = value_counts
        .iter()
        .map(|(&v, &n)| {
            let dist = class_ids
                .iter()
                .map(|&c| cells.get(&(v, c)).copied().unwrap_or(0) as f64 / n as f64)
                .collect::<Vec<_>>();
            (v, dist)
        })
        .collect::<BTreeMap<_, _>>();
    let delta = |a: i32, b: i32| -> f64 {
        let (pa, pb) = (&conditional[&a], &conditional[&b]);
        pa.iter().zip(pb).map(|(x, y)| (x - y).abs()).sum()
    };

    let cells = cells.into_iter().collect::<Vec<_>>();
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, &((va, ca), na)) in cells.iter().enumerate() {
        for &((vb, cb), nb) in &cells[i + 1..] {
            if ca == cb {
                continue;
            }
            let count = na * nb;
            pairs += count;
            total += count as f64 * delta(va, vb);
        }
    }

    if pairs == 0 { 0.0 } else { total / pairs as f64 }
}
