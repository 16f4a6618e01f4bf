//! Rescaling of raw measure scores before they are combined.
//!
//! Relevance measures live on different scales (a rank correlation in
//! \[0, 1\], a value difference metric in \[0, 2\], ...). Combining them with a
//! weight vector only makes sense once they are brought onto a common scale.
//!
//! # Zero-width ranges
//!
//! Rescaling by `(x - min) / (max - min)` is undefined when `max <= min`: every
//! feature scored the same under value-based normalization, or the measure
//! declares a degenerate range. In that case every normalized score is `0.0`,
//! so the measure contributes nothing to the ensemble instead of poisoning it
//! with NaN.

use melif_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::measure::RelevanceMeasure;

/// How raw measure scores are rescaled.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Scores are used as the measure produced them.
    None,
    /// Each measure's scores are mapped onto \[0, 1\] using the observed min/max.
    #[default]
    ValueBased,
    /// Each measure's scores are mapped using the measure's declared bounds,
    /// so normalized scores stay comparable between calls and datasets.
    MeasureBased,
}

impl NormalizationMode {
    /// Rescales `scores` (produced by `measure`) in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use melif_evaluator::{measure::SpearmanRankCorrelation, normalization::NormalizationMode};
    ///
    /// let mut scores = vec![2.0, 4.0, 3.0];
    /// NormalizationMode::ValueBased.apply(&SpearmanRankCorrelation, &mut scores);
    /// assert_eq!(scores, vec![0.0, 1.0, 0.5]);
    /// ```
    pub fn apply<M>(self, measure: &M, scores: &mut [f64])
    where
        M: RelevanceMeasure + ?Sized,
    {
        match self {
            NormalizationMode::None => {}
            NormalizationMode::ValueBased => {
                if let Some(stats) = DescriptiveStats::new(scores.iter().copied()) {
                    rescale(scores, stats.min, stats.max);
                }
            }
            NormalizationMode::MeasureBased => {
                rescale(scores, measure.min_value(), measure.max_value());
            }
        }
    }
}

/// Maps `[min, max]` onto `[0, 1]`; a non-positive width maps everything to 0.
fn rescale(scores: &mut [f64], min: f64, max: f64) {
    let width = max - min;
    if width > 0.0 {
        for s in scores {
            *s = (*s - min) / width;
        }
    } else {
        scores.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::testing::FixedScores;

    #[test]
    fn test_none_leaves_scores() {
        let m = FixedScores::new("m", vec![]);
        let mut scores = vec![3.0, -1.0];
        NormalizationMode::None.apply(&m, &mut scores);
        assert_eq!(scores, vec![3.0, -1.0]);
    }

    #[test]
    fn test_value_based_uses_observed_range() {
        let m = FixedScores::new("m", vec![]);
        let mut scores = vec![2.0, 4.0, 3.0];
        NormalizationMode::ValueBased.apply(&m, &mut scores);
        assert_eq!(scores, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_value_based_zero_width_range() {
        let m = FixedScores::new("m", vec![]);
        let mut scores = vec![0.7, 0.7, 0.7];
        NormalizationMode::ValueBased.apply(&m, &mut scores);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_value_based_nan_score() {
        let m = FixedScores::new("m", vec![]);
        let mut scores = vec![0.1, f64::NAN, 0.3];
        NormalizationMode::ValueBased.apply(&m, &mut scores);
        // the observed range is undefined, so the measure contributes nothing
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_value_based_empty() {
        let m = FixedScores::new("m", vec![]);
        let mut scores: Vec<f64> = vec![];
        NormalizationMode::ValueBased.apply(&m, &mut scores);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_measure_based_uses_declared_range() {
        let mut m = FixedScores::new("m", vec![]);
        m.min = -1.0;
        m.max = 1.0;
        let mut scores = vec![0.0, 0.5];
        NormalizationMode::MeasureBased.apply(&m, &mut scores);
        // independent of the observed range
        assert_eq!(scores, vec![0.5, 0.75]);
    }

    #[test]
    fn test_measure_based_degenerate_declared_range() {
        let mut m = FixedScores::new("m", vec![]);
        m.min = 1.0;
        m.max = 1.0;
        let mut scores = vec![0.3, 2.0];
        NormalizationMode::MeasureBased.apply(&m, &mut scores);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "valuebased".parse::<NormalizationMode>().unwrap(),
            NormalizationMode::ValueBased
        );
        assert_eq!(
            "none".parse::<NormalizationMode>().unwrap(),
            NormalizationMode::None
        );
        assert_eq!(NormalizationMode::default(), NormalizationMode::ValueBased);
    }
}
