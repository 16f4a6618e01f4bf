//! Relevance measures: per-feature scores of association with the class label.
//!
//! A measure looks at a whole [`FeatureDataSet`] and returns one score per
//! feature, in feature order. Measures also declare the theoretical range of
//! their scores, which [`NormalizationMode::MeasureBased`] uses to rescale
//! scores comparably across datasets.
//!
//! Bundled measures:
//!
//! - [`SpearmanRankCorrelation`] - absolute rank correlation with the label
//! - [`ValueDifferenceMetric`] - mean class-conditional distance between
//!   values of samples from different classes
//!
//! [`NormalizationMode::MeasureBased`]: crate::normalization::NormalizationMode::MeasureBased

use std::fmt;

use melif_dataset::FeatureDataSet;
use serde::{Deserialize, Serialize};

pub use self::{spearman::SpearmanRankCorrelation, vdm::ValueDifferenceMetric};

mod spearman;
mod vdm;

/// Scores every feature of a dataset.
///
/// Implementations must be pure functions of the dataset and must return
/// exactly `dataset.feature_count()` scores.
pub trait RelevanceMeasure: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    #[must_use]
    fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64>;

    /// Lowest score this measure can produce.
    fn min_value(&self) -> f64;

    /// Highest score this measure can produce.
    fn max_value(&self) -> f64;
}

pub type BoxedRelevanceMeasure = Box<dyn RelevanceMeasure>;

impl<T> RelevanceMeasure for Box<T>
where
    T: RelevanceMeasure + ?Sized,
{
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64> {
        self.as_ref().evaluate(dataset)
    }

    fn min_value(&self) -> f64 {
        self.as_ref().min_value()
    }

    fn max_value(&self) -> f64 {
        self.as_ref().max_value()
    }
}

impl<T> RelevanceMeasure for &T
where
    T: RelevanceMeasure + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64> {
        (**self).evaluate(dataset)
    }

    fn min_value(&self) -> f64 {
        (**self).min_value()
    }

    fn max_value(&self) -> f64 {
        (**self).max_value()
    }
}

/// Names of the bundled measures, for selecting them from configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    Spearman,
    Vdm,
}

impl MeasureKind {
    #[must_use]
    pub fn build(self) -> BoxedRelevanceMeasure {
        match self {
            MeasureKind::Spearman => Box::new(SpearmanRankCorrelation),
            MeasureKind::Vdm => Box::new(ValueDifferenceMetric),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A measure returning fixed scores, ignoring the dataset.
    #[derive(Debug, Clone)]
    pub(crate) struct FixedScores {
        pub name: &'static str,
        pub scores: Vec<f64>,
        pub min: f64,
        pub max: f64,
    }

    impl FixedScores {
        pub(crate) fn new(name: &'static str, scores: Vec<f64>) -> Self {
            Self {
                name,
                scores,
                min: 0.0,
                max: 1.0,
            }
        }
    }

    impl RelevanceMeasure for FixedScores {
        fn name(&self) -> &str {
            self.name
        }

        fn evaluate(&self, _dataset: &FeatureDataSet) -> Vec<f64> {
            self.scores.clone()
        }

        fn min_value(&self) -> f64 {
            self.min
        }

        fn max_value(&self) -> f64 {
            self.max
        }
    }

    /// A dataset with `n` features and two samples; values are irrelevant.
    pub(crate) fn blank_dataset(n: usize) -> FeatureDataSet {
        let features = (0..n)
            .map(|i| melif_dataset::Feature::new(format!("f{i}"), vec![0, 1]))
            .collect();
        FeatureDataSet::new(features, vec![0, 1], "blank").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_kind_from_str() {
        assert_eq!("spearman".parse::<MeasureKind>().unwrap(), MeasureKind::Spearman);
        assert_eq!("vdm".parse::<MeasureKind>().unwrap(), MeasureKind::Vdm);
        assert!("relief".parse::<MeasureKind>().is_err());
    }

    #[test]
    fn test_build_names() {
        assert_eq!(MeasureKind::Spearman.build().name(), "spearman");
        assert_eq!(MeasureKind::Vdm.build().name(), "vdm");
    }
}
