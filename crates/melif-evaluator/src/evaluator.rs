//! Ensemble scoring of dataset features.
//!
//! Evaluation is split in two stages so that sweeps over many weight vectors
//! do not re-run the measures:
//!
//! 1. [`DataSetEvaluator::evaluate_measures`] runs every measure once and
//!    normalizes its output, producing a [`MeasureScores`] matrix. This is the
//!    expensive, weight-independent part.
//! 2. [`MeasureScores::combine`] computes the ensemble score of every feature
//!    for one weight vector: `score[i] = Σₘ weight[m] · normalized[m][i]`.
//!
//! [`DataSetEvaluator::evaluate_features`] chains both stages for a single
//! weight vector and pairs every feature with its score, sorted ascending.

use std::iter;

use melif_dataset::{Feature, FeatureDataSet, Point};

use crate::{measure::RelevanceMeasure, normalization::NormalizationMode};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvaluateError {
    #[display("weight vector has {weights} coordinates but {measures} measures were given")]
    DimensionMismatch { weights: usize, measures: usize },
    #[display("measure '{measure}' returned {actual} scores for {expected} features")]
    ScoreCountMismatch {
        measure: String,
        expected: usize,
        actual: usize,
    },
}

/// Fails unless `weights` has exactly one coordinate per measure.
pub fn check_dimension(weights: &Point, measure_count: usize) -> Result<(), EvaluateError> {
    if weights.dimension() == measure_count {
        Ok(())
    } else {
        Err(EvaluateError::DimensionMismatch {
            weights: weights.dimension(),
            measures: measure_count,
        })
    }
}

/// A feature paired with its ensemble score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedFeature<'a> {
    /// Position of the feature in the evaluated dataset.
    pub index: usize,
    pub feature: &'a Feature,
    pub score: f64,
}

/// Normalized scores of every measure for every feature.
///
/// Row `m` holds measure `m`'s scores, in feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureScores {
    feature_count: usize,
    scores: Vec<Vec<f64>>,
}

impl MeasureScores {
    /// Wraps precomputed per-measure score rows.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have `feature_count` entries.
    #[must_use]
    pub fn new(feature_count: usize, scores: Vec<Vec<f64>>) -> Self {
        assert!(scores.iter().all(|row| row.len() == feature_count));
        Self {
            feature_count,
            scores,
        }
    }

    #[must_use]
    pub fn measure_count(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Scores of measure `measure` for all features.
    #[must_use]
    pub fn measure(&self, measure: usize) -> &[f64] {
        &self.scores[measure]
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.scores
    }

    /// Computes the ensemble score of every feature under `weights`.
    ///
    /// # Examples
    ///
    /// ```
    /// use melif_dataset::Point;
    /// use melif_evaluator::evaluator::MeasureScores;
    ///
    /// let scores = MeasureScores::new(2, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    /// let ensemble = scores.combine(&Point::new(vec![0.25, 0.75])).unwrap();
    /// assert_eq!(ensemble, vec![0.25, 0.75]);
    /// assert!(scores.combine(&Point::new(vec![1.0])).is_err());
    /// ```
    pub fn combine(&self, weights: &Point) -> Result<Vec<f64>, EvaluateError> {
        check_dimension(weights, self.measure_count())?;
        let mut ensemble = vec![0.0; self.feature_count];
        for (row, w) in iter::zip(&self.scores, weights.coordinates()) {
            for (acc, s) in iter::zip(&mut ensemble, row) {
                *acc += w * s;
            }
        }
        Ok(ensemble)
    }
}

/// Scores features with a set of relevance measures.
///
/// The normalization mode is fixed at construction; the default is
/// [`NormalizationMode::ValueBased`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DataSetEvaluator {
    normalization: NormalizationMode,
}

impl DataSetEvaluator {
    #[must_use]
    pub fn new(normalization: NormalizationMode) -> Self {
        Self { normalization }
    }

    #[must_use]
    pub fn normalization(&self) -> NormalizationMode {
        self.normalization
    }

    /// Runs every measure over `dataset` and normalizes each measure's scores.
    ///
    /// Measure order is preserved. With no measures the result has zero rows.
    pub fn evaluate_measures<M>(
        &self,
        dataset: &FeatureDataSet,
        measures: &[M],
    ) -> Result<MeasureScores, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        let feature_count = dataset.feature_count();
        let scores = measures
            .iter()
            .map(|m| {
                let mut scores = m.evaluate(dataset);
                if scores.len() != feature_count {
                    return Err(EvaluateError::ScoreCountMismatch {
                        measure: m.name().to_owned(),
                        expected: feature_count,
                        actual: scores.len(),
                    });
                }
                self.normalization.apply(m, &mut scores);
                log::debug!(
                    "measure '{}' scored {} features ({:?} normalization)",
                    m.name(),
                    feature_count,
                    self.normalization,
                );
                Ok(scores)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MeasureScores {
            feature_count,
            scores,
        })
    }

    /// Scores every feature of `dataset` under `weights`, sorted ascending by score.
    ///
    /// Ties keep the original feature order. The dimension check happens
    /// before any measure runs.
    pub fn evaluate_features<'a, M>(
        &self,
        dataset: &'a FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<Vec<EvaluatedFeature<'a>>, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        check_dimension(weights, measures.len())?;
        let ensemble = self.evaluate_measures(dataset, measures)?.combine(weights)?;
        Ok(rank_ascending(dataset, &ensemble))
    }
}

/// Pairs each feature with its score and sorts ascending (stable).
#[must_use]
pub fn rank_ascending<'a>(
    dataset: &'a FeatureDataSet,
    scores: &[f64],
) -> Vec<EvaluatedFeature<'a>> {
    let mut evaluated = iter::zip(dataset.features(), scores)
        .enumerate()
        .map(|(index, (feature, &score))| EvaluatedFeature {
            index,
            feature,
            score,
        })
        .collect::<Vec<_>>();
    evaluated.sort_by(|a, b| a.score.total_cmp(&b.score));
    evaluated
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::measure::testing::{FixedScores, blank_dataset};

    fn scenario_measures() -> Vec<FixedScores> {
        vec![
            FixedScores::new("a", vec![0.1, 0.4, 0.9, 0.2]),
            FixedScores::new("b", vec![0.3, 0.3, 0.1, 0.8]),
        ]
    }

    #[test]
    fn test_scenario_without_normalization() {
        let ds = blank_dataset(4);
        let evaluator = DataSetEvaluator::new(NormalizationMode::None);
        let ranked = evaluator
            .evaluate_features(&ds, &Point::new(vec![0.5, 0.5]), &scenario_measures())
            .unwrap();

        let indices = ranked.iter().map(|e| e.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        let expected = [0.2, 0.35, 0.5, 0.5];
        for (e, want) in ranked.iter().zip(expected) {
            assert!((e.score - want).abs() < 1e-12, "{} != {want}", e.score);
        }
        assert_eq!(ranked[3].feature.name(), "f3");
    }

    #[test]
    fn test_sorted_and_complete() {
        let ds = blank_dataset(4);
        for weights in [vec![1.0, 0.0], vec![0.0, 1.0], vec![0.3, 0.7]] {
            let ranked = DataSetEvaluator::default()
                .evaluate_features(&ds, &Point::new(weights), &scenario_measures())
                .unwrap();
            assert_eq!(ranked.len(), 4);
            assert!(ranked.is_sorted_by(|a, b| a.score <= b.score));
        }
    }

    #[test]
    fn test_value_based_normalization_is_default() {
        let ds = blank_dataset(4);
        let ranked = DataSetEvaluator::default()
            .evaluate_features(&ds, &Point::new(vec![1.0, 0.0]), &scenario_measures())
            .unwrap();
        assert_eq!(ranked.first().unwrap().score, 0.0);
        assert_eq!(ranked.last().unwrap().score, 1.0);
    }

    #[derive(Debug)]
    struct CountingMeasure<'a>(&'a AtomicUsize);

    impl RelevanceMeasure for CountingMeasure<'_> {
        fn name(&self) -> &str {
            "counting"
        }

        fn evaluate(&self, dataset: &FeatureDataSet) -> Vec<f64> {
            self.0.fetch_add(1, Ordering::SeqCst);
            vec![0.0; dataset.feature_count()]
        }

        fn min_value(&self) -> f64 {
            0.0
        }

        fn max_value(&self) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_dimension_mismatch_fails_before_scoring() {
        let calls = AtomicUsize::new(0);
        let measures = [CountingMeasure(&calls), CountingMeasure(&calls)];
        let err = DataSetEvaluator::default()
            .evaluate_features(&blank_dataset(3), &Point::new(vec![1.0]), &measures)
            .unwrap_err();
        assert_eq!(
            err,
            EvaluateError::DimensionMismatch {
                weights: 1,
                measures: 2
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wrong_score_count() {
        let measures = [FixedScores::new("short", vec![0.1])];
        let err = DataSetEvaluator::default()
            .evaluate_measures(&blank_dataset(2), &measures)
            .unwrap_err();
        assert!(matches!(err, EvaluateError::ScoreCountMismatch { actual: 1, .. }));
    }

    #[test]
    fn test_empty_inputs() {
        let no_measures: [FixedScores; 0] = [];
        let ds = blank_dataset(3);
        let ranked = DataSetEvaluator::default()
            .evaluate_features(&ds, &Point::new(vec![]), &no_measures)
            .unwrap();
        // every feature scores 0 with no measures
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|e| e.score == 0.0));

        let measures = [FixedScores::new("m", vec![])];
        let empty = blank_dataset(0);
        let ranked = DataSetEvaluator::default()
            .evaluate_features(&empty, &Point::new(vec![1.0]), &measures)
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_evaluate_measures_exposes_normalized_rows() {
        let scores = DataSetEvaluator::default()
            .evaluate_measures(&blank_dataset(4), &scenario_measures())
            .unwrap();
        assert_eq!(scores.measure_count(), 2);
        assert_eq!(scores.feature_count(), 4);
        let expected = [2.0 / 7.0, 2.0 / 7.0, 0.0, 1.0];
        for (got, want) in scores.measure(1).iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }
}
