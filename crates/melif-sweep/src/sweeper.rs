//! Evaluation of the ensemble ranking at every point of a weight path.
//!
//! # Cost
//!
//! The measures are the expensive part and do not depend on the weights, so
//! they run exactly once per sweep ([`DataSetEvaluator::evaluate_measures`]).
//! Each sweep point then only costs a weighted sum over the score matrix and
//! one sort: `O(features × measures + features · log features)`.
//!
//! # Parallelization
//!
//! Points are independent of each other. They are split into contiguous
//! chunks, one scoped thread per chunk, sharing the read-only score matrix.
//! Results are concatenated in chunk order, so the output order always
//! matches the input order regardless of which worker finishes first.
//!
//! # Cut ordering
//!
//! A point's cut lists the `cut_size` highest-scoring features, best first.
//! Ties are broken by feature index (lower first), so sweeps are reproducible.
//! The last entry of a cut is its *marginal* feature.

use std::{num::NonZeroUsize, panic, thread};

use melif_dataset::{FeatureDataSet, Point};
use melif_evaluator::{
    evaluator::{DataSetEvaluator, EvaluateError, MeasureScores, check_dimension},
    measure::RelevanceMeasure,
};

/// The ensemble ranking at a single weight vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub weights: Point,
    /// Ensemble score of every feature, in feature order.
    pub scores: Vec<f64>,
    /// Indices of the top `cut_size` features, highest score first.
    pub cut: Vec<usize>,
}

impl SweepPoint {
    /// Combines `scores` under `weights` and takes the top `cut_size` features.
    pub fn evaluate(
        scores: &MeasureScores,
        weights: &Point,
        cut_size: usize,
    ) -> Result<Self, EvaluateError> {
        let ensemble = scores.combine(weights)?;
        let cut = top_features(&ensemble, cut_size);
        Ok(Self {
            weights: weights.clone(),
            scores: ensemble,
            cut,
        })
    }

    /// The lowest-ranked feature still inside the cut.
    #[must_use]
    pub fn marginal_feature(&self) -> Option<usize> {
        self.cut.last().copied()
    }

    /// Ensemble score of the marginal feature.
    #[must_use]
    pub fn marginal_score(&self) -> Option<f64> {
        self.marginal_feature().map(|i| self.scores[i])
    }
}

/// Indices of the `cut_size` highest `scores`, highest first, ties by index.
///
/// ```
/// use melif_sweep::sweeper::top_features;
///
/// assert_eq!(top_features(&[0.2, 0.9, 0.5, 0.9], 3), vec![1, 3, 2]);
/// assert_eq!(top_features(&[0.2], 5), vec![0]);
/// ```
#[must_use]
pub fn top_features(scores: &[f64], cut_size: usize) -> Vec<usize> {
    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(cut_size);
    order
}

/// Result of a sweep: one [`SweepPoint`] per weight vector, in path order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    cut_size: usize,
    points: Vec<SweepPoint>,
}

impl Sweep {
    #[must_use]
    pub fn new(cut_size: usize, points: Vec<SweepPoint>) -> Self {
        Self { cut_size, points }
    }

    #[must_use]
    pub fn cut_size(&self) -> usize {
        self.cut_size
    }

    #[must_use]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Score of the marginal feature at every point (the cutting line).
    ///
    /// Entries are `None` where the cut is empty.
    #[must_use]
    pub fn cutting_line(&self) -> Vec<Option<f64>> {
        self.points.iter().map(SweepPoint::marginal_score).collect()
    }

    /// Ensemble score of feature `feature` at every point.
    #[must_use]
    pub fn feature_trajectory(&self, feature: usize) -> Vec<f64> {
        self.points.iter().map(|p| p.scores[feature]).collect()
    }
}

/// Drives a [`DataSetEvaluator`] along a sequence of weight vectors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WeightSpaceSweeper {
    evaluator: DataSetEvaluator,
    threads: Option<NonZeroUsize>,
}

impl WeightSpaceSweeper {
    #[must_use]
    pub fn new(evaluator: DataSetEvaluator) -> Self {
        Self {
            evaluator,
            threads: None,
        }
    }

    /// Limits the number of worker threads (default: available parallelism).
    #[must_use]
    pub fn with_threads(self, threads: NonZeroUsize) -> Self {
        Self {
            threads: Some(threads),
            ..self
        }
    }

    /// Sweeps `points`, keeping the top `cut_size` features at each one.
    ///
    /// Every point is checked against the measure count before any measure
    /// runs. An empty `points` yields an empty sweep.
    pub fn sweep<M>(
        &self,
        points: &[Point],
        dataset: &FeatureDataSet,
        measures: &[M],
        cut_size: usize,
    ) -> Result<Sweep, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        for p in points {
            check_dimension(p, measures.len())?;
        }
        if points.is_empty() {
            return Ok(Sweep::new(cut_size, vec![]));
        }
        let scores = self.evaluator.evaluate_measures(dataset, measures)?;
        self.sweep_scores(points, &scores, cut_size)
    }

    /// Sweeps `points` over an already evaluated score matrix.
    pub fn sweep_scores(
        &self,
        points: &[Point],
        scores: &MeasureScores,
        cut_size: usize,
    ) -> Result<Sweep, EvaluateError> {
        for p in points {
            check_dimension(p, scores.measure_count())?;
        }
        if points.is_empty() {
            return Ok(Sweep::new(cut_size, vec![]));
        }

        let workers = self
            .threads
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
            .min(points.len());
        let chunk_size = points.len().div_ceil(workers);
        log::debug!(
            "sweeping {} points over {} features ({} measures) with {} workers",
            points.len(),
            scores.feature_count(),
            scores.measure_count(),
            workers,
        );

        let chunks = thread::scope(|s| {
            let handles = points
                .chunks(chunk_size)
                .map(|chunk| {
                    s.spawn(move || {
                        chunk
                            .iter()
                            .map(|p| SweepPoint::evaluate(scores, p, cut_size))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Vec<_>>()
        });

        let mut sweep_points = Vec::with_capacity(points.len());
        for chunk in chunks {
            sweep_points.extend(chunk?);
        }
        Ok(Sweep::new(cut_size, sweep_points))
    }
}
