//! Feature subset selection.
//!
//! Every filter ranks the features of a dataset with a [`DataSetEvaluator`]
//! (ascending ensemble score) and keeps a prefix of that ranking. They differ
//! only in how long the prefix is:
//!
//! - [`PercentFilter`] - `floor(n · percents / 100)` features
//! - [`PreferredSizeFilter`] - `min(preferred_size, n)` features
//! - [`WyrdCuttingRuleFilter`] - as many features as there are scores strictly
//!   within one standard deviation of the mean score
//!
//! The returned dataset keeps the original's labels and name; the original is
//! never modified.
//!
//! Filters are chosen from configuration through [`FilterKind`], which builds
//! a [`Filter`] that dispatches to the concrete strategy.

use std::str::FromStr;

use melif_dataset::{FeatureDataSet, Point};
use melif_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{
    evaluator::{DataSetEvaluator, EvaluateError, EvaluatedFeature},
    measure::RelevanceMeasure,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FilterError {
    #[display("percentage must be in 0..=100, got {percents}")]
    InvalidPercent { percents: u32 },
    #[display("unknown filter '{input}' (expected percent:N, preferred-size:N or wyrd)")]
    UnknownFilter { input: String },
}

/// Selects a subset of a dataset's features.
pub trait DataSetFilter {
    fn filter_data_set<M>(
        &self,
        original: &FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<FeatureDataSet, EvaluateError>
    where
        M: RelevanceMeasure;
}

fn take_prefix(
    original: &FeatureDataSet,
    ranked: &[EvaluatedFeature<'_>],
    len: usize,
) -> FeatureDataSet {
    let features = ranked[..len.min(ranked.len())]
        .iter()
        .map(|e| e.feature.clone())
        .collect();
    original.with_features(features)
}

/// Keeps the lowest-scoring `percents` percent of the features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentFilter {
    percents: u32,
    evaluator: DataSetEvaluator,
}

impl PercentFilter {
    /// Creates a filter keeping `percents` percent (rounded down) of the features.
    ///
    /// `0` is accepted and always yields an empty dataset.
    pub fn new(percents: u32) -> Result<Self, FilterError> {
        if percents > 100 {
            return Err(FilterError::InvalidPercent { percents });
        }
        Ok(Self {
            percents,
            evaluator: DataSetEvaluator::default(),
        })
    }

    #[must_use]
    pub fn with_evaluator(self, evaluator: DataSetEvaluator) -> Self {
        Self { evaluator, ..self }
    }

    #[must_use]
    pub fn percents(&self) -> u32 {
        self.percents
    }

    fn select_count(&self, evaluated: usize) -> usize {
        evaluated * self.percents as usize / 100
    }
}

impl DataSetFilter for PercentFilter {
    fn filter_data_set<M>(
        &self,
        original: &FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<FeatureDataSet, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        let ranked = self.evaluator.evaluate_features(original, weights, measures)?;
        Ok(take_prefix(original, &ranked, self.select_count(ranked.len())))
    }
}

/// Keeps the `preferred_size` lowest-scoring features (or all, if fewer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferredSizeFilter {
    preferred_size: usize,
    evaluator: DataSetEvaluator,
}

impl PreferredSizeFilter {
    #[must_use]
    pub fn new(preferred_size: usize) -> Self {
        log::debug!("initialized dataset filter with preferred size {preferred_size}");
        Self {
            preferred_size,
            evaluator: DataSetEvaluator::default(),
        }
    }

    #[must_use]
    pub fn with_evaluator(self, evaluator: DataSetEvaluator) -> Self {
        Self { evaluator, ..self }
    }

    #[must_use]
    pub fn preferred_size(&self) -> usize {
        self.preferred_size
    }
}

impl DataSetFilter for PreferredSizeFilter {
    fn filter_data_set<M>(
        &self,
        original: &FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<FeatureDataSet, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        let ranked = self.evaluator.evaluate_features(original, weights, measures)?;
        Ok(take_prefix(original, &ranked, self.preferred_size))
    }
}

/// One-sigma cutting rule.
///
/// Counts the ensemble scores lying strictly inside
/// `(mean - std_dev, mean + std_dev)` (population standard deviation), then
/// keeps that many features from the *start* of the ascending ranking.
///
/// The kept features are not necessarily the in-range ones: the count and
/// the prefix are two separate steps. Results published with this rule
/// depend on exactly this behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WyrdCuttingRuleFilter {
    evaluator: DataSetEvaluator,
}

impl WyrdCuttingRuleFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_evaluator(self, evaluator: DataSetEvaluator) -> Self {
        Self { evaluator }
    }

    /// Number of `scores` strictly within one standard deviation of their mean.
    #[must_use]
    pub fn count_in_range(scores: &[f64]) -> usize {
        let Some(stats) = DescriptiveStats::new(scores.iter().copied()) else {
            return 0;
        };
        scores
            .iter()
            .filter(|s| stats.within_one_std_dev(**s))
            .count()
    }
}

impl DataSetFilter for WyrdCuttingRuleFilter {
    fn filter_data_set<M>(
        &self,
        original: &FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<FeatureDataSet, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        let ranked = self.evaluator.evaluate_features(original, weights, measures)?;
        let scores = ranked.iter().map(|e| e.score).collect::<Vec<_>>();
        let in_range = Self::count_in_range(&scores);
        Ok(take_prefix(original, &ranked, in_range))
    }
}

/// Filter strategy as it appears in configuration.
///
/// ```
/// use melif_evaluator::filter::FilterKind;
///
/// let kind: FilterKind = serde_json::from_str(r#"{"kind":"percent","percents":30}"#).unwrap();
/// assert_eq!(kind, FilterKind::Percent { percents: 30 });
/// assert_eq!("preferred-size:5".parse::<FilterKind>().unwrap(), FilterKind::PreferredSize { preferred_size: 5 });
/// assert_eq!("wyrd".parse::<FilterKind>().unwrap(), FilterKind::WyrdCuttingRule);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    Percent { percents: u32 },
    PreferredSize { preferred_size: usize },
    WyrdCuttingRule,
}

impl FilterKind {
    /// Builds the configured filter, ranking features with `evaluator`.
    pub fn build(self, evaluator: DataSetEvaluator) -> Result<Filter, FilterError> {
        Ok(match self {
            FilterKind::Percent { percents } => {
                Filter::Percent(PercentFilter::new(percents)?.with_evaluator(evaluator))
            }
            FilterKind::PreferredSize { preferred_size } => Filter::PreferredSize(
                PreferredSizeFilter::new(preferred_size).with_evaluator(evaluator),
            ),
            FilterKind::WyrdCuttingRule => {
                Filter::WyrdCuttingRule(WyrdCuttingRuleFilter::new().with_evaluator(evaluator))
            }
        })
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FilterError::UnknownFilter { input: s.to_owned() };
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        match (name, arg) {
            ("percent", Some(arg)) => Ok(FilterKind::Percent {
                percents: arg.parse().map_err(|_| unknown())?,
            }),
            ("preferred-size" | "preferred_size", Some(arg)) => Ok(FilterKind::PreferredSize {
                preferred_size: arg.parse().map_err(|_| unknown())?,
            }),
            ("wyrd" | "wyrd-cutting-rule" | "wyrd_cutting_rule", None) => {
                Ok(FilterKind::WyrdCuttingRule)
            }
            _ => Err(unknown()),
        }
    }
}

/// A filter built from a [`FilterKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Filter {
    Percent(PercentFilter),
    PreferredSize(PreferredSizeFilter),
    WyrdCuttingRule(WyrdCuttingRuleFilter),
}

impl DataSetFilter for Filter {
    fn filter_data_set<M>(
        &self,
        original: &FeatureDataSet,
        weights: &Point,
        measures: &[M],
    ) -> Result<FeatureDataSet, EvaluateError>
    where
        M: RelevanceMeasure,
    {
        match self {
            Filter::Percent(f) => f.filter_data_set(original, weights, measures),
            Filter::PreferredSize(f) => f.filter_data_set(original, weights, measures),
            Filter::WyrdCuttingRule(f) => f.filter_data_set(original, weights, measures),
        }
    }
}
