//! Ensemble evaluation and filtering of dataset features.
//!
//! This crate turns several independent relevance measures into a single
//! ensemble score per feature and selects feature subsets from the result.
//!
//! # Architecture
//!
//! ```text
//! Relevance measures (one raw score per feature)
//!     ↓ normalized by
//! NormalizationMode (none / observed range / declared range)
//!     ↓ combined by
//! DataSetEvaluator (weighted sum under a weight Point)
//!     ↓ consumed by
//! DataSetFilter (percent / preferred size / one-sigma cut)
//! ```
//!
//! - [`measure`] - The [`RelevanceMeasure`](measure::RelevanceMeasure) contract and bundled measures
//! - [`normalization`] - How raw measure scores are rescaled before combining
//! - [`evaluator`] - Per-measure scoring and weighted ensembling
//! - [`filter`] - Feature subset selection strategies
//!
//! # Example
//!
//! ```
//! use melif_dataset::{Feature, FeatureDataSet, Point};
//! use melif_evaluator::{
//!     evaluator::DataSetEvaluator,
//!     filter::{DataSetFilter, PreferredSizeFilter},
//!     measure::{SpearmanRankCorrelation, ValueDifferenceMetric, BoxedRelevanceMeasure},
//! };
//!
//! let dataset = FeatureDataSet::new(
//!     vec![
//!         Feature::new("informative", vec![0, 0, 1, 1]),
//!         Feature::new("noise", vec![1, 0, 1, 0]),
//!     ],
//!     vec![0, 0, 1, 1],
//!     "toy",
//! )?;
//! let measures: Vec<BoxedRelevanceMeasure> =
//!     vec![Box::new(SpearmanRankCorrelation), Box::new(ValueDifferenceMetric)];
//! let weights = Point::new(vec![0.5, 0.5]);
//!
//! let ranked = DataSetEvaluator::default().evaluate_features(&dataset, &weights, &measures)?;
//! assert_eq!(ranked.last().unwrap().feature.name(), "informative");
//!
//! let filtered = PreferredSizeFilter::new(1).filter_data_set(&dataset, &weights, &measures)?;
//! assert_eq!(filtered.feature_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod evaluator;
pub mod filter;
pub mod measure;
pub mod normalization;
