//! Weight-space sweeps over ensemble feature rankings.
//!
//! Given a dataset, a set of relevance measures and a path of weight vectors,
//! this crate characterizes how the top-`cut_size` feature subset changes as
//! the weighting moves along the path. It does not search for an optimal
//! weighting; the path is a fixed discretization chosen by the caller.
//!
//! # Pipeline
//!
//! ```text
//! WeightPath (simplex edge / semicircle)
//!     ↓ points
//! WeightSpaceSweeper (measures run once, weighted sum per point, in parallel)
//!     ↓ Sweep: per-point scores + top-cut_size index set
//! Front (always / sometimes / need-to-process, transitions, bottom front)
//!     ↓ feature trajectories
//! geometry (lines and their intersections, for features that move in and out)
//! ```
//!
//! # Example
//!
//! ```
//! use melif_dataset::{Feature, FeatureDataSet};
//! use melif_evaluator::measure::{BoxedRelevanceMeasure, SpearmanRankCorrelation, ValueDifferenceMetric};
//! use melif_sweep::{front::Front, path::WeightPath, sweeper::WeightSpaceSweeper};
//!
//! let dataset = FeatureDataSet::new(
//!     vec![
//!         Feature::new("a", vec![0, 0, 1, 1]),
//!         Feature::new("b", vec![0, 1, 1, 1]),
//!         Feature::new("c", vec![1, 0, 1, 0]),
//!     ],
//!     vec![0, 0, 1, 1],
//!     "toy",
//! )?;
//! let measures: Vec<BoxedRelevanceMeasure> =
//!     vec![Box::new(SpearmanRankCorrelation), Box::new(ValueDifferenceMetric)];
//!
//! let path = WeightPath::SimplexEdge { samples: 10 };
//! let sweep = WeightSpaceSweeper::default().sweep(&path.points(), &dataset, &measures, 1)?;
//! let front = Front::from_sweep(&sweep);
//!
//! assert_eq!(sweep.len(), 11);
//! assert!(front.always_in_cut().contains(&0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod front;
pub mod geometry;
pub mod path;
pub mod sweeper;
