//! Core data types for ensemble feature selection.
//!
//! - [`Feature`]: a named column of discretized values, one per sample
//! - [`FeatureDataSet`]: an ordered list of features plus class labels; a
//!   feature's position in the list is its identity throughout the pipeline
//! - [`Point`]: a weight vector with one coordinate per relevance measure

pub use self::{dataset::*, point::*};

pub mod dataset;
pub mod point;
