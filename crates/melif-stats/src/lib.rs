//! Statistical helpers shared by the MeLiF crates.
//!
//! - **Descriptive statistics**: min, max, mean, median and the population
//!   variance/standard deviation of a sample
//! - **Ranking**: fractional (average) ranks with tie handling, as needed by
//!   rank-correlation measures
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing score vectors
//! - [`rank`]: Average ranks for rank-based relevance measures
//!
//! # Examples
//!
//! ```
//! use melif_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ```
//! use melif_stats::rank::average_ranks;
//!
//! assert_eq!(average_ranks(&[10.0, 20.0, 20.0]), vec![1.0, 2.5, 2.5]);
//! ```

pub mod descriptive;
pub mod rank;
