//! Stability classification and the bottom front of a sweep.
//!
//! From the per-point cuts of a [`Sweep`], [`Front`] derives:
//!
//! - **always in cut**: features selected at every point (intersection of cuts)
//! - **sometimes in cut**: features selected at some point (union of cuts)
//! - **need to process**: `sometimes − always`, the features whose membership
//!   depends on the weighting
//! - **marginal features**: the last (lowest-ranked) feature of each cut
//! - **transitions**: positions where the marginal feature differs from the
//!   previous point's; the first point is always a transition
//! - **bottom front**: the marginal feature's score at each transition, i.e.
//!   the lower envelope of the cut boundary along the path
//!
//! Positions index into the sweep; mapping them back onto chart coordinates
//! is up to the caller (see [`WeightPath::project_front`]).
//!
//! [`WeightPath::project_front`]: crate::path::WeightPath::project_front

use std::collections::BTreeSet;

use melif_dataset::Point;
use serde::{Deserialize, Serialize};

use crate::sweeper::{Sweep, SweepPoint};

/// A point of the bottom front.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontPoint {
    /// Position in the sweep.
    pub position: usize,
    pub weights: Point,
    /// The marginal feature at this position.
    pub feature: usize,
    /// Its ensemble score.
    pub score: f64,
}

/// Feature counts of a [`Front`], suitable for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontSummary {
    pub points: usize,
    pub always_in_cut: usize,
    pub sometimes_in_cut: usize,
    pub need_to_process: usize,
    pub transitions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Front {
    points: usize,
    always_in_cut: BTreeSet<usize>,
    sometimes_in_cut: BTreeSet<usize>,
    need_to_process: BTreeSet<usize>,
    marginal_features: Vec<Option<usize>>,
    transitions: Vec<usize>,
    bottom_front: Vec<FrontPoint>,
}

impl Front {
    #[must_use]
    pub fn from_sweep(sweep: &Sweep) -> Self {
        let front = Self::from_points(sweep.points());
        let summary = front.summary();
        log::info!(
            "sometimes in cut: {} features, always in cut: {} features, need to process: {} features, {} transitions",
            summary.sometimes_in_cut,
            summary.always_in_cut,
            summary.need_to_process,
            summary.transitions,
        );
        front
    }

    /// Derives the front from sweep points in path order.
    ///
    /// An empty slice gives an empty front.
    #[must_use]
    pub fn from_points(points: &[SweepPoint]) -> Self {
        let cuts = points
            .iter()
            .map(|p| p.cut.iter().copied().collect::<BTreeSet<_>>())
            .collect::<Vec<_>>();

        let sometimes_in_cut = cuts.iter().flatten().copied().collect::<BTreeSet<_>>();
        let always_in_cut = sometimes_in_cut
            .iter()
            .copied()
            .filter(|f| cuts.iter().all(|cut| cut.contains(f)))
            .collect::<BTreeSet<_>>();
        let need_to_process = sometimes_in_cut
            .difference(&always_in_cut)
            .copied()
            .collect();

        let marginal_features = points
            .iter()
            .map(SweepPoint::marginal_feature)
            .collect::<Vec<_>>();
        let transitions = (0..marginal_features.len())
            .filter(|&i| i == 0 || marginal_features[i] != marginal_features[i - 1])
            .collect::<Vec<_>>();
        let bottom_front = transitions
            .iter()
            .filter_map(|&position| {
                let point = &points[position];
                let feature = point.marginal_feature()?;
                Some(FrontPoint {
                    position,
                    weights: point.weights.clone(),
                    feature,
                    score: point.scores[feature],
                })
            })
            .collect();

        Self {
            points: points.len(),
            always_in_cut,
            sometimes_in_cut,
            need_to_process,
            marginal_features,
            transitions,
            bottom_front,
        }
    }

    #[must_use]
    pub fn always_in_cut(&self) -> &BTreeSet<usize> {
        &self.always_in_cut
    }

    #[must_use]
    pub fn sometimes_in_cut(&self) -> &BTreeSet<usize> {
        &self.sometimes_in_cut
    }

    #[must_use]
    pub fn need_to_process(&self) -> &BTreeSet<usize> {
        &self.need_to_process
    }

    /// The marginal feature of every point (`None` where the cut is empty).
    #[must_use]
    pub fn marginal_features(&self) -> &[Option<usize>] {
        &self.marginal_features
    }

    #[must_use]
    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }

    #[must_use]
    pub fn bottom_front(&self) -> &[FrontPoint] {
        &self.bottom_front
    }

    /// Weight vectors at the transitions: the points worth trying as
    /// candidate weightings, one per stretch of constant marginal feature.
    #[must_use]
    pub fn points_to_try(&self) -> Vec<&Point> {
        self.bottom_front.iter().map(|p| &p.weights).collect()
    }

    #[must_use]
    pub fn summary(&self) -> FrontSummary {
        FrontSummary {
            points: self.points,
            always_in_cut: self.always_in_cut.len(),
            sometimes_in_cut: self.sometimes_in_cut.len(),
            need_to_process: self.need_to_process.len(),
            transitions: self.transitions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, scores: Vec<f64>, cut: Vec<usize>) -> SweepPoint {
        SweepPoint {
            weights: Point::new(vec![x, 1.0 - x]),
            scores,
            cut,
        }
    }

    fn scenario() -> Vec<SweepPoint> {
        vec![
            point(0.0, vec![0.9, 0.8, 0.1], vec![0, 1]),
            point(0.5, vec![0.4, 0.9, 0.6], vec![1, 2]),
            point(1.0, vec![0.1, 0.9, 0.7], vec![1, 2]),
        ]
    }

    #[test]
    fn test_scenario_classification() {
        let front = Front::from_points(&scenario());
        assert_eq!(front.always_in_cut(), &BTreeSet::from([1]));
        assert_eq!(front.sometimes_in_cut(), &BTreeSet::from([0, 1, 2]));
        assert_eq!(front.need_to_process(), &BTreeSet::from([0, 2]));
        assert_eq!(front.marginal_features(), &[Some(1), Some(2), Some(2)]);
        assert_eq!(front.transitions(), &[0, 1]);
    }

    #[test]
    fn test_bottom_front_scores() {
        let front = Front::from_points(&scenario());
        let bottom = front.bottom_front();
        assert_eq!(bottom.len(), 2);
        assert_eq!((bottom[0].position, bottom[0].feature, bottom[0].score), (0, 1, 0.8));
        assert_eq!((bottom[1].position, bottom[1].feature, bottom[1].score), (1, 2, 0.6));
        assert_eq!(front.points_to_try()[1], &Point::new(vec![0.5, 0.5]));
    }

    #[test]
    fn test_always_is_subset_of_sometimes() {
        let points = vec![
            point(0.0, vec![0.0; 5], vec![4, 3, 0]),
            point(0.2, vec![0.0; 5], vec![3, 4, 1]),
            point(0.4, vec![0.0; 5], vec![2, 3, 4]),
            point(0.6, vec![0.0; 5], vec![3, 4, 0]),
        ];
        let front = Front::from_points(&points);
        assert!(front.always_in_cut().is_subset(front.sometimes_in_cut()));
        assert_eq!(front.always_in_cut(), &BTreeSet::from([3, 4]));
        let expected = front
            .sometimes_in_cut()
            .difference(front.always_in_cut())
            .copied()
            .collect::<BTreeSet<_>>();
        assert_eq!(front.need_to_process(), &expected);
        assert_eq!(front.transitions(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_sweep() {
        let front = Front::from_points(&[]);
        assert!(front.always_in_cut().is_empty());
        assert!(front.sometimes_in_cut().is_empty());
        assert!(front.need_to_process().is_empty());
        assert!(front.transitions().is_empty());
        assert!(front.bottom_front().is_empty());
        assert_eq!(front.summary().points, 0);
    }

    #[test]
    fn test_empty_cuts_have_no_marginal() {
        let points = vec![point(0.0, vec![0.3], vec![]), point(1.0, vec![0.3], vec![])];
        let front = Front::from_points(&points);
        assert_eq!(front.marginal_features(), &[None, None]);
        assert_eq!(front.transitions(), &[0]);
        assert!(front.bottom_front().is_empty());
    }

    #[test]
    fn test_summary() {
        let summary = Front::from_points(&scenario()).summary();
        assert_eq!(
            summary,
            FrontSummary {
                points: 3,
                always_in_cut: 1,
                sometimes_in_cut: 3,
                need_to_process: 2,
                transitions: 2,
            }
        );
    }
}
