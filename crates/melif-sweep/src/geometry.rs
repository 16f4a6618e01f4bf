//! Straight-line approximations of feature trajectories.
//!
//! Along a simplex edge a feature's ensemble score is linear in the path
//! position, so a trajectory is fully described by its two endpoints. The
//! crossings of those lines are exactly the weightings where two features
//! swap ranks, which is where the cut can change.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

impl LinePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A segment between two points with `from.x < to.x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub name: String,
    pub from: LinePoint,
    pub to: LinePoint,
}

/// Two lines crossing at `point`; `first` and `second` index the input lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    pub first: usize,
    pub second: usize,
    pub point: LinePoint,
}

impl Line {
    #[must_use]
    pub fn new(name: impl Into<String>, from: LinePoint, to: LinePoint) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }

    /// Line from `(0, first score)` to `(1, last score)` of a trajectory.
    ///
    /// Returns `None` for an empty trajectory.
    #[must_use]
    pub fn from_trajectory(name: impl Into<String>, trajectory: &[f64]) -> Option<Self> {
        let (first, last) = (trajectory.first()?, trajectory.last()?);
        Some(Self::new(
            name,
            LinePoint::new(0.0, *first),
            LinePoint::new(1.0, *last),
        ))
    }

    fn slope(&self) -> f64 {
        (self.to.y - self.from.y) / (self.to.x - self.from.x)
    }

    /// The y value of the (extended) line at `x`.
    #[must_use]
    pub fn y_at(&self, x: f64) -> f64 {
        self.from.y + self.slope() * (x - self.from.x)
    }

    /// The point where both segments cross, if any.
    ///
    /// Parallel lines never intersect; crossings outside the x range shared by
    /// both segments are ignored.
    ///
    /// ```
    /// use melif_sweep::geometry::{Line, LinePoint};
    ///
    /// let up = Line::new("up", LinePoint::new(0.0, 0.0), LinePoint::new(1.0, 1.0));
    /// let down = Line::new("down", LinePoint::new(0.0, 1.0), LinePoint::new(1.0, 0.0));
    /// assert_eq!(up.intersect(&down), Some(LinePoint::new(0.5, 0.5)));
    /// assert_eq!(up.intersect(&up.clone()), None);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Line) -> Option<LinePoint> {
        let (k1, k2) = (self.slope(), other.slope());
        let dk = k1 - k2;
        if !dk.is_finite() || dk.abs() < f64::EPSILON {
            return None;
        }
        // y1 + k1 (x - x1) = y2 + k2 (x - x2)
        let x = (other.from.y - self.from.y + k1 * self.from.x - k2 * other.from.x) / dk;
        let lo = self.from.x.max(other.from.x);
        let hi = self.to.x.min(other.to.x);
        if !(lo..=hi).contains(&x) {
            return None;
        }
        Some(LinePoint::new(x, self.y_at(x)))
    }
}

/// All crossings between pairs of `lines`, sorted by x.
#[must_use]
pub fn pairwise_intersections(lines: &[Line]) -> Vec<Intersection> {
    let mut intersections = lines
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            lines[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(j, b)| {
                    a.intersect(b).map(|point| Intersection {
                        first: i,
                        second: i + 1 + j,
                        point,
                    })
                })
        })
        .collect::<Vec<_>>();
    intersections.sort_by(|a, b| a.point.x.total_cmp(&b.point.x));
    intersections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_trajectory() {
        let line = Line::from_trajectory("f", &[0.2, 0.3, 0.6]).unwrap();
        assert_eq!(line.from, LinePoint::new(0.0, 0.2));
        assert_eq!(line.to, LinePoint::new(1.0, 0.6));
        assert!(Line::from_trajectory("f", &[]).is_none());
    }

    #[test]
    fn test_crossing_outside_segment() {
        let a = Line::new("a", LinePoint::new(0.0, 0.0), LinePoint::new(1.0, 1.0));
        let b = Line::new("b", LinePoint::new(0.0, 2.0), LinePoint::new(1.0, 2.5));
        // the extended lines cross at x = 4
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_pairwise_sorted_by_x() {
        let lines = vec![
            Line::new("a", LinePoint::new(0.0, 0.0), LinePoint::new(1.0, 1.0)),
            Line::new("b", LinePoint::new(0.0, 0.8), LinePoint::new(1.0, 0.0)),
            Line::new("c", LinePoint::new(0.0, 0.2), LinePoint::new(1.0, 0.2)),
        ];
        let found = pairwise_intersections(&lines);
        assert_eq!(found.len(), 3);
        assert!(found.is_sorted_by(|a, b| a.point.x <= b.point.x));
        // a and c cross at x = 0.2
        assert_eq!((found[0].first, found[0].second), (0, 2));
        assert!((found[0].point.x - 0.2).abs() < 1e-12);
    }
}
