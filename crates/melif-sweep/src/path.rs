//! Weight paths: ordered, fixed discretizations of a curve through weight space.
//!
//! Both paths here are over two measures and are parametrized by a position
//! `x ∈ 0..=samples`:
//!
//! - [`WeightPath::SimplexEdge`] walks the edge of the 2-D simplex, from
//!   `(0, 1)` (all weight on the second measure) to `(1, 0)`.
//! - [`WeightPath::Semicircle`] walks the upper unit semicircle from angle `π`
//!   to `0`, emitting the raw `(cos θ, sin θ)` coordinates. This is the
//!   projective view of the same weightings: a feature's ensemble score at a
//!   point is proportional to its distance along that direction.
//!
//! A path with `samples == 0` is empty.

use std::f64::consts::PI;

use melif_dataset::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightPath {
    SimplexEdge { samples: usize },
    Semicircle { samples: usize },
}

impl WeightPath {
    #[must_use]
    pub fn samples(self) -> usize {
        match self {
            WeightPath::SimplexEdge { samples } | WeightPath::Semicircle { samples } => samples,
        }
    }

    /// Number of points on the path (`samples + 1`, or 0 for an empty path).
    #[must_use]
    pub fn len(self) -> usize {
        match self.samples() {
            0 => 0,
            samples => samples + 1,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Fraction of the path covered at `position`, in `[0, 1]`.
    #[expect(clippy::cast_precision_loss)]
    fn fraction(self, position: usize) -> f64 {
        position as f64 / self.samples() as f64
    }

    /// Angle of the semicircle direction at `position` (`π` down to `0`).
    #[must_use]
    pub fn angle(self, position: usize) -> f64 {
        PI - PI * self.fraction(position)
    }

    /// The weight vector at `position`.
    ///
    /// ```
    /// use melif_sweep::path::WeightPath;
    ///
    /// let simplex = WeightPath::SimplexEdge { samples: 4 };
    /// assert_eq!(simplex.point(1).coordinates(), &[0.25, 0.75]);
    ///
    /// let circle = WeightPath::Semicircle { samples: 2 };
    /// let top = circle.point(1);
    /// assert!(top.coordinates()[0].abs() < 1e-12);
    /// assert!((top.coordinates()[1] - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn point(self, position: usize) -> Point {
        match self {
            WeightPath::SimplexEdge { .. } => {
                let t = self.fraction(position);
                Point::new(vec![t, 1.0 - t])
            }
            WeightPath::Semicircle { .. } => {
                let angle = self.angle(position);
                Point::from_raw_coords([angle.cos(), angle.sin()])
            }
        }
    }

    /// All points of the path, in order.
    #[must_use]
    pub fn points(self) -> Vec<Point> {
        (0..self.len()).map(|position| self.point(position)).collect()
    }

    /// Maps a bottom-front value at `position` into chart coordinates.
    ///
    /// On the simplex edge this is `(fraction of the path, score)`. On the
    /// semicircle the score is a distance along the direction at `position`,
    /// so the point is `(cos θ, sin θ · score)`.
    #[must_use]
    pub fn project_front(self, position: usize, score: f64) -> (f64, f64) {
        match self {
            WeightPath::SimplexEdge { .. } => (self.fraction(position), score),
            WeightPath::Semicircle { .. } => {
                let angle = self.angle(position);
                (angle.cos(), angle.sin() * score)
            }
        }
    }
}
