use std::fmt;

use serde::{Deserialize, Serialize};

/// A weight vector: one coordinate per relevance measure.
///
/// Points are conventionally on the unit simplex (coordinates sum to 1), but
/// nothing here enforces it. Weight-path generators decide which coordinates
/// they emit, and semicircle paths emit negative ones;
/// [`Point::l1_normalized`] projects onto the simplex on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    #[must_use]
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// Creates a point from raw coordinates that are not expected to lie on
    /// the simplex (e.g. points on the unit circle).
    #[must_use]
    pub fn from_raw_coords<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::new(coordinates.into_iter().collect())
    }

    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns a copy scaled so that the coordinates sum to 1.0.
    ///
    /// If the sum is zero or negative the coordinates are returned unchanged.
    ///
    /// ```
    /// use melif_dataset::Point;
    ///
    /// let p = Point::new(vec![1.0, 3.0]).l1_normalized();
    /// assert_eq!(p.coordinates(), &[0.25, 0.75]);
    /// let zero = Point::new(vec![0.0, 0.0]).l1_normalized();
    /// assert_eq!(zero.coordinates(), &[0.0, 0.0]);
    /// ```
    #[must_use]
    pub fn l1_normalized(&self) -> Self {
        let sum: f64 = self.coordinates.iter().sum();
        if sum > 0.0 {
            Self::new(self.coordinates.iter().map(|c| c / sum).collect())
        } else {
            self.clone()
        }
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c:.3}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Point::new(vec![0.5, 0.25]).to_string(), "(0.500, 0.250)");
        assert_eq!(Point::new(vec![]).to_string(), "()");
    }

    #[test]
    fn test_from_raw_coords_keeps_values() {
        let p = Point::from_raw_coords([-1.0, 0.0]);
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.coordinates(), &[-1.0, 0.0]);
    }

    #[test]
    fn test_serde_is_a_plain_array() {
        let p: Point = serde_json::from_str("[0.1, 0.9]").unwrap();
        assert_eq!(p, Point::new(vec![0.1, 0.9]));
    }
}
