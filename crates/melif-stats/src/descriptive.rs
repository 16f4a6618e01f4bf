/// Descriptive statistics summarizing a sample.
///
/// Variance and standard deviation are the *population* versions (divided by
/// `n`, not `n - 1`), which is what the outlier cut of the ensemble filters
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The median value of the sample (upper median for even sizes).
    pub median: f64,
    /// The population variance of the sample.
    pub variance: f64,
    /// The population standard deviation of the sample.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use melif_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, 2.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order, as defined
    /// by [`f64::total_cmp`] (NaN sorts last).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    /// Width of the observed value range (`max - min`).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if `value` lies strictly inside `(mean - std_dev, mean + std_dev)`.
    ///
    /// ```
    /// # use melif_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([0.0, 2.0]).unwrap(); // mean 1, std 1
    /// assert!(stats.within_one_std_dev(1.5));
    /// assert!(!stats.within_one_std_dev(2.0));
    /// ```
    #[must_use]
    pub fn within_one_std_dev(&self, value: f64) -> bool {
        value > self.mean - self.std_dev && value < self.mean + self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::new()).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([4.0]).unwrap();
        assert_eq!(stats.min, 4.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.range(), 0.0);
        // nothing is strictly inside an empty interval
        assert!(!stats.within_one_std_dev(4.0));
    }

    #[test]
    fn test_population_std_dev() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_sorts_last() {
        let stats = DescriptiveStats::new([0.3, f64::NAN, 0.1]).unwrap();
        assert_eq!(stats.min, 0.1);
        assert!(stats.max.is_nan());
        assert!(stats.mean.is_nan());
        assert!(!stats.within_one_std_dev(0.3));
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
