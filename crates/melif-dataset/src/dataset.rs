use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DataSetError {
    #[display(
        "feature '{feature}' has {actual} values but the dataset has {expected} class labels"
    )]
    ValueCountMismatch {
        feature: String,
        expected: usize,
        actual: usize,
    },
}

/// A single candidate feature: an identifier and its values across all samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    name: String,
    values: Vec<i32>,
}

impl Feature {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

/// A labeled dataset in feature-major layout.
///
/// Every feature holds exactly one value per class label. The invariant is
/// checked on construction and on deserialization, so a `FeatureDataSet`
/// in hand is always consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureDataSet")]
pub struct FeatureDataSet {
    name: String,
    features: Vec<Feature>,
    classes: Vec<i32>,
}

#[derive(Deserialize)]
struct RawFeatureDataSet {
    name: String,
    features: Vec<Feature>,
    classes: Vec<i32>,
}

impl TryFrom<RawFeatureDataSet> for FeatureDataSet {
    type Error = DataSetError;

    fn try_from(raw: RawFeatureDataSet) -> Result<Self, Self::Error> {
        Self::new(raw.features, raw.classes, raw.name)
    }
}

impl FeatureDataSet {
    /// Creates a dataset, checking that every feature has one value per label.
    ///
    /// # Examples
    ///
    /// ```
    /// use melif_dataset::{Feature, FeatureDataSet};
    ///
    /// let ds = FeatureDataSet::new(
    ///     vec![Feature::new("g1", vec![1, 2, 3])],
    ///     vec![0, 1, 1],
    ///     "toy",
    /// )
    /// .unwrap();
    /// assert_eq!(ds.feature_count(), 1);
    /// assert_eq!(ds.sample_count(), 3);
    ///
    /// assert!(FeatureDataSet::new(vec![Feature::new("g1", vec![1])], vec![0, 1], "bad").is_err());
    /// ```
    pub fn new(
        features: Vec<Feature>,
        classes: Vec<i32>,
        name: impl Into<String>,
    ) -> Result<Self, DataSetError> {
        if let Some(bad) = features.iter().find(|f| f.values.len() != classes.len()) {
            return Err(DataSetError::ValueCountMismatch {
                feature: bad.name.clone(),
                expected: classes.len(),
                actual: bad.values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            features,
            classes,
        })
    }

    /// Builds a dataset holding `features` with this dataset's labels and name.
    ///
    /// Used by filters to produce a subset; the features come from `self`, so
    /// the value-count invariant already holds.
    #[must_use]
    pub fn with_features(&self, features: Vec<Feature>) -> Self {
        debug_assert!(features.iter().all(|f| f.values.len() == self.classes.len()));
        Self {
            name: self.name.clone(),
            features,
            classes: self.classes.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> FeatureDataSet {
        FeatureDataSet::new(
            vec![
                Feature::new("a", vec![1, 0, 1]),
                Feature::new("b", vec![3, 3, 2]),
            ],
            vec![1, 0, 1],
            "toy",
        )
        .unwrap()
    }

    #[test]
    fn test_value_count_mismatch() {
        let err = FeatureDataSet::new(
            vec![Feature::new("a", vec![1, 2]), Feature::new("b", vec![1])],
            vec![0, 1],
            "bad",
        )
        .unwrap_err();
        assert_eq!(
            err,
            DataSetError::ValueCountMismatch {
                feature: "b".to_owned(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = FeatureDataSet::new(vec![], vec![], "empty").unwrap();
        assert_eq!(ds.feature_count(), 0);
        assert_eq!(ds.sample_count(), 0);
    }

    #[test]
    fn test_with_features_keeps_labels_and_name() {
        let ds = toy();
        let subset = ds.with_features(vec![ds.features()[1].clone()]);
        assert_eq!(subset.name(), "toy");
        assert_eq!(subset.classes(), ds.classes());
        assert_eq!(subset.features()[0].name(), "b");
        // the original is untouched
        assert_eq!(ds.feature_count(), 2);
    }

    #[test]
    fn test_json_round_trip_checks_invariant() {
        let json = serde_json::to_string(&toy()).unwrap();
        let back: FeatureDataSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, toy());

        let bad = r#"{"name":"x","features":[{"name":"a","values":[1]}],"classes":[0,1]}"#;
        assert!(serde_json::from_str::<FeatureDataSet>(bad).is_err());
    }
}
