//! Random-forest classifier: bootstrap aggregation over CART trees.

use ndarray::ArrayView2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TrainError;
use super::tree::DecisionTree;

/// A fitted forest of decision trees over string class labels.
///
/// All randomness (bootstrap sampling and per-node feature subsampling)
/// flows from a single ChaCha8 RNG seeded with `random_state`, so fitting
/// is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    classes: Vec<String>,
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Fits `n_estimators` trees, each on a bootstrap sample of the rows
    /// with sqrt-of-feature-count subsampling at every split.
    ///
    /// # Errors
    ///
    /// - `TrainError::ShapeMismatch` if row and label counts disagree
    /// - `TrainError::EmptyTrainingSet` if there are no rows
    pub fn fit(
        features: ArrayView2<'_, f64>,
        labels: &[String],
        n_estimators: usize,
        random_state: u64,
    ) -> Result<Self, TrainError> {
        let n_rows = features.nrows();
        if n_rows != labels.len() {
            return Err(TrainError::ShapeMismatch {
                rows: n_rows,
                labels: labels.len(),
            });
        }
        if n_rows == 0 {
            return Err(TrainError::EmptyTrainingSet);
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let label_indices: Vec<usize> = labels
            .iter()
            .map(|l| classes.binary_search(l).expect("label is in classes"))
            .collect();

        let n_features = features.ncols();
        let n_split_features = ((n_features as f64).sqrt().floor() as usize).max(1);

        debug!(
            "Fitting random forest: {n_estimators} trees, {n_rows} samples, \
             {n_features} features ({n_split_features} per split), seed {random_state}"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(random_state);
        let mut trees = Vec::with_capacity(n_estimators);
        for _ in 0..n_estimators {
            let bootstrap: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            trees.push(DecisionTree::fit(
                features,
                &label_indices,
                classes.len(),
                &bootstrap,
                n_split_features,
                &mut rng,
            ));
        }

        Ok(Self {
            classes,
            trees,
            n_features,
        })
    }

    /// Majority-vote predictions for each row; ties resolve to the
    /// lexicographically smallest class.
    ///
    /// # Errors
    ///
    /// `TrainError::FeatureCountMismatch` if the input width differs from
    /// the fitted width.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<String>, TrainError> {
        if features.ncols() != self.n_features {
            return Err(TrainError::FeatureCountMismatch {
                expected: self.n_features,
                got: features.ncols(),
            });
        }

        let mut predictions = Vec::with_capacity(features.nrows());
        for row in features.rows() {
            let mut votes = vec![0usize; self.classes.len()];
            for tree in &self.trees {
                votes[tree.predict_row(row)] += 1;
            }
            let mut winner = 0;
            for (class, &count) in votes.iter().enumerate() {
                if count > votes[winner] {
                    winner = class;
                }
            }
            predictions.push(self.classes[winner].clone());
        }
        Ok(predictions)
    }

    /// Distinct class labels, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Feature width the forest was fitted on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn separable() -> (Array2<f64>, Vec<String>) {
        // One feature, two well-separated clusters.
        let values: Vec<f64> = (1..=10)
            .map(|i| -(i as f64))
            .chain((1..=10).map(|i| i as f64))
            .collect();
        let features = Array2::from_shape_vec((20, 1), values).unwrap();
        let labels: Vec<String> = std::iter::repeat("ham".to_string())
            .take(10)
            .chain(std::iter::repeat("spam".to_string()).take(10))
            .collect();
        (features, labels)
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let features = Array2::<f64>::zeros((10, 3));
        let labels = vec!["ham".to_string(); 9];

        let err = RandomForest::fit(features.view(), &labels, 5, 0).unwrap_err();
        assert!(matches!(
            err,
            TrainError::ShapeMismatch { rows: 10, labels: 9 }
        ));
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        let features = Array2::<f64>::zeros((0, 3));
        let err = RandomForest::fit(features.view(), &[], 5, 0).unwrap_err();
        assert!(matches!(err, TrainError::EmptyTrainingSet));
    }

    #[test]
    fn test_learns_separable_data() {
        let (features, labels) = separable();
        let forest = RandomForest::fit(features.view(), &labels, 25, 2).unwrap();

        assert_eq!(forest.n_trees(), 25);
        assert_eq!(forest.classes(), &["ham".to_string(), "spam".to_string()]);

        let predictions = forest.predict(features.view()).unwrap();
        assert_eq!(predictions, labels);
    }

    #[test]
    fn test_fit_is_reproducible_for_fixed_seed() {
        let (features, labels) = separable();
        let a = RandomForest::fit(features.view(), &labels, 10, 7).unwrap();
        let b = RandomForest::fit(features.view(), &labels, 10, 7).unwrap();
        assert_eq!(
            a.predict(features.view()).unwrap(),
            b.predict(features.view()).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let (features, labels) = separable();
        let forest = RandomForest::fit(features.view(), &labels, 5, 0).unwrap();

        let wide = Array2::<f64>::zeros((2, 4));
        let err = forest.predict(wide.view()).unwrap_err();
        assert!(matches!(
            err,
            TrainError::FeatureCountMismatch { expected: 1, got: 4 }
        ));
    }
}
