//! CART decision trees for the forest.
//!
//! Trees split on gini impurity with midpoint thresholds and grow until
//! nodes are pure (bounded by [`MAX_TREE_DEPTH`] to keep recursion depth
//! in check). Feature subsampling at each node is driven by the caller's
//! seeded RNG, which keeps tree construction reproducible.

use ndarray::{ArrayView1, ArrayView2};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Hard cap on tree depth.
pub const MAX_TREE_DEPTH: usize = 64;

const MIN_SAMPLES_SPLIT: usize = 2;

/// One node of a fitted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node predicting a class index.
    Leaf { class: usize },
    /// Internal split: rows with `feature <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A single fitted decision tree over class indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    /// Fits a tree on the rows named by `indices` (bootstrap sample).
    ///
    /// `n_split_features` features are sampled without replacement at each
    /// node; the best gini split among them wins.
    pub fn fit(
        features: ArrayView2<'_, f64>,
        labels: &[usize],
        n_classes: usize,
        indices: &[usize],
        n_split_features: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let root = build_node(
            features,
            labels,
            n_classes,
            indices,
            n_split_features,
            rng,
            0,
        );
        Self { root }
    }

    /// Predicted class index for one feature row.
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn class_counts(labels: &[usize], n_classes: usize, indices: &[usize]) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    counts
}

/// Majority class; ties resolve to the lowest class index.
fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[allow(clippy::too_many_arguments)]
fn build_node(
    features: ArrayView2<'_, f64>,
    labels: &[usize],
    n_classes: usize,
    indices: &[usize],
    n_split_features: usize,
    rng: &mut ChaCha8Rng,
    depth: usize,
) -> TreeNode {
    let counts = class_counts(labels, n_classes, indices);
    let majority = majority_class(&counts);

    let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if is_pure || indices.len() < MIN_SAMPLES_SPLIT || depth >= MAX_TREE_DEPTH {
        return TreeNode::Leaf { class: majority };
    }

    let n_features = features.ncols();
    let candidates =
        rand::seq::index::sample(rng, n_features, n_split_features.min(n_features)).into_vec();

    let mut best: Option<BestSplit> = None;
    for feature in candidates {
        if let Some(split) = best_split_on_feature(features, labels, n_classes, indices, feature) {
            let better = best
                .as_ref()
                .map(|b| split.impurity < b.impurity)
                .unwrap_or(true);
            if better {
                best = Some(split);
            }
        }
    }

    // All sampled features are constant over this node's rows.
    let Some(best) = best else {
        return TreeNode::Leaf { class: majority };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| features[[i, best.feature]] <= best.threshold);

    TreeNode::Split {
        feature: best.feature,
        threshold: best.threshold,
        left: Box::new(build_node(
            features,
            labels,
            n_classes,
            &left_idx,
            n_split_features,
            rng,
            depth + 1,
        )),
        right: Box::new(build_node(
            features,
            labels,
            n_classes,
            &right_idx,
            n_split_features,
            rng,
            depth + 1,
        )),
    }
}

/// Best midpoint threshold for one feature, by weighted gini of the two
/// children. Returns `None` if the feature is constant over the rows.
fn best_split_on_feature(
    features: ArrayView2<'_, f64>,
    labels: &[usize],
    n_classes: usize,
    indices: &[usize],
    feature: usize,
) -> Option<BestSplit> {
    let mut pairs: Vec<(f64, usize)> = indices
        .iter()
        .map(|&i| (features[[i, feature]], labels[i]))
        .collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let total = pairs.len();
    let mut right_counts = vec![0usize; n_classes];
    for &(_, label) in &pairs {
        right_counts[label] += 1;
    }
    let mut left_counts = vec![0usize; n_classes];

    let mut best: Option<BestSplit> = None;
    for i in 0..total - 1 {
        let (value, label) = pairs[i];
        left_counts[label] += 1;
        right_counts[label] -= 1;

        let next_value = pairs[i + 1].0;
        if next_value <= value {
            continue;
        }

        let n_left = i + 1;
        let n_right = total - n_left;
        let impurity = (n_left as f64 * gini(&left_counts, n_left)
            + n_right as f64 * gini(&right_counts, n_right))
            / total as f64;

        let better = best
            .as_ref()
            .map(|b| impurity < b.impurity)
            .unwrap_or(true);
        if better {
            best = Some(BestSplit {
                feature,
                threshold: (value + next_value) / 2.0,
                impurity,
            });
        }
    }

    best
}
