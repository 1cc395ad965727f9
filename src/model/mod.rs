//! Classifier training and model artifacts.
//!
//! The algorithm and its hyperparameters are modeled as a capability
//! variant ([`ClassifierSpec`]) so new classifier families can be added
//! without touching stage orchestration.

mod forest;
mod tree;

pub use forest::RandomForest;
pub use tree::{DecisionTree, TreeNode, MAX_TREE_DEPTH};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{PersistError, TrainError};

/// File name of the serialized model artifact.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Selection of a classifier family with its tunable hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum ClassifierSpec {
    /// Forest of decision trees via bootstrap aggregation.
    RandomForest {
        n_estimators: usize,
        random_state: u64,
    },
}

/// A fitted classifier, self-contained and serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum TrainedModel {
    RandomForest(RandomForest),
}

impl TrainedModel {
    /// Predicted class labels for each feature row.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<String>, TrainError> {
        match self {
            TrainedModel::RandomForest(forest) => forest.predict(features),
        }
    }
}

/// Trains a classifier on the given features and labels.
///
/// # Errors
///
/// `TrainError::ShapeMismatch` if the feature row count does not equal the
/// label count; `TrainError::EmptyTrainingSet` on an empty partition.
pub fn fit_classifier(
    features: ArrayView2<'_, f64>,
    labels: &[String],
    spec: &ClassifierSpec,
) -> Result<TrainedModel, TrainError> {
    debug!("Initializing classifier with parameters: {spec:?}");

    let model = match *spec {
        ClassifierSpec::RandomForest {
            n_estimators,
            random_state,
        } => TrainedModel::RandomForest(RandomForest::fit(
            features,
            labels,
            n_estimators,
            random_state,
        )?),
    };

    info!("Model training completed ({} samples)", features.nrows());
    Ok(model)
}

/// Serializes the fitted model to `<dir>/model.json`, creating the
/// directory if absent. The artifact is overwritten on rerun and written
/// atomically (temp file + rename).
///
/// # Errors
///
/// `PersistError` on any write failure.
pub fn persist_model(model: &TrainedModel, output_dir: &Path) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(MODEL_FILE_NAME);

    debug!("Saving trained model...");
    let mut tmp = NamedTempFile::new_in(output_dir)?;
    {
        let mut writer = BufWriter::new(&mut tmp);
        serde_json::to_writer(&mut writer, model)?;
        writer.flush()?;
    }
    tmp.persist(&path).map_err(|e| PersistError::Rename {
        path: path.clone(),
        message: e.error.to_string(),
    })?;

    info!("Model successfully saved to {}", path.display());
    Ok(path)
}

/// Reads a previously persisted model artifact.
pub fn load_model(path: &Path) -> Result<TrainedModel, PersistError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
