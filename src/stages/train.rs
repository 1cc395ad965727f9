//! Model-training stage.
//!
//! Loads the numeric training partition, separates the trailing column as
//! labels, fits the configured classifier, and serializes the fitted model.

use std::path::Path;

use ndarray::Array2;
use tracing::{error, info};

use crate::dataset::{self, Partition, Table};
use crate::error::{DataError, PipelineError};
use crate::model::{self, ClassifierSpec};
use crate::params::{ParamsDoc, TrainingParams, TRAINING_SECTION};

/// Runs the model-training stage end to end.
pub fn run(
    params_path: &Path,
    train_data_dir: &Path,
    model_dir: &Path,
) -> Result<(), PipelineError> {
    let params = ParamsDoc::load(params_path)
        .inspect_err(|e| error!("Failed to load parameters: {e}"))?;
    let training: TrainingParams = params
        .section(TRAINING_SECTION)
        .inspect_err(|e| error!("Failed to read training parameters: {e}"))?;
    training
        .validate()
        .inspect_err(|e| error!("Invalid training parameters: {e}"))?;

    let table = dataset::load_partition(train_data_dir, Partition::Train)
        .inspect_err(|e| error!("Failed to load training matrix: {e}"))?;

    let (features, labels) = split_features_and_labels(&table)
        .inspect_err(|e| error!("Invalid training matrix: {e}"))?;

    let spec = ClassifierSpec::RandomForest {
        n_estimators: training.n_estimators,
        random_state: training.random_state,
    };
    let fitted = model::fit_classifier(features.view(), &labels, &spec)
        .inspect_err(|e| error!("Error during model training: {e}"))?;

    let path = model::persist_model(&fitted, model_dir)
        .inspect_err(|e| error!("Failed to persist model: {e}"))?;

    info!("Model training stage complete: {}", path.display());
    Ok(())
}

/// Splits a feature table into a numeric matrix (all columns but the last)
/// and a label vector (the last column).
///
/// # Errors
///
/// `DataError::Parse` if the table has fewer than two columns or a feature
/// cell is not numeric.
pub fn split_features_and_labels(table: &Table) -> Result<(Array2<f64>, Vec<String>), DataError> {
    let n_cols = table.n_cols();
    if n_cols < 2 {
        return Err(DataError::Parse(format!(
            "feature matrix needs at least one feature column and a label column, got {n_cols}"
        )));
    }
    let n_features = n_cols - 1;
    let n_rows = table.n_rows();

    let mut features = Array2::<f64>::zeros((n_rows, n_features));
    let mut labels = Vec::with_capacity(n_rows);

    for (r, row) in table.rows().iter().enumerate() {
        for (c, cell) in row[..n_features].iter().enumerate() {
            features[[r, c]] = cell.parse::<f64>().map_err(|_| {
                DataError::Parse(format!(
                    "non-numeric feature value '{cell}' at row {}, column {c}",
                    r + 1
                ))
            })?;
        }
        labels.push(row[n_features].clone());
    }

    Ok((features, labels))
}
