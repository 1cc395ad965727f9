//! Feature-engineering stage.
//!
//! Loads the train/test partitions produced by ingestion, fits a TF-IDF
//! vocabulary on the training text only, transforms both partitions into
//! numeric feature matrices with a trailing label column, and persists
//! them.

use std::path::Path;

use tracing::{debug, error, info};

use crate::dataset::{self, Partition};
use crate::error::PipelineError;
use crate::features;
use crate::params::{FeatureParams, ParamsDoc, FEATURE_SECTION};

/// Runs the feature-engineering stage end to end.
pub fn run(
    params_path: &Path,
    train_data_dir: &Path,
    test_data_dir: &Path,
    train_out_dir: &Path,
    test_out_dir: &Path,
) -> Result<(), PipelineError> {
    let params = ParamsDoc::load(params_path)
        .inspect_err(|e| error!("Failed to load parameters: {e}"))?;
    let feature_params: FeatureParams = params
        .section(FEATURE_SECTION)
        .inspect_err(|e| error!("Failed to read feature-engineering parameters: {e}"))?;
    feature_params
        .validate()
        .inspect_err(|e| error!("Invalid feature-engineering parameters: {e}"))?;

    debug!(
        "Attempting to load training data from: {}",
        train_data_dir.display()
    );
    let train = dataset::load_partition(train_data_dir, Partition::Train)
        .inspect_err(|e| error!("Failed to load training partition: {e}"))?;

    debug!(
        "Attempting to load test data from: {}",
        test_data_dir.display()
    );
    let test = dataset::load_partition(test_data_dir, Partition::Test)
        .inspect_err(|e| error!("Failed to load test partition: {e}"))?;

    let (train_features, test_features) =
        features::vectorize(&train, &test, feature_params.max_features)
            .inspect_err(|e| error!("Error during TF-IDF transformation: {e}"))?;

    dataset::persist_partitions(&train_features, &test_features, train_out_dir, test_out_dir)
        .inspect_err(|e| error!("Failed to persist feature matrices: {e}"))?;

    info!(
        "Feature engineering complete: {} columns per matrix",
        train_features.n_cols()
    );
    Ok(())
}
