//! Error types for pipeline operations.
//!
//! Defines error types for the pipeline subsystems:
//! - Parameter loading and validation
//! - Dataset loading, schema checks and partitioning
//! - Model training
//! - Artifact persistence
//!
//! Every stage function logs an error with context at the point of
//! detection, then propagates it unchanged with `?`. Nothing is swallowed
//! or downgraded along the way; the binary boundary turns the final error
//! into a printed message and a non-zero exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating the parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The parameter file does not exist.
    #[error("Parameter file not found: {0}")]
    NotFound(PathBuf),

    /// The parameter file is not valid YAML, or a section has the wrong shape.
    #[error("Failed to parse parameter file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The stage's namespaced section is absent from the document.
    #[error("Missing section '{0}' in parameter file")]
    MissingSection(String),

    /// A parameter value is out of range.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// IO error while reading the parameter file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading or reshaping datasets.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset source is missing (file absent or HTTP 404).
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// The tabular content is malformed.
    #[error("Failed to parse CSV data: {0}")]
    Parse(String),

    /// A network fetch failed for a reason other than a missing resource.
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    /// An expected column is absent.
    #[error("Column '{0}' not found in input data")]
    MissingColumn(String),

    /// IO error while reading the dataset.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during model training.
#[derive(Debug, Error)]
pub enum TrainError {
    /// Feature row count and label count disagree.
    #[error("Shape mismatch: {rows} feature rows but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    /// The training partition has no rows.
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Prediction input width differs from the fitted feature width.
    #[error("Feature count mismatch: model was fitted on {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },
}

/// Errors that can occur while persisting artifacts.
#[derive(Debug, Error)]
pub enum PersistError {
    /// IO error while writing (disk full, permission, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Model (de)serialization failed.
    #[error("Model serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Renaming the temporary file into place failed.
    #[error("Failed to move '{path}' into place: {message}")]
    Rename { path: PathBuf, message: String },
}

/// Umbrella error for stage orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Train(#[from] TrainError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
