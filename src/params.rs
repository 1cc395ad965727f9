//! Parameter document loading.
//!
//! The pipeline is configured by a single YAML file with one top-level
//! section per stage. Each stage extracts and deserializes only its own
//! namespaced section; a missing section or key is a fatal `ConfigError`,
//! never silently defaulted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Section key for the ingestion stage.
pub const INGESTION_SECTION: &str = "1_Data_Ingestion";

/// Section key for the feature-engineering stage.
pub const FEATURE_SECTION: &str = "3_Feature_Engineering";

/// Section key for the model-training stage.
pub const TRAINING_SECTION: &str = "4_Model_Training";

/// A loaded parameter document, keyed by stage name.
///
/// The document is kept untyped so a stage can run against a file that
/// only carries its own section.
#[derive(Debug, Clone)]
pub struct ParamsDoc {
    path: PathBuf,
    root: serde_yaml::Value,
}

impl ParamsDoc {
    /// Loads and parses the parameter file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotFound` if the path does not exist
    /// - `ConfigError::Parse` on malformed YAML or a non-mapping root
    /// - `ConfigError::Io` on any other read failure
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading parameters from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        let root: serde_yaml::Value = serde_yaml::from_str(&raw)?;

        if !root.is_mapping() {
            return Err(ConfigError::InvalidValue {
                key: path.display().to_string(),
                message: "parameter document root must be a mapping".to_string(),
            });
        }

        info!("Parameters loaded successfully from: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Extracts and deserializes one stage's namespaced section.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingSection` if the key is absent
    /// - `ConfigError::Parse` if the section has missing or mistyped keys
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .root
            .get(key)
            .ok_or_else(|| ConfigError::MissingSection(key.to_string()))?;
        Ok(serde_yaml::from_value(value.clone())?)
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parameters for the ingestion stage (`1_Data_Ingestion`).
#[derive(Debug, Clone, Deserialize)]
pub struct IngestionParams {
    /// Fraction of rows reserved for the test partition.
    pub test_size: f64,
}

impl IngestionParams {
    /// Validates that `test_size` lies strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "test_size".to_string(),
                message: format!("must be a fraction in (0, 1), got {}", self.test_size),
            });
        }
        Ok(())
    }
}

/// Parameters for the feature-engineering stage (`3_Feature_Engineering`).
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureParams {
    /// Maximum number of vocabulary terms to retain.
    pub max_features: usize,
}

impl FeatureParams {
    /// Validates that `max_features` is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_features".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters for the model-training stage (`4_Model_Training`).
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingParams {
    /// Number of trees in the forest.
    pub n_estimators: usize,
    /// Seed for bootstrap sampling and feature subsampling.
    pub random_state: u64,
}

impl TrainingParams {
    /// Validates that `n_estimators` is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_estimators == 0 {
            return Err(ConfigError::InvalidValue {
                key: "n_estimators".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}
