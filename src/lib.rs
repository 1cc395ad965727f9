//! textforge: a three-stage batch pipeline for text classification.
//!
//! CSV in, trained model out. The three stages (ingestion, feature
//! engineering, model training) are independently invocable and hand data
//! to each other exclusively through a shared filesystem layout:
//! `<dir>/train.csv`, `<dir>/test.csv` and `<dir>/model.json`.
//! Configuration comes from a single YAML parameter document with one
//! namespaced section per stage.

pub mod cli;
pub mod dataset;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod params;
pub mod stages;

// Re-export commonly used error types
pub use error::{ConfigError, DataError, PersistError, PipelineError, TrainError};
