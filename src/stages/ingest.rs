//! Data-ingestion stage.
//!
//! Fetches the raw CSV dataset, normalizes its schema to `target,text`,
//! splits it into train/test partitions with a fixed seed, and persists
//! both partitions.

use std::path::Path;

use tracing::{debug, error, info};

use crate::dataset::{self, Table};
use crate::error::{DataError, PipelineError};
use crate::params::{IngestionParams, ParamsDoc, INGESTION_SECTION};

/// Fixed seed for the train/test shuffle, so reruns over the same input
/// produce byte-identical partitions.
pub const SPLIT_SEED: u64 = 2;

/// Known extraneous columns in the raw dataset; dropped if present.
const DROPPED_COLUMNS: [&str; 3] = ["Unnamed: 2", "Unnamed: 3", "Unnamed: 4"];

/// Source column renamed to `target`.
const SOURCE_TARGET_COLUMN: &str = "v1";

/// Source column renamed to `text`.
const SOURCE_TEXT_COLUMN: &str = "v2";

/// Runs the ingestion stage end to end.
pub fn run(
    params_path: &Path,
    source: &str,
    train_dir: &Path,
    test_dir: &Path,
) -> Result<(), PipelineError> {
    let params = ParamsDoc::load(params_path)
        .inspect_err(|e| error!("Failed to load parameters: {e}"))?;
    let ingestion: IngestionParams = params
        .section(INGESTION_SECTION)
        .inspect_err(|e| error!("Failed to read ingestion parameters: {e}"))?;
    ingestion
        .validate()
        .inspect_err(|e| error!("Invalid ingestion parameters: {e}"))?;

    let raw = dataset::load_dataset(source)
        .inspect_err(|e| error!("Failed to load dataset from '{source}': {e}"))?;

    let prepared = preprocess(raw).inspect_err(|e| error!("Preprocessing failed: {e}"))?;

    let (train, test) = dataset::split(&prepared, ingestion.test_size, SPLIT_SEED);

    dataset::persist_partitions(&train, &test, train_dir, test_dir)
        .inspect_err(|e| error!("Failed to persist partitions: {e}"))?;

    info!(
        "Ingestion complete: {} train rows, {} test rows",
        train.n_rows(),
        test.n_rows()
    );
    Ok(())
}

/// Drops known-junk columns (tolerating their absence) and renames the two
/// source columns to the canonical `target`/`text` names.
///
/// The output has exactly two columns and the same row count as the input.
///
/// # Errors
///
/// `DataError::MissingColumn` naming the column if `v1` or `v2` is absent.
pub fn preprocess(mut table: Table) -> Result<Table, DataError> {
    debug!("Starting data preprocessing...");

    table.drop_columns(&DROPPED_COLUMNS, true)?;
    table.rename_column(SOURCE_TARGET_COLUMN, "target")?;
    table.rename_column(SOURCE_TEXT_COLUMN, "text")?;

    info!("Data preprocessing completed ({} rows)", table.n_rows());
    Ok(table)
}
