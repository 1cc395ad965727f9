//! Atomic persistence of train/test partitions.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::PersistError;
use super::loader::Partition;
use super::table::Table;

/// Writes `train.csv` and `test.csv` under their respective directories,
/// creating parent directories as needed.
///
/// # Errors
///
/// `PersistError` on any write failure (disk full, permission).
pub fn persist_partitions(
    train: &Table,
    test: &Table,
    train_dir: &Path,
    test_dir: &Path,
) -> Result<(), PersistError> {
    info!("Saving train and test datasets...");

    let train_path = train_dir.join(Partition::Train.file_name());
    let test_path = test_dir.join(Partition::Test.file_name());

    write_table(train, &train_path)?;
    write_table(test, &test_path)?;

    info!(
        "Training and test data saved to '{}' and '{}'",
        train_path.display(),
        test_path.display()
    );
    Ok(())
}

/// Writes one table as CSV to `path`.
///
/// The content goes to a temporary file in the target directory first and
/// is renamed into place, so a crash mid-write never leaves a truncated
/// file at the final path. Reruns overwrite (last-writer-wins).
pub fn write_table(table: &Table, path: &Path) -> Result<(), PersistError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    table.write_to(&mut tmp)?;

    tmp.persist(path).map_err(|e| PersistError::Rename {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;

    debug!("Wrote {} rows to {}", table.n_rows(), path.display());
    Ok(())
}
