//! Dataset loading from local paths, URLs and partition directories.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::DataError;
use super::table::Table;

/// Which half of a train/test partition pair to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    /// File name of this partition inside its directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Partition::Train => "train.csv",
            Partition::Test => "test.csv",
        }
    }
}

/// Loads a delimited tabular dataset from a local path or an http(s) URL.
///
/// # Errors
///
/// - `DataError::NotFound` if the file is missing or the server returns 404
/// - `DataError::Parse` on malformed CSV content
/// - `DataError::Fetch` on other transport failures
/// - `DataError::Io` on other read failures
pub fn load_dataset(source: &str) -> Result<Table, DataError> {
    debug!("Attempting to load data from: {source}");

    let table = if is_url(source) {
        fetch_csv(source)?
    } else {
        let file = File::open(source).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(source.to_string()),
            _ => DataError::Io(e),
        })?;
        Table::from_reader(BufReader::new(file))?
    };

    info!(
        "Data successfully loaded from {source} ({} rows, {} columns)",
        table.n_rows(),
        table.n_cols()
    );
    Ok(table)
}

/// Loads `train.csv` or `test.csv` from a partition directory.
///
/// Same error taxonomy as [`load_dataset`].
pub fn load_partition(dir: &Path, which: Partition) -> Result<Table, DataError> {
    let path = dir.join(which.file_name());
    load_dataset(&path.display().to_string())
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_csv(url: &str) -> Result<Table, DataError> {
    let response = reqwest::blocking::get(url).map_err(|e| DataError::Fetch(e.to_string()))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(DataError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(DataError::Fetch(format!("HTTP {status} from {url}")));
    }

    let body = response
        .bytes()
        .map_err(|e| DataError::Fetch(e.to_string()))?;
    Table::from_reader(body.as_ref())
}
