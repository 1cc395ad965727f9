//! Feature engineering: text partitions in, numeric feature matrices out.
//!
//! The vocabulary is fitted exactly once, on the training partition only;
//! the test partition is transformed with the same fitted vocabulary, so
//! both outputs have the same column count and no test vocabulary can leak
//! into the model.

mod tfidf;

pub use tfidf::TfidfVectorizer;

use ndarray::Array2;
use tracing::{debug, info};

use crate::dataset::Table;
use crate::error::{ConfigError, DataError, PipelineError};

/// Column holding the document text.
pub const TEXT_COLUMN: &str = "text";

/// Column holding the class label.
pub const TARGET_COLUMN: &str = "target";

/// Trailing label column of a feature matrix.
pub const LABEL_COLUMN: &str = "label";

/// Transforms both partitions into fixed-width numeric tables with a
/// trailing label column.
///
/// Missing text values are already empty strings in a [`Table`]; rows are
/// never dropped. Labels are carried through unchanged.
///
/// # Errors
///
/// - `DataError::MissingColumn` if `text` or `target` is absent from
///   either partition
/// - `ConfigError::InvalidValue` if `max_features` is zero
pub fn vectorize(
    train: &Table,
    test: &Table,
    max_features: usize,
) -> Result<(Table, Table), PipelineError> {
    debug!("Transforming text data using TF-IDF...");

    for column in [TEXT_COLUMN, TARGET_COLUMN] {
        for partition in [train, test] {
            if !partition.has_column(column) {
                return Err(DataError::MissingColumn(column.to_string()).into());
            }
        }
    }

    if max_features == 0 {
        return Err(ConfigError::InvalidValue {
            key: "max_features".to_string(),
            message: "must be a positive integer".to_string(),
        }
        .into());
    }

    let train_texts = train.column(TEXT_COLUMN)?;
    let train_labels = train.column(TARGET_COLUMN)?;
    let test_texts = test.column(TEXT_COLUMN)?;
    let test_labels = test.column(TARGET_COLUMN)?;

    // Fit on training text only; transform both partitions with the same
    // fitted vocabulary.
    let vectorizer = TfidfVectorizer::fit(&train_texts, max_features);
    let train_matrix = vectorizer.transform(&train_texts);
    let test_matrix = vectorizer.transform(&test_texts);

    let train_out = to_feature_table(&train_matrix, &train_labels)?;
    let test_out = to_feature_table(&test_matrix, &test_labels)?;

    info!(
        "TF-IDF applied: {} features, {} train rows, {} test rows",
        vectorizer.n_features(),
        train_out.n_rows(),
        test_out.n_rows()
    );
    Ok((train_out, test_out))
}

/// Converts a dense matrix plus labels into the on-disk table shape:
/// columns `0..n-1` followed by `label`.
fn to_feature_table(matrix: &Array2<f64>, labels: &[&str]) -> Result<Table, PipelineError> {
    let mut headers: Vec<String> = (0..matrix.ncols()).map(|i| i.to_string()).collect();
    headers.push(LABEL_COLUMN.to_string());

    let rows = matrix
        .rows()
        .into_iter()
        .zip(labels)
        .map(|(row, label)| {
            let mut cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            cells.push((*label).to_string());
            cells
        })
        .collect();

    Ok(Table::new(headers, rows)?)
}
