//! The in-memory tabular dataset.

use std::io::{Read, Write};

use crate::error::DataError;

/// A rectangular table of strings: ordered headers plus uniform-width rows.
///
/// Cells hold raw strings; empty cells are empty strings, which is how
/// missing text values are represented downstream (rows are never dropped
/// for missing values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, checking that every row matches the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DataError> {
        let width = headers.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DataError::Parse(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    /// Parses CSV content with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| DataError::Parse(e.to_string()))?
            .iter()
            .map(String::from)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| DataError::Parse(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Self::new(headers, rows)
    }

    /// Serializes the table as CSV with a header row.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Borrows one column's cells in row order.
    ///
    /// # Errors
    ///
    /// `DataError::MissingColumn` if the column is absent.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, DataError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Removes the named columns.
    ///
    /// With `ignore_missing` set, absent names are skipped; otherwise the
    /// first absent name fails with `DataError::MissingColumn`.
    pub fn drop_columns(&mut self, names: &[&str], ignore_missing: bool) -> Result<(), DataError> {
        for name in names {
            match self.column_index(name) {
                Some(idx) => {
                    self.headers.remove(idx);
                    for row in &mut self.rows {
                        row.remove(idx);
                    }
                }
                None if ignore_missing => {}
                None => return Err(DataError::MissingColumn((*name).to_string())),
            }
        }
        Ok(())
    }

    /// Renames a column in place.
    ///
    /// # Errors
    ///
    /// `DataError::MissingColumn` if the source name is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), DataError> {
        let idx = self
            .column_index(from)
            .ok_or_else(|| DataError::MissingColumn(from.to_string()))?;
        self.headers[idx] = to.to_string();
        Ok(())
    }

    /// Builds a new table from a subset of row indices, preserving headers.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}
