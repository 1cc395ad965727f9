//! In-memory tabular datasets and their on-disk interchange format.
//!
//! Stages hand data to each other exclusively through CSV files on disk:
//! `<dir>/train.csv` and `<dir>/test.csv`. This module provides the
//! in-memory [`Table`] type, loaders for local paths / URLs / partition
//! directories, the seeded train/test split, and atomic persistence.

mod loader;
mod persist;
mod split;
mod table;

pub use loader::{load_dataset, load_partition, Partition};
pub use persist::{persist_partitions, write_table};
pub use split::split;
pub use table::Table;
