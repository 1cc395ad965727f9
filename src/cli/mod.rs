//! Command-line interface for textforge.
//!
//! One subcommand per pipeline stage: `ingest`, `featurize`, `train`.

mod commands;

pub use commands::{parse_cli, run, Cli, Commands};
