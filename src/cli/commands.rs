//! CLI command definitions for textforge.
//!
//! One subcommand per pipeline stage, each taking the positional arguments
//! of its stage. The CLI layer only routes; all orchestration lives in
//! [`crate::stages`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::PipelineError;
use crate::stages;

/// Default directory for per-stage log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Three-stage text classification pipeline: CSV in, trained model out.
#[derive(Parser)]
#[command(name = "textforge")]
#[command(about = "Ingest a labeled CSV, featurize it with TF-IDF, train a random forest")]
#[command(version)]
pub struct Cli {
    /// The stage to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level threshold (trace, debug, info, warn, error).
    #[arg(long, default_value = "debug", global = true)]
    pub log_level: String,

    /// Directory for the per-stage log file.
    #[arg(long, default_value = DEFAULT_LOG_DIR, global = true)]
    pub log_dir: PathBuf,
}

/// Available CLI subcommands, one per stage.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the raw dataset, normalize its schema and split train/test.
    Ingest(IngestArgs),

    /// Transform text partitions into TF-IDF feature matrices.
    Featurize(FeaturizeArgs),

    /// Train the classifier on the featurized training partition.
    Train(TrainArgs),
}

impl Commands {
    /// Stage name used for the log file and startup banner.
    pub fn stage_name(&self) -> &'static str {
        match self {
            Commands::Ingest(_) => "Data_Ingestion",
            Commands::Featurize(_) => "Feature_Engineering",
            Commands::Train(_) => "Model_Training",
        }
    }
}

/// Arguments for `textforge ingest`.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to the parameter file (params.yaml).
    pub param_file: PathBuf,

    /// Dataset source: a local CSV path or an http(s) URL.
    pub data_url: String,

    /// Output directory for train.csv.
    pub train_output: PathBuf,

    /// Output directory for test.csv.
    pub test_output: PathBuf,
}

/// Arguments for `textforge featurize`.
#[derive(Args, Debug)]
pub struct FeaturizeArgs {
    /// Path to the parameter file (params.yaml).
    pub param_file: PathBuf,

    /// Directory holding the ingested train.csv.
    pub train_data: PathBuf,

    /// Directory holding the ingested test.csv.
    pub test_data: PathBuf,

    /// Output directory for the featurized train.csv.
    pub train_output: PathBuf,

    /// Output directory for the featurized test.csv.
    pub test_output: PathBuf,
}

/// Arguments for `textforge train`.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the parameter file (params.yaml).
    pub param_file: PathBuf,

    /// Directory holding the featurized train.csv.
    pub train_data: PathBuf,

    /// Output directory for the model artifact.
    pub model_output: PathBuf,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed command to its stage.
pub fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Commands::Ingest(args) => stages::ingest::run(
            &args.param_file,
            &args.data_url,
            &args.train_output,
            &args.test_output,
        ),
        Commands::Featurize(args) => stages::featurize::run(
            &args.param_file,
            &args.train_data,
            &args.test_data,
            &args.train_output,
            &args.test_output,
        ),
        Commands::Train(args) => {
            stages::train::run(&args.param_file, &args.train_data, &args.model_output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_positional_arguments() {
        let cli = Cli::try_parse_from([
            "textforge",
            "ingest",
            "params.yaml",
            "https://example.com/spam.csv",
            "out/train",
            "out/test",
        ])
        .unwrap();

        assert_eq!(cli.command.stage_name(), "Data_Ingestion");
        let Commands::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert_eq!(args.param_file, PathBuf::from("params.yaml"));
        assert_eq!(args.data_url, "https://example.com/spam.csv");
    }

    #[test]
    fn test_featurize_requires_five_positionals() {
        let err = Cli::try_parse_from(["textforge", "featurize", "params.yaml", "in/train"]);
        assert!(err.is_err());

        let cli = Cli::try_parse_from([
            "textforge",
            "featurize",
            "params.yaml",
            "in/train",
            "in/test",
            "out/train",
            "out/test",
        ])
        .unwrap();
        assert_eq!(cli.command.stage_name(), "Feature_Engineering");
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "textforge",
            "train",
            "params.yaml",
            "in/train",
            "out/model",
            "--log-level",
            "info",
            "--log-dir",
            "/tmp/tf-logs",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_dir, PathBuf::from("/tmp/tf-logs"));
    }
}
