//! textforge CLI entry point.
//!
//! Initializes stage-scoped logging and delegates to the CLI module for
//! command handling. Stage failures are logged, printed, and surfaced as a
//! non-zero exit code so an orchestrator can gate downstream stages.

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = textforge::cli::parse_cli();

    if let Err(e) = textforge::logging::init(cli.command.stage_name(), &cli.log_dir, &cli.log_level)
    {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Stage '{}' started", cli.command.stage_name());

    match textforge::cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Stage failed: {e}");
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
