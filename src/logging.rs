//! Stage-scoped logging setup.
//!
//! Each stage invocation constructs its own subscriber with two layers
//! sharing one format: a console layer and an append-only file layer
//! writing `logs/<Stage>.log`. The threshold defaults to DEBUG and can be
//! overridden with `RUST_LOG`.
//!
//! Initialization uses `try_init`, so a second call within one process is
//! reported as an error instead of silently stacking handlers.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// A cloneable handle to the shared log file.
///
/// `&File` implements `Write`, so concurrent layer flushes append to the
/// same descriptor without extra locking.
struct SharedFile(Arc<File>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

/// Initializes logging for one stage invocation.
///
/// Creates `log_dir` if needed and opens `<log_dir>/<stage>.log` in append
/// mode. Filter priority: `RUST_LOG` env var, then `default_level`.
///
/// # Errors
///
/// Returns an IO error if the log directory or file cannot be created, or
/// if a subscriber is already installed for this process.
pub fn init(stage: &str, log_dir: &Path, default_level: &str) -> io::Result<()> {
    fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(format!("{stage}.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let file = Arc::new(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || SharedFile(file.clone())),
        )
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::debug!("Logging initialized for stage '{stage}' (file: {})", log_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_log_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        // First init in the test process may fail if another test already
        // installed a subscriber; the file side effects still happen first.
        let _ = init("Test_Stage", &log_dir, "debug");

        assert!(log_dir.exists());
        assert!(log_dir.join("Test_Stage.log").exists());
    }
}
