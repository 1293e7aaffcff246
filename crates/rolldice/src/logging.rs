use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Keeps the background log writer alive; drop it to flush.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Sends `tracing` events as JSON lines to [`LoggingConfig::log_path`] when
/// structured logging is enabled. Nothing is written to the console.
pub fn init_logging(logging: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let log_path = logging.log_path();
    let file = create_log_file(&log_path)?;
    let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(logging))
        .with_writer(writer)
        .try_init();
    // Tests in one process share a single global dispatcher; later calls
    // keep the first one.
    if installed.is_err() {
        tracing::debug!(target: "rolldice::app", path = %log_path.display(), "subscriber already set");
    }

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = logging.level().unwrap_or(Level::INFO);
        EnvFilter::new(level.as_str())
    })
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating log file at {}", path.display()))
}
