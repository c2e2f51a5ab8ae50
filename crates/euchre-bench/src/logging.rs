use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; dropping it flushes the telemetry file.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

fn telemetry_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create telemetry directory {}", dir.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("cannot create telemetry file {}", path.display()))?;
    // Lossless: game events must not be dropped under back-pressure.
    Ok(NonBlockingBuilder::default().lossy(false).finish(file))
}

/// Routes `tracing` events to `telemetry.jsonl` when structured logging is enabled.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> anyhow::Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = outputs.telemetry_dir().join(TELEMETRY_FILE);
    let (writer, worker) = telemetry_writer(&telemetry_path)?;

    let default_level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_target(true)
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed; telemetry file stays empty");
    }

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}
