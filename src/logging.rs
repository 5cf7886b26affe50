//! Logging setup for the binary: console output plus one plain-text log file
//! per run under the configured log directory.

use std::path::PathBuf;

use anyhow::Context;
use leads_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the file writer alive; dropping it flushes buffered log lines.
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
    pub file: Option<PathBuf>,
}

/// `processing_<YYYYmmdd_HHMMSS>.log` for the given local time.
pub fn log_file_name(at: chrono::DateTime<chrono::Local>) -> String {
    format!("processing_{}.log", at.format("%Y%m%d_%H%M%S"))
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `cfg.level`; `debug` overrides both.
pub fn init(cfg: &LoggingConfig, debug: bool) -> anyhow::Result<LogGuard> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level))
    };

    let (file_layer, worker, file) = if cfg.file {
        std::fs::create_dir_all(&cfg.dir)
            .with_context(|| format!("failed to create log directory {}", cfg.dir.display()))?;
        let name = log_file_name(chrono::Local::now());
        let path = cfg.dir.join(&name);
        let appender = tracing_appender::rolling::never(&cfg.dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard), Some(path))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LogGuard {
        _worker: worker,
        file,
    })
}
