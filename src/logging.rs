use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "crm-schedule.log";

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
pub enum Sink<'a> {
    Stderr,
    File(&'a Path),
}

/// `RUST_LOG` wins; otherwise `-v` count, then the configured level, then `warn`.
pub fn default_level(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("warn").to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init(level: &str, sink: Sink<'_>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| eyre!("invalid RUST_LOG / log level `{level}`: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let (init_result, guard) = match sink {
        Sink::Stderr => (
            builder.with_writer(std::io::stderr).try_init(),
            None,
        ),
        Sink::File(dir) => {
            std::fs::create_dir_all(dir)
                .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                builder.with_writer(writer).with_ansi(false).try_init(),
                Some(guard),
            )
        }
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(guard)
}
