use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, errors::Error, Result};

/// Initialize logging for the bot: one layer to stdout, one to the log file.
///
/// The returned guard must be held for the process lifetime so buffered file
/// records are flushed on shutdown. Level defaults to `info` and can be
/// overridden with `RUST_LOG`.
pub fn init(cfg: &Config) -> Result<WorkerGuard> {
    let file_name = cfg
        .log_file
        .file_name()
        .ok_or_else(|| Error::Config("LOG_FILE must name a file".to_string()))?;
    let dir = match cfg.log_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => std::path::Path::new("."),
    };

    let (file_writer, guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::never(dir, file_name),
    );

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sgb=info,sgb_core=info,sgb_telegram=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(false)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
