//! Subscriber setup: stderr always, plus a daily log file when enabled.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tokenbook_core::config::{AppConfig, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` wins over the config level.
///
/// The returned guard flushes the file writer on drop and must be held
/// until exit.
pub fn init(config: &LoggingConfig, verbose: u8) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => config.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tokenbook={level}")));

    let (file_layer, guard) = if config.file {
        let appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "tokenbook.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    guard
}
