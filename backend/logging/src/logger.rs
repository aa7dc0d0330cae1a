//! Structured logger setup.
//!
//! Wraps `tracing` with a console layer and, when a log directory is given,
//! a daily-rolling NDJSON file layer. Level comes from `RUST_LOG` when set,
//! otherwise from the provided default.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global logger. Safe to call more than once; only the first
/// call takes effect.
pub fn init_logger(log_dir: Option<&Path>, default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    match log_dir {
        Some(dir) => {
            // Rolling file appender: NDJSON at `<dir>/napsign.log.YYYY-MM-DD`.
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "napsign.log");
            let file_layer = fmt::layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false);
            let _ = registry.with(file_layer).try_init();
        }
        None => {
            let _ = registry.try_init();
        }
    }
}
