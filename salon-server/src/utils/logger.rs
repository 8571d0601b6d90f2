//! Logging Infrastructure
//!
//! `tracing-subscriber` with an `EnvFilter`, optional JSON output and an
//! optional daily rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "salon_server=info,tower_http=info,security=info,http_access=info";

/// Initialize the logger with defaults
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level`; `log_dir` switches output to a daily
/// rolling file named `salon-server.<date>`.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or(DEFAULT_FILTER)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if !log_path.exists() && std::fs::create_dir_all(log_path).is_err() {
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "salon-server"))
    });

    // try_init: a second call (tests) is a no-op instead of a panic
    let _ = match (file_appender, json.unwrap_or(false)) {
        (Some(appender), true) => builder
            .json()
            .with_ansi(false)
            .with_writer(appender)
            .try_init(),
        (Some(appender), false) => builder.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };
}
