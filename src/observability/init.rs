//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "wud-console.log";

const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with a rotating JSON log file.
///
/// Events are filtered by `RUST_LOG` if set, otherwise by
/// `config.trace_level`, otherwise at `info`, and written as JSON lines to
/// `<data dir>/wud-console.log`.
///
/// Silently does nothing when the data directory cannot be created.
/// Only the first call installs a subscriber.
///
/// # Example
///
/// ```no_run
/// use wud_console::observability::init_tracing;
/// use wud_console::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let directive = filter_directive(
        std::env::var("RUST_LOG").ok().as_deref(),
        config.trace_level.as_deref(),
    );

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(directive))
        .with(json_layer)
        .try_init();
}

/// Picks the filter directive: `RUST_LOG`, then the configured level, then
/// `info`. Blank values are skipped.
#[must_use]
pub fn filter_directive(rust_log: Option<&str>, trace_level: Option<&str>) -> String {
    rust_log
        .into_iter()
        .chain(trace_level)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}
