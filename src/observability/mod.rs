//! Structured logging to a rotating JSON file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → FileWriter → wud-console.log
//! ```
//!
//! # Features
//!
//! - **File-Based Output**: `<data dir>/wud-console.log`, one JSON object per line
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Span Context**: Each line carries the current span (`handle_event`,
//!   `load_page`, `worker_handle_message`)
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in `config.toml` or `WUD_TRACE_LEVEL`
//! 3. Default: `"info"`
//!
//! The terminal is reserved for the rendered list, so nothing is logged to
//! stdout or stderr.

mod file_writer;
mod init;

pub use file_writer::{FileWriter, FileWriterHandle};
pub use init::{filter_directive, init_tracing, LOG_FILE_NAME};
