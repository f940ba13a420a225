//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the Windscope application.
// CONTEXT: Wires configuration, unified logging, the CSV-backed dataset and
//          per-session filter state around the cross-filter engine.

pub mod logging;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;

pub use cli::{replay, run, Cli};
pub use config::{AppConfig, DEFAULT_FALLBACK_VALUE};
pub use error::AppError;
pub use logging::{get_log_path, init_log_file, next_seq, write_log};
pub use session::{AppState, CompletedRecompute, PendingRecompute, Session};
