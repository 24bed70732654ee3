//! Logging setup
//!
//! Logging is off unless `SHELF_LOG` is set (e.g. `SHELF_LOG=debug`).
//! CLI commands log to stderr; the TUI logs to a file so the terminal
//! is left alone.

use std::fs::File;

use shelf_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SHELF_LOG";

/// Build the filter for our crates at `level`
///
/// Analytics events are logged at info whenever analytics is enabled, even
/// without `SHELF_LOG`.
fn build_filter(level: Option<&str>, analytics: bool) -> Option<EnvFilter> {
    let mut directives = Vec::new();
    if let Some(level) = level {
        directives.push(format!("shelf_core={},shelf_cli={}", level, level));
    }
    if analytics {
        directives.push("shelf::analytics=info".to_string());
    }
    if directives.is_empty() {
        return None;
    }
    Some(EnvFilter::new(directives.join(",")))
}

/// Initialize stderr logging for CLI commands
pub fn init_cli_logging(config: &Config) {
    let level = std::env::var(LOG_ENV).ok();
    let Some(env_filter) = build_filter(level.as_deref(), config.analytics) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize file logging for the TUI
///
/// Logs to `config.log_file` or `{data_dir}/debug.log`.
pub fn init_tui_logging(config: &Config) {
    let level = std::env::var(LOG_ENV).ok();
    let Some(env_filter) = build_filter(level.as_deref(), config.analytics) else {
        return;
    };

    let log_path = config.log_path();
    if let Err(e) = config.ensure_data_dir() {
        eprintln!("Warning: Could not create data directory: {}", e);
        return;
    }
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
