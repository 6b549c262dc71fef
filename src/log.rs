/// File-based diagnostics for daily
/// Writes to ~/.daily/logs/daily.log, never to stdout
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `DAILY_LOG=debug`
pub const LOG_ENV: &str = "DAILY_LOG";

/// Install the global subscriber. Logging is skipped if the file cannot be opened.
pub fn init() {
    let log_path = determine_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

/// ~/.daily/logs/daily.log, or /tmp/daily.log without a home directory
fn determine_log_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".daily/logs/daily.log"),
        None => PathBuf::from("/tmp/daily.log"),
    }
}
