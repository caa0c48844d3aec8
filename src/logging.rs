//! Logging initialization.
//!
//! TUI mode: logs to `<state>/logs/gestelit-{datetime}.log` (the terminal
//! is owned by ratatui). CLI mode: logs to stderr.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub struct LoggingHandle {
    /// Guard that must be kept alive for the duration of the program.
    /// When dropped, ensures all buffered logs are flushed.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging based on mode and configuration. `RUST_LOG` overrides
/// the configured level; `debug_override` (the `--debug` flag) forces debug.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let log_level = if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };

    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or(log_level));

    if is_tui_mode && config.logging.to_file {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)?;

        let log_file_path = session_log_path(&logs_dir);
        let log_filename = log_file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false) // No ANSI codes in log files
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

/// One log file per console session, named by UTC start time.
fn session_log_path(logs_dir: &Path) -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    logs_dir.join(format!("gestelit-{timestamp}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_logs_path_created_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let logs_dir = config.logs_path();
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_session_log_named_by_start_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = session_log_path(temp_dir.path());

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("gestelit-"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent(), Some(temp_dir.path()));
    }

    // The global subscriber can only be installed once per process, so a
    // single test exercises init_logging.
    #[test]
    fn test_cli_mode_logs_to_stderr_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let handle = init_logging(&config, false, false).unwrap();
        assert!(handle.log_file_path.is_none());
        assert!(handle._guard.is_none());
        // No logs directory is created in CLI mode
        assert!(!config.logs_path().exists());
    }
}
