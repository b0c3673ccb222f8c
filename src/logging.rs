//! Structured logging setup.
//!
//! The crate itself only emits `tracing` events; applications decide where
//! they go. While a console owns the terminal, logs should go to a file so
//! they do not corrupt the screen.
//!
//! ```ignore
//! use flywheel_readline::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig {
//!     level: "debug".to_string(),
//!     file: Some("console.log".into()),
//! })?;
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Global flag to track if logging has been initialized
static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (trace, debug, info, warn, error)
    /// Can be overridden by the `RUST_LOG` environment variable
    pub level: String,

    /// Log file; stderr when `None`
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// `init_logging` already ran.
    #[error("logging already initialized")]
    AlreadyInitialized,

    /// The level string is not a valid filter.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// The log file could not be opened.
    #[error("failed to create log file: {0}")]
    FileCreate(#[from] io::Error),

    /// Another subscriber is already installed.
    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(String),
}

/// Initialize the global logging subscriber.
///
/// Subsequent calls return `Err(LogError::AlreadyInitialized)`.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LogError::InvalidFilter(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_names(true);

    let result = if let Some(path) = &config.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(io::stderr).try_init()
    };
    result.map_err(|e| LogError::SetSubscriber(e.to_string()))?;

    let _ = LOGGING_INITIALIZED.set(());
    tracing::debug!(level = %config.level, file = ?config.file, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        if std::env::var_os("RUST_LOG").is_some() || LOGGING_INITIALIZED.get().is_some() {
            return;
        }
        let config = LogConfig {
            level: "flywheel_readline=verbose".to_string(),
            file: None,
        };
        assert!(matches!(
            init_logging(&config),
            Err(LogError::InvalidFilter(_))
        ));
    }
}
