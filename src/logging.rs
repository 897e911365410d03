//! Structured logging via `tracing`.
//!
//! The store only emits events; installing a subscriber is left to the
//! embedding program (or the test harness) through [`init_logging`].

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{FsError, FsResult};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive: trace, debug, info, warn, error, off, or `filetree=debug` style
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Colored output
    #[serde(default)]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            ansi: false,
        }
    }
}

impl LoggingConfig {
    fn filter(&self) -> FsResult<EnvFilter> {
        if !self.enabled {
            return Ok(EnvFilter::new("off"));
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| FsError::Config(format!("invalid log filter `{}`: {}", self.level, e)))
    }
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// repeated calls (e.g. from several tests) are harmless.
pub fn init_logging(config: &LoggingConfig) -> FsResult<bool> {
    let filter = config.filter()?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();
    Ok(installed)
}
