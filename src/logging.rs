//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: fatal errors that abort a run
//! - `warn`: non-fatal schema oddities (e.g. a numeric column that is not numeric)
//! - `info`: stage progress, record counts, column distributions
//! - `debug`: renames, headers
//! - `trace`: per-value phone tokenization (contains personal data)
//!
//! `RUST_LOG` overrides the configured level.

use std::io;

use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this crate when `RUST_LOG` is unset.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Initialize the global tracing subscriber, logging to stderr with timestamps.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.level)));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false);

    tracing_subscriber::registry().with(filter).with(layer).try_init()
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// External crates stay at warn level to reduce noise.
fn default_directives(level: Level) -> String {
    format!(
        "warn,policyholders_transform={}",
        level.as_str().to_lowercase()
    )
}
