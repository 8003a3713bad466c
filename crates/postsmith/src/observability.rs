//! Tracing subscriber setup.

use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration for the binary.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset (e.g., "info", "postsmith=debug")
    pub log_level: String,
    /// Emit one JSON object per event instead of human-readable lines
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Configuration honoring `RUST_LOG`, falling back to `info`.
    pub fn new() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// `log_level` is used as the filter directive as-is; [`ObservabilityConfig::new`]
/// seeds it from `RUST_LOG`. Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.log_level)?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
