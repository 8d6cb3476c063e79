//! Logging setup for the `validagen` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary so the core stays silent and side-effect free under test.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG` - full filter directives, overrides the level flag
//! - `VALIDAGEN_LOG_FORMAT` - `text` (default) or `json`
//! - `VALIDAGEN_LOG_INCLUDE_LOCATION` - `true` to print file:line

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Text,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read format and location settings from the environment.
    pub fn from_env(log_level: &str) -> Self {
        Self {
            log_level: log_level.to_string(),
            format: LogFormat::parse(
                &env::var("VALIDAGEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            ),
            include_location: env::var("VALIDAGEN_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Parsed level; unknown names fall back to INFO.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("Failed to initialize logging")
}
