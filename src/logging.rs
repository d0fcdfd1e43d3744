//! # Logging
//!
//! Structured logging on top of `tracing` / `tracing-subscriber`.
//!
//! Configuration comes from the environment:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `CWEB_LOG_LEVEL` | `info` | Base level when `RUST_LOG` is unset |
//! | `CWEB_LOG_FORMAT` | `json` | `json` or `pretty` |
//! | `CWEB_LOG_FILTER` | unset | Extra comma-separated directives, e.g. `cweb::router=debug` |
//! | `CWEB_LOG_LOCATION` | `false` | Include file and line number |
//!
//! `RUST_LOG`, when set, replaces the base level entirely.

use anyhow::{Context as _, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Anything other than `pretty` selects JSON
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub format: LogFormat,
    pub target_filter: Option<String>,
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("CWEB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("CWEB_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("CWEB_LOG_FILTER").ok(),
            include_location: env::var("CWEB_LOG_LOCATION")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        // Connection resets are logged by the transport at info; keep them quiet.
        if let Ok(directive) = "may_minihttp=warn".parse() {
            filter = filter.add_directive(directive);
        }

        if let Some(extra) = &self.target_filter {
            for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(_) => eprintln!("Warning: invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

/// [`init_logging_with_config`] with [`LogConfig::from_env`]
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}
