//! # Structured Logging
//!
//! Design stages emit `tracing` events: `debug` for each stage, `info` when a
//! full design completes and `warn` on numerical degradation (imaginary
//! residue above tolerance, cutoff close to Nyquist). This module installs a
//! subscriber for them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use iirdes_core::observe::{init_logging, LogConfig, LogFormat, LogLevel};
//!
//! init_logging(&LogConfig {
//!     level: LogLevel::Debug,
//!     format: LogFormat::Compact,
//!     ..Default::default()
//! });
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    /// Only numerical-degradation warnings and above
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable)
    Json,
    /// Pretty format (human-readable, colored)
    Pretty,
    /// Compact format (one line per event)
    #[default]
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Include thread names, useful with batch designs
    pub thread_names: bool,
    /// Directive filter (e.g. "iirdes_core::filters=debug"), overrides `level`
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            source_location: false,
            thread_names: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose configuration showing every design stage.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            thread_names: true,
            ..Default::default()
        }
    }

    /// Warnings only, so just numerical degradation is reported.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Warn,
            ..Default::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        match &self.filter {
            Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }
}

/// Initialize the global logging subscriber.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one stays in place.
pub fn init_logging(config: &LogConfig) -> bool {
    let layer = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_names(config.thread_names);

    let layer = match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(layer)
        .try_init()
        .is_ok()
}
