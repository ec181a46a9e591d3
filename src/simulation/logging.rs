//! Logging and tracing configuration
//!
//! Console output always goes to stderr so stdout stays free for the stdout
//! transport's JSON lines.

use std::io;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Keeps the non-blocking file writer flushing; drop it only at exit
#[derive(Debug)]
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting on the console
    pub json_format: bool,
    /// Daily-rolling log file directory, if logging to file
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "fleet-telemetry-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Level implied by the `--verbose` and `--debug` flags
    pub fn level_for_flags(verbose: bool, debug: bool) -> Level {
        if debug {
            Level::DEBUG
        } else if verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                self.level
            ))
        })
    }

    /// Initialize the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level. The returned guard must be
    /// held for as long as file logging should keep working.
    pub fn init(self) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        let registry = Registry::default().with(self.build_filter());

        let file_guard = match &self.log_directory {
            Some(log_dir) => {
                let file_appender = rolling::daily(log_dir, &self.log_file_prefix);
                let (file_writer, guard) = non_blocking(file_appender);
                let file_layer = fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_span_events(self.span_events());

                if self.json_format {
                    let console_layer = fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_span_events(self.span_events());
                    registry.with(file_layer).with(console_layer).try_init()?;
                } else {
                    let console_layer = fmt::layer()
                        .pretty()
                        .with_writer(io::stderr)
                        .with_ansi(self.enable_ansi)
                        .with_span_events(self.span_events());
                    registry.with(file_layer).with(console_layer).try_init()?;
                }
                Some(guard)
            }
            None => {
                if self.json_format {
                    let layer = fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_span_events(self.span_events());
                    registry.with(layer).try_init()?;
                } else {
                    let layer = fmt::layer()
                        .pretty()
                        .with_writer(io::stderr)
                        .with_ansi(self.enable_ansi)
                        .with_span_events(self.span_events());
                    registry.with(layer).try_init()?;
                }
                None
            }
        };

        info!("Logging initialized at level {}", self.level);
        Ok(LoggingGuard { _file_guard: file_guard })
    }
}
