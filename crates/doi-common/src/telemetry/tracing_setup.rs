//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.

use std::env;

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter used when `RUST_LOG` is unset
    pub level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread names
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: true,
            file_line: true,
            thread_names: true,
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
            thread_names: false,
        }
    }

    /// Preset for the environment, adjusted by `LOG_FORMAT` (`json|pretty`)
    /// and `LOG_LEVEL`. Unrecognised values keep the preset.
    #[must_use]
    pub fn from_env(environment: Environment) -> Self {
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
        };

        if let Ok(format) = env::var("LOG_FORMAT") {
            match format.trim().to_lowercase().as_str() {
                "json" => config.json = true,
                "pretty" | "text" => config.json = false,
                _ => {}
            }
        }

        if let Some(level) = env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level.trim().parse::<Level>().ok())
        {
            config.level = level;
        }

        config
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_file(self.file_line)
            .with_line_number(self.file_line)
            .with_thread_names(self.thread_names)
            .with_span_events(span_events);

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

/// Initialize the tracing subscriber with default configuration
///
/// Uses `RUST_LOG` environment variable for filtering if set,
/// otherwise defaults to "info" level.
///
/// # Panics
/// Panics if the subscriber cannot be initialized (usually means it's already set).
pub fn init_tracing() {
    init_tracing_with_config(&TracingConfig::default());
}

/// Initialize the tracing subscriber with custom configuration
///
/// # Panics
/// Panics if the subscriber cannot be initialized (usually means it's already set).
pub fn init_tracing_with_config(config: &TracingConfig) {
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(config.fmt_layer())
        .init();
}

/// Try to initialize tracing, returning Ok if successful
///
/// Unlike `init_tracing`, this function will not panic if called multiple times.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Try to initialize tracing with custom configuration
///
/// Unlike `init_tracing_with_config`, this function will not panic if called multiple times.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(config.fmt_layer())
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
