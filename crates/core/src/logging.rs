//! Structured logging utilities for Skilldir.
//!
//! Provides enhanced logging with contextual fields and formatting options.

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard single-line format
    /// Output: `2025-01-15T10:30:45.123456Z  INFO target: message key=value`
    Full,
    /// Human-readable multi-line format with colors (for development debugging)
    Pretty,
    /// Compact single-line format without timestamp details
    Compact,
    /// JSON format (for production log aggregation)
    Json,
}

#[allow(clippy::derivable_impls)]
impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        {
            LogFormat::Full
        }
        #[cfg(not(debug_assertions))]
        {
            LogFormat::Json
        }
    }
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Whether to include file/line numbers
    pub include_location: bool,
    /// Whether to include target module
    pub include_target: bool,
    /// Whether to include thread IDs
    pub include_thread_id: bool,
    /// Whether to log span events (enter/exit/close)
    pub log_spans: bool,
    /// Whether to use ANSI colors (None = auto-detect based on TTY)
    pub ansi: Option<bool>,
    /// Environment filter (e.g., "info,skilldir=debug")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            include_location: cfg!(debug_assertions),
            include_target: false,
            include_thread_id: false,
            log_spans: cfg!(debug_assertions),
            ansi: None, // Auto-detect
            filter: None,
        }
    }
}

/// Initialize structured logging with configuration
///
/// # Examples
///
/// ```no_run
/// use skilldir_core::logging::{LogConfig, LogFormat, init_logging};
///
/// // Production: JSON format
/// let config = LogConfig {
///     format: LogFormat::Json,
///     filter: Some("info".to_string()),
///     ..Default::default()
/// };
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = if let Some(filter) = &config.filter {
        EnvFilter::try_new(filter)?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,skilldir=debug"))
    };

    // Auto-detect ANSI support based on TTY, or use explicit setting
    let ansi = config.ansi.unwrap_or_else(|| std::io::stdout().is_terminal());

    let fmt_span = if config.log_spans { FmtSpan::NEW | FmtSpan::CLOSE } else { FmtSpan::NONE };

    match config.format {
        LogFormat::Full => {
            let fmt_layer = fmt::layer().with_target(config.include_target).with_filter(env_filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        },
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(ansi)
                .with_target(config.include_target)
                .with_thread_ids(config.include_thread_id)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_span_events(fmt_span)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        },
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(ansi)
                .with_target(config.include_target)
                .with_span_events(fmt_span)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        },
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(config.include_thread_id)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_span_events(fmt_span)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        },
    }

    Ok(())
}
