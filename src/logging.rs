//! Structured logging setup for Cachegate
//!
//! Diagnostics go to stderr so command results on stdout stay parseable.
//! Events use structured fields:
//!
//! - `task`: Name of the task being resolved
//! - `category`: Caching-disabled reason category (e.g. "NOT_CACHEABLE")
//! - `message`: Caching-disabled reason message
//!
//! ```rust
//! use tracing::debug;
//!
//! debug!(task = "compileJava", category = "NON_CACHEABLE_OUTPUT", "caching disabled");
//! ```

use std::io::{self, IsTerminal};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// `<utc timestamp> LEVEL(cachegate): fields`
struct CachegateFormatter {
    with_ansi: bool,
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for CachegateFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        if self.with_ansi {
            write!(
                writer,
                "{} {}{:5}(cachegate)\x1b[0m: ",
                timestamp,
                level_color(level),
                level
            )?;
        } else {
            write!(writer, "{} {:5}(cachegate): ", timestamp, level)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored when stderr is a terminal
    Pretty,
    /// Plain text, for CI
    Compact,
    /// JSON, for log aggregation systems
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }

    /// Resolve the format from `CACHEGATE_LOG_FORMAT`, then `CI`, then config
    pub fn from_env(configured: &str) -> Self {
        let from_env = std::env::var("CACHEGATE_LOG_FORMAT").unwrap_or_default();
        if let Some(format) = Self::parse(&from_env) {
            return format;
        }
        if std::env::var("CI").is_ok() {
            return Self::Compact;
        }
        Self::parse(configured).unwrap_or(Self::Pretty)
    }
}

/// Initialize the global tracing subscriber
///
/// # Environment Variables
///
/// - `RUST_LOG`: Log filter, overrides `observability.log_level`
/// - `CACHEGATE_LOG_FORMAT`: "pretty", "compact" or "json"
/// - `CI`: If set, defaults to compact format
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let format = LogFormat::from_env(&config.log_format);

    let result = match format {
        LogFormat::Pretty | LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .event_format(CachegateFormatter {
                        with_ansi: format == LogFormat::Pretty && io::stderr().is_terminal(),
                    })
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(false)
                    .with_writer(io::stderr)
                    .json(),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("[cachegate] Logging already initialized: {}", e);
    }
}
