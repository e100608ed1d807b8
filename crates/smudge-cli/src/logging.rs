//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! All logging is routed through `tracing` spans for consistent observability.
//! Logs go to stderr (or a file); the run summary owns stdout.
//!
//! # Log Levels
//!
//! - `error`: fatal load, parse and write failures
//! - `warn`: default; nothing is logged on a clean run
//! - `info`: stage progress, row counts per group
//! - `debug`: per-field changes (values redacted unless `--log-data`)
//! - `trace`: every field touched by a corruption pass
//!
//! # Usage
//!
//! ```ignore
//! use smudge_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default().with_level(LevelFilter::DEBUG);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when row-level logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append logs to this file instead of stderr. File output carries timestamps.
    pub log_file: Option<PathBuf>,
    /// Whether row values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines, one per event plus one per closed stage span.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Set log level directly and ignore `RUST_LOG`.
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self.use_env_filter = false;
        self
    }

    /// Set output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Send logs to a file.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Enable or disable row-level logging of field values.
    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// This should be called once at application startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let subscriber = build_subscriber(config)?;
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    subscriber.try_init().map_err(io::Error::other)
}

/// Build the subscriber for `config` without installing it.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn build_subscriber(
    config: &LogConfig,
) -> io::Result<impl Subscriber + Send + Sync + 'static> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    Ok(tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(format_layer(config, writer)))
}

fn format_layer<S>(config: &LogConfig, writer: BoxMakeWriter) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let timestamps = config.log_file.is_some();
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(false).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(false).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Default directives: the configured level for the workspace crates.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    format!(
        "{level},smudge_cli={level},smudge_ingest={level},smudge_model={level},\
         smudge_output={level},smudge_transform={level}"
    )
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let directives = default_directives(config.level_filter);
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    } else {
        EnvFilter::new(directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("debug,"));
        for krate in [
            "smudge_cli",
            "smudge_ingest",
            "smudge_model",
            "smudge_output",
            "smudge_transform",
        ] {
            assert!(directives.contains(&format!("{krate}=debug")));
        }
    }

    #[test]
    fn explicit_level_disables_env_override() {
        let config = LogConfig::default().with_level(LevelFilter::TRACE);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn json_log_file_receives_events_and_span_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smudge.log");
        let config = LogConfig::default()
            .with_level(LevelFilter::INFO)
            .with_format(LogFormat::Json)
            .with_log_file(&path);
        let subscriber = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            let _stage = tracing::info_span!("load").entered();
            tracing::info!(rows = 3, "dataset loaded");
            tracing::debug!("filtered out");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["fields"]["message"], "dataset loaded");
        assert_eq!(lines[0]["fields"]["rows"], 3);
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["fields"]["message"], "close");
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::default().with_log_file(dir.path().join("missing").join("x.log"));
        assert!(build_subscriber(&config).is_err());
    }

    #[test]
    fn redaction_is_default() {
        assert!(!LogConfig::default().log_data);
        assert!(!LogConfig::default().with_log_data(false).log_data);
        assert_eq!(
            LogConfig::default().with_format(LogFormat::Json).format,
            LogFormat::Json
        );
    }
}
