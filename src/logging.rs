//! Tracing integration for structured logging.
//!
//! The game owns the terminal, so log output never goes to stdout or stderr.
//! Logs are written to a file when one is configured and dropped otherwise.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file path.
pub const LOG_FILE_ENV: &str = "THREES_LOG";
/// Verbosity, 0 (error) to 4 (trace).
pub const LOG_LEVEL_ENV: &str = "THREES_LOG_LEVEL";
/// `text` or `json`.
pub const LOG_FORMAT_ENV: &str = "THREES_LOG_FORMAT";

const DEFAULT_VERBOSITY: u8 = 2;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    pub verbosity: u8,
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            verbosity: lookup(LOG_LEVEL_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_VERBOSITY),
            file: lookup(LOG_FILE_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            format: lookup(LOG_FORMAT_ENV)
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}

fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Filter directive covering every crate of the game at `verbosity`.
pub fn filter_directive(verbosity: u8) -> String {
    let level = level_name(verbosity);
    [
        "terminal_threes",
        "input_test",
        "threes_core",
        "threes_input",
        "threes_style",
        "threes_term",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}

/// Initialize the logging system.
///
/// * `verbosity` - 0=error, 1=warn, 2=info, 3=debug, 4+=trace
/// * `log_file` - file to append to; with `None` no subscriber is installed
/// * `format` - text or JSON
///
/// `RUST_LOG` overrides the filter computed from `verbosity`.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>, format: LogFormat) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(verbosity >= 3)
                    .with_line_number(verbosity >= 3),
            )
            .try_init()
            .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(file))
            .try_init()
            .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?,
    }

    Ok(())
}

/// [`init_logging`] driven by `THREES_LOG`, `THREES_LOG_LEVEL` and `THREES_LOG_FORMAT`.
pub fn init_from_env() -> Result<()> {
    let settings = LogSettings::from_env();
    init_logging(settings.verbosity, settings.file.as_deref(), settings.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> LogSettings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults_log_nowhere() {
        let s = settings(&[]);
        assert_eq!(s.verbosity, 2);
        assert_eq!(s.file, None);
        assert_eq!(s.format, LogFormat::Text);
    }

    #[test]
    fn test_settings_from_vars() {
        let s = settings(&[
            (LOG_FILE_ENV, "/tmp/threes.log"),
            (LOG_LEVEL_ENV, "4"),
            (LOG_FORMAT_ENV, "JSON"),
        ]);
        assert_eq!(s.verbosity, 4);
        assert_eq!(s.file, Some(PathBuf::from("/tmp/threes.log")));
        assert_eq!(s.format, LogFormat::Json);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let s = settings(&[(LOG_LEVEL_ENV, "loud"), (LOG_FORMAT_ENV, "xml")]);
        assert_eq!(s.verbosity, 2);
        assert_eq!(s.format, LogFormat::Text);
    }

    #[test]
    fn test_filter_directive() {
        let d = filter_directive(3);
        assert!(d.contains("threes_term=debug"));
        assert!(d.contains("terminal_threes=debug"));
        assert!(filter_directive(9).contains("threes_core=trace"));
    }

    #[test]
    fn test_no_file_installs_nothing() {
        init_logging(4, None, LogFormat::Json).unwrap();
    }
}
