//! Console and file logging.
//!
//! The subscriber is built as a [`Dispatch`] value and handed back to the
//! caller, which scopes it with `tracing::dispatcher::with_default`. Nothing
//! is installed globally, so tests can build their own.
//!
//! Two layers share one registry:
//!
//! - **console** (stderr) at the level chosen on the command line;
//! - **file** (truncated on start, no colors) always at DEBUG, with source
//!   line numbers.

use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Cannot create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Level names as accepted on the command line and in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[default]
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    /// Same as ERROR; `tracing` has nothing above it.
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Resolve the console level. `--quiet` beats `--verbose`, and both beat
/// `--logging-level`.
pub fn console_level(level: LogLevel, verbose: bool, quiet: bool) -> LogLevel {
    if quiet {
        LogLevel::Error
    } else if verbose {
        LogLevel::Debug
    } else {
        level
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub console_level: LogLevel,
    /// `None` disables the file layer.
    pub log_file: Option<PathBuf>,
}

/// Build the subscriber for one run.
pub fn build_dispatch(config: &LoggingConfig) -> Result<Dispatch, LoggingError> {
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(config.console_level.level_filter());

    let file = match &config.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::LogFile {
                path: path.clone(),
                source,
            })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_line_number(true)
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(console).with(file);
    Ok(Dispatch::new(subscriber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_map_to_tracing_levels() {
        assert_eq!(LogLevel::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::Info.level_filter(), LevelFilter::INFO);
        assert_eq!(LogLevel::Warning.level_filter(), LevelFilter::WARN);
        assert_eq!(LogLevel::Error.level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Critical.level_filter(), LevelFilter::ERROR);
    }

    #[test]
    fn quiet_beats_verbose_beats_level() {
        assert_eq!(console_level(LogLevel::Warning, false, false), LogLevel::Warning);
        assert_eq!(console_level(LogLevel::Warning, true, false), LogLevel::Debug);
        assert_eq!(console_level(LogLevel::Warning, false, true), LogLevel::Error);
        assert_eq!(console_level(LogLevel::Debug, true, true), LogLevel::Error);
    }

    #[test]
    fn level_parses_from_cli_names() {
        use clap::ValueEnum;
        assert_eq!(LogLevel::from_str("WARNING", false).unwrap(), LogLevel::Warning);
        assert_eq!(LogLevel::from_str("CRITICAL", false).unwrap(), LogLevel::Critical);
        assert!(LogLevel::from_str("TRACE", false).is_err());
    }

    #[test]
    fn file_layer_records_debug_even_when_console_is_quiet() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log_path = tmp.path().join("birt.log");
        let dispatch = build_dispatch(&LoggingConfig {
            console_level: LogLevel::Error,
            log_file: Some(log_path.clone()),
        })
        .unwrap();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!("file layer marker");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("file layer marker"), "log file: {content}");
        assert!(content.contains("DEBUG"));
    }

    #[test]
    fn log_file_is_truncated_on_start() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log_path = tmp.path().join("birt.log");
        std::fs::write(&log_path, "stale line from last run\n").unwrap();

        build_dispatch(&LoggingConfig {
            console_level: LogLevel::Info,
            log_file: Some(log_path.clone()),
        })
        .unwrap();

        assert_eq!(std::fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn unwritable_log_file_errors() {
        let result = build_dispatch(&LoggingConfig {
            console_level: LogLevel::Info,
            log_file: Some(PathBuf::from("/nonexistent/dir/birt.log")),
        });
        assert!(matches!(result, Err(LoggingError::LogFile { .. })));
    }

    #[test]
    fn console_only_dispatch_builds() {
        build_dispatch(&LoggingConfig {
            console_level: LogLevel::Info,
            log_file: None,
        })
        .unwrap();
    }
}
