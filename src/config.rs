//! Run configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. built-in defaults,
//! 2. an optional TOML file passed with `--config`,
//! 3. command line flags.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! subdir = "resized"        # Output directory, relative to PATH
//! log_file = "birt.log"     # Always written at DEBUG level
//! logging_level = "INFO"    # Console level: DEBUG, INFO, WARNING, ERROR, CRITICAL
//!
//! [resize]
//! filter = "lanczos3"       # nearest, triangle, catmull-rom, gaussian, lanczos3
//! jpeg_quality = 90         # 1-100, for JPEG output and the JPEG fallback
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::ResampleFilter;
use crate::logging::LogLevel;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SUBDIR: &str = "resized";
pub const DEFAULT_LOG_FILE: &str = "birt.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration. All fields have defaults; files override only what
/// they name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output directory, relative to the source directory.
    pub subdir: PathBuf,
    /// Log file, relative to the working directory.
    pub log_file: PathBuf,
    /// Console log level.
    pub logging_level: LogLevel,
    pub resize: ResizeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subdir: PathBuf::from(DEFAULT_SUBDIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            logging_level: LogLevel::default(),
            resize: ResizeConfig::default(),
        }
    }
}

/// Resampling and encoding settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: ResampleFilter,
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            jpeg_quality: 90,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub subdir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub logging_level: Option<LogLevel>,
    pub filter: Option<ResampleFilter>,
    pub jpeg_quality: Option<u32>,
}

impl Config {
    /// Load a config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command line values on top of this config.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(subdir) = overrides.subdir {
            self.subdir = subdir;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        if let Some(level) = overrides.logging_level {
            self.logging_level = level;
        }
        if let Some(filter) = overrides.filter {
            self.resize.filter = filter;
        }
        if let Some(quality) = overrides.jpeg_quality {
            self.resize.jpeg_quality = quality;
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subdir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("subdir must not be empty".into()));
        }
        if !self
            .subdir
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ConfigError::Validation(format!(
                "subdir must be a relative path without '..': {}",
                self.subdir.display()
            )));
        }
        if !(1..=100).contains(&self.resize.jpeg_quality) {
            return Err(ConfigError::Validation(
                "resize.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}
