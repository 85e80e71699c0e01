//! Configuration module for the energy dashboard
//!
//! Loads configuration from a TOML file:
//! - [default] - General settings (log_level)
//! - [tariff] - Energy price used for the cost projection
//! - [source] - Where device readings come from

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::Tariff;
use crate::device::{default_catalog, ApplianceProfile};

/// Log level for the application
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing LevelFilter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,
    #[serde(default)]
    pub tariff: Tariff,
    #[serde(default)]
    pub source: SourceConfig,
}

/// General application settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DefaultConfig {
    /// Log level: TRACE, DEBUG, INFO, WARN, ERROR
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Device reading source configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Seed for reproducible mock readings
    #[serde(default)]
    pub seed: Option<u64>,

    /// JSON device set to load instead of generating mock readings
    #[serde(default)]
    pub devices_file: Option<PathBuf>,

    /// Appliances the mock source generates readings for
    #[serde(default = "default_catalog")]
    pub appliances: Vec<ApplianceProfile>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            seed: None,
            devices_file: None,
            appliances: default_catalog(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the config.toml file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration logic (semantic validation beyond type checks)
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.tariff.price_per_kwh.is_finite() || self.tariff.price_per_kwh < 0.0 {
            return Err(ConfigError::ValidationError(
                "tariff.price_per_kwh must be a non-negative number".to_string(),
            ));
        }

        if self.tariff.days_per_month == 0 {
            return Err(ConfigError::ValidationError(
                "tariff.days_per_month must be greater than 0".to_string(),
            ));
        }

        // Appliances are only used by the mock source
        if self.source.devices_file.is_none() {
            for appliance in &self.source.appliances {
                appliance
                    .validate()
                    .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
            }
        }

        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
