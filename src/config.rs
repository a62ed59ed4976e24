//! Configuration management and validation.
//!
//! Provides configuration structures for output formatting, read strictness
//! and logging, with layered loading from defaults, a TOML file, environment
//! variables and command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_OPTION_FIELD_WIDTH, DEFAULT_VALUE_DECIMALS,
    ENV_ATOMIC_WRITES, ENV_LOG_LEVEL,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output formatting and file writing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Width of the card-name field in project option lines
    pub option_field_width: usize,

    /// Decimal places for precipitation values
    pub value_decimals: usize,

    /// Write to a temporary file and rename it into place
    pub atomic_writes: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            option_field_width: DEFAULT_OPTION_FIELD_WIDTH,
            value_decimals: DEFAULT_VALUE_DECIMALS,
            atomic_writes: true,
        }
    }
}

/// Read-side validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Require the distinct timestamp count of an event to equal NRPDS
    pub strict_period_count: bool,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            strict_period_count: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level for the gssha_io target
    pub level: String,

    /// Timestamped output (false = compact)
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            structured: true,
        }
    }
}

/// Global configuration for GSSHA file I/O
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub read: ReadConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Create configuration with a custom option field width
    pub fn with_option_field_width(mut self, width: usize) -> Self {
        self.io.option_field_width = width;
        self
    }

    /// Disable temp-file-then-rename writes
    pub fn without_atomic_writes(mut self) -> Self {
        self.io.atomic_writes = false;
        self
    }

    /// Accept events whose distinct timestamp count differs from NRPDS
    pub fn with_lenient_periods(mut self) -> Self {
        self.read.strict_period_count = false;
        self
    }

    /// Default config file location (`<config dir>/gssha-io/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration using layered approach (defaults -> file -> env)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        if let Some(raw) = lookup(ENV_ATOMIC_WRITES) {
            self.io.atomic_writes = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(Error::configuration(format!(
                        "{} must be a boolean, got '{}'",
                        ENV_ATOMIC_WRITES, other
                    )));
                }
            };
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.io.option_field_width == 0 {
            return Err(Error::configuration(
                "Option field width must be greater than 0",
            ));
        }

        if self.io.value_decimals > 10 {
            return Err(Error::configuration(
                "Value decimals cannot exceed 10",
            ));
        }

        Ok(())
    }
}
