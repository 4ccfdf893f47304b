//! Configuration management
//!
//! Loads the Wayfarer configuration from TOML at ~/.wayfarer/config.toml,
//! creating a default file on first run. Every field has a serde default, so
//! a partial (or empty) file is valid.
//!
//! The backend base URL resolves with the following priority:
//! 1. `WAYFARER_BASE_URL` environment variable
//! 2. `[backend] base_url` in the config file
//! 3. built-in default `http://localhost:5000`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or creating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Write(std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Core client settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Agent backend settings
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Core client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Agent backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the agent backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.wayfarer/config.toml)
    ///
    /// If the configuration file doesn't exist, a default one is created.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        let mut config = if config_path.exists() {
            Self::read_from_path(&config_path)?
        } else {
            Self::create_default(&config_path)?
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_from_path(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create a default configuration file and return its contents
    fn create_default(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }

        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(path, toml_string).map_err(ConfigError::Write)?;

        tracing::info!("created default config at {}", path.display());
        Ok(config)
    }

    /// Get the default configuration file path (~/.wayfarer/config.toml)
    fn default_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".wayfarer").join("config.toml"))
    }

    /// Apply environment overrides on top of the loaded file
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("WAYFARER_BASE_URL") {
            if !url.trim().is_empty() {
                self.backend.base_url = url;
            }
        }
    }
}
