//! Configuration management for the registry board
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (board.toml)
//! - Environment variables (BOARD_*)
//! - Legacy variables `SCHEMA_REGISTRY_URL` / `REGISTRY_BASE_URL` and `LOG_LEVEL`
//!
//! ## Example config file (board.toml):
//! ```toml
//! [registry]
//! url = "http://schema-registry:8081"
//! timeout_secs = 10
//! connect_timeout_secs = 5
//! verbose_compatibility = false
//!
//! [logging]
//! level = "info"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{BoardError, Result};

/// Legacy variables that name the registry URL, highest precedence last
const REGISTRY_URL_VARS: [&str; 2] = ["REGISTRY_BASE_URL", "SCHEMA_REGISTRY_URL"];

/// Main configuration for the board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the schema registry REST API
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Ask the registry to explain incompatibilities
    #[serde(default)]
    pub verbose_compatibility: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "registry_board=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_registry_url() -> String {
    "http://schema-registry:8081".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            verbose_compatibility: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RegistryConfig {
    /// Parsed base URL; must be absolute http(s)
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| BoardError::InvalidConfig(format!("registry url {:?}: {}", self.url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(BoardError::InvalidConfig(format!(
                "registry url must be http or https, got {}",
                other
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl BoardConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file when given
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["board.toml", ".board.toml", "config/board.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "registry-board", "board") {
            let xdg_config = config_dir.config_dir().join("board.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (BOARD_REGISTRY__URL, ...)
        builder = builder.add_source(
            Environment::with_prefix("BOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        for var in REGISTRY_URL_VARS {
            builder = builder.set_override_option("registry.url", non_empty_env(var))?;
        }
        // LOG_LEVEL historically takes upper-case names (DEBUG, WARN)
        builder = builder.set_override_option(
            "logging.level",
            non_empty_env("LOG_LEVEL").map(|level| level.to_lowercase()),
        )?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject settings the client cannot run with
    pub fn validate(&self) -> Result<()> {
        self.registry.base_url()?;
        if self.registry.timeout_secs == 0 {
            return Err(BoardError::InvalidConfig("registry.timeout_secs must be positive".to_string()));
        }
        if self.registry.connect_timeout_secs == 0 {
            return Err(BoardError::InvalidConfig(
                "registry.connect_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}
