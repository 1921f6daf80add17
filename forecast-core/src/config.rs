//! Service configuration.
//!
//! Values come from the TOML file under the platform config directory and
//! are then overridden by environment variables:
//!
//! - `OPENWEATHERMAP_API_KEY` - upstream API key
//! - `HOST` / `PORT` - listen address (default `127.0.0.1:8111`)
//! - `LOG_FORMAT` - `text` or `json` (default `text`)
//! - `FORECAST_UPSTREAM_URL` - forecast endpoint (default OpenWeatherMap)

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_FORECAST_URL;

pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// host = "0.0.0.0"
/// port = 8111
/// log_format = "json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub log_format: String,
    pub upstream_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "127.0.0.1".to_string(),
            port: 8111,
            log_format: "text".to_string(),
            upstream_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "zip-forecast", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply environment overrides. Unparseable numbers are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.log_format = format;
        }
        if let Ok(url) = env::var("FORECAST_UPSTREAM_URL") {
            self.upstream_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be between 1 and 65535");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", self.log_format);
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://")
        {
            anyhow::bail!(
                "FORECAST_UPSTREAM_URL must start with 'http://' or 'https://', got '{}'",
                self.upstream_url
            );
        }

        Ok(())
    }

    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load the config file, apply environment overrides and validate.
///
/// Expects `.env` (if any) to be loaded already.
pub fn load() -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_env();
    config.validate()?;
    Ok(config)
}
