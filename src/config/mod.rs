//! Configuration management for newswire.
//!
//! Configuration is read from `~/.config/newswire/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Provider API keys can also come from the environment (`NEWSAPI_KEY`,
//! `GUARDIAN_API_KEY`, `NYTIMES_API_KEY`), which wins over the file.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
pub const ENV_GUARDIAN_KEY: &str = "GUARDIAN_API_KEY";
pub const ENV_NYTIMES_KEY: &str = "NYTIMES_API_KEY";

/// Native page size of every provider request.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: u32,
    pub http: HttpConfig,
    pub newsapi: ProviderSettings,
    pub guardian: ProviderSettings,
    pub nytimes: ProviderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            http: HttpConfig::default(),
            newsapi: ProviderSettings::default(),
            guardian: ProviderSettings::default(),
            nytimes: ProviderSettings::default(),
        }
    }
}

/// Outbound HTTP settings shared by all provider clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("newswire/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Per-provider credentials and endpoint override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    /// Overrides the provider's public base URL (tests, proxies).
    pub base_url: Option<String>,
}

impl ProviderSettings {
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .unwrap_or(default)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().trim().is_empty()
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default().with_env());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config.with_env())
    }

    /// Get the default config file path: `~/.config/newswire/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newswire").join("config.toml"))
    }

    /// Apply API keys from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply API keys from an arbitrary lookup; blank values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (ENV_NEWSAPI_KEY, &mut self.newsapi),
            (ENV_GUARDIAN_KEY, &mut self.guardian),
            (ENV_NYTIMES_KEY, &mut self.nytimes),
        ];
        for (name, settings) in overrides {
            if let Some(key) = lookup(name).filter(|k| !k.trim().is_empty()) {
                settings.api_key = Some(key.trim().to_string());
            }
        }
        self
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newswire configuration
#
# API keys may be left empty here and supplied through the environment:
#   NEWSAPI_KEY, GUARDIAN_API_KEY, NYTIMES_API_KEY
# A provider without a key is still queried; it will simply fail and be
# left out of the merged results.

# Articles requested per provider call
page_size = 20

[http]
# Request timeout in seconds
timeout_secs = 10

[newsapi]
# api_key = ""
# base_url = "https://newsapi.org/v2"

[guardian]
# api_key = ""
# base_url = "https://content.guardianapis.com"

[nytimes]
# api_key = ""
# base_url = "https://api.nytimes.com"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
