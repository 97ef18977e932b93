// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP fetching behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Polling loop settings
    #[serde(default)]
    pub poller: PollerConfig,

    /// Snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.base_url.trim().is_empty() {
            return Err(AppError::config("fetcher.base_url is empty"));
        }
        if !self.fetcher.base_url.starts_with("http") {
            return Err(AppError::config("fetcher.base_url must be an http(s) URL"));
        }
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::config("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::config("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.squad_toggle_selector.trim().is_empty() {
            return Err(AppError::config("fetcher.squad_toggle_selector is empty"));
        }
        if self.poller.interval_secs == 0 {
            return Err(AppError::config("poller.interval_secs must be > 0"));
        }
        if self.poller.max_concurrent == 0 {
            return Err(AppError::config("poller.max_concurrent must be > 0"));
        }
        Ok(())
    }

    /// URL of the fixtures page listing live/upcoming/concluded matches.
    pub fn fixtures_url(&self) -> String {
        format!(
            "{}/fixtures/match-list",
            self.fetcher.base_url.trim_end_matches('/')
        )
    }
}

/// HTTP client and fetching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL of the match site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// CSS selector for the per-team squad toggle buttons
    #[serde(default = "defaults::squad_toggle_selector")]
    pub squad_toggle_selector: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            squad_toggle_selector: defaults::squad_toggle_selector(),
        }
    }
}

/// Polling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Seconds to sleep between polling cycles
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,

    /// Maximum concurrent per-match detail fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Track matches as soon as they are discovered, not only once live
    #[serde(default)]
    pub track_upcoming: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: defaults::request_delay(),
            track_upcoming: false,
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the local JSON store
    #[serde(default = "defaults::storage_root")]
    pub root_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: defaults::storage_root(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (error/warn/info/debug/trace)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Fetcher defaults
    pub fn base_url() -> String {
        "https://crex.live".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; crickwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn squad_toggle_selector() -> String {
        ".playingxi-button".into()
    }

    // Poller defaults
    pub fn interval() -> u64 {
        60
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn request_delay() -> u64 {
        250
    }

    // Storage defaults
    pub fn storage_root() -> String {
        "data/storage".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
