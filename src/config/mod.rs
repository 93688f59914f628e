#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::ConfigError;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const REMOTE_ENDPOINT_ENV: &str = "REMOTE_BROWSER_ENDPOINT";
pub const BROWSER_MODE_ENV: &str = "PHONE_SPECS_BROWSER";
pub const BASE_URL_ENV: &str = "PHONE_SPECS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://www.gsmarena.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How a browser session is acquired for each scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BrowserMode {
    /// Connect to a remote browser over CDP (`REMOTE_BROWSER_ENDPOINT`).
    #[default]
    Remote,
    /// Launch a local headless Chromium.
    Local,
    /// Fetch pages over plain HTTP and parse the returned markup.
    Http,
}

impl fmt::Display for BrowserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrowserMode::Remote => "remote",
            BrowserMode::Local => "local",
            BrowserMode::Http => "http",
        };
        f.write_str(name)
    }
}

impl FromStr for BrowserMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(BrowserMode::Remote),
            "local" => Ok(BrowserMode::Local),
            "http" => Ok(BrowserMode::Http),
            other => Err(ConfigError::InvalidConfigValueError {
                field: "browser".to_string(),
                value: other.to_string(),
                reason: "Valid modes: remote, local, http".to_string(),
            }),
        }
    }
}

/// Bounded waits, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub search_navigation_ms: u64,
    pub search_results_ms: u64,
    pub detail_navigation_ms: u64,
    pub specs_container_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            search_navigation_ms: 30_000,
            search_results_ms: 15_000,
            detail_navigation_ms: 20_000,
            specs_container_ms: 10_000,
        }
    }
}

impl TimeoutConfig {
    pub fn search_navigation(&self) -> Duration {
        Duration::from_millis(self.search_navigation_ms)
    }

    pub fn search_results(&self) -> Duration {
        Duration::from_millis(self.search_results_ms)
    }

    pub fn detail_navigation(&self) -> Duration {
        Duration::from_millis(self.detail_navigation_ms)
    }

    pub fn specs_container(&self) -> Duration {
        Duration::from_millis(self.specs_container_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub search_path: String,
    pub search_param: String,
    pub user_agent: String,
    pub browser: BrowserMode,
    pub remote_endpoint: Option<String>,
    pub timeouts: TimeoutConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: "res.php3".to_string(),
            search_param: "sSearch".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browser: BrowserMode::default(),
            remote_endpoint: None,
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Defaults overlaid with process environment.
    ///
    /// An unset `REMOTE_BROWSER_ENDPOINT` is not an error here; the scrape
    /// reports it when it tries to acquire a browser.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(endpoint) = non_blank_env(REMOTE_ENDPOINT_ENV) {
            self.remote_endpoint = Some(endpoint);
        }
        if let Some(mode) = non_blank_env(BROWSER_MODE_ENV) {
            self.browser = mode.parse()?;
        }
        if let Some(base_url) = non_blank_env(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        Ok(())
    }

    /// The base URL with exactly one trailing `/`.
    pub fn site_root(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Validate for ScraperConfig {
    fn validate(&self) -> crate::utils::validation::Result<()> {
        validate_url("base_url", &self.base_url, &["http", "https"])?;
        validate_non_empty_string("search_path", &self.search_path)?;
        validate_non_empty_string("search_param", &self.search_param)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;

        if let Some(endpoint) = &self.remote_endpoint {
            validate_url("remote_endpoint", endpoint, &["ws", "wss", "http", "https"])?;
        }

        validate_positive_number("timeouts.search_navigation_ms", self.timeouts.search_navigation_ms, 1)?;
        validate_positive_number("timeouts.search_results_ms", self.timeouts.search_results_ms, 1)?;
        validate_positive_number("timeouts.detail_navigation_ms", self.timeouts.detail_navigation_ms, 1)?;
        validate_positive_number("timeouts.specs_container_ms", self.timeouts.specs_container_ms, 1)?;

        tracing::debug!("✅ Scraper configuration validation passed");
        Ok(())
    }
}
