// Adapters layer: concrete browser capabilities and strategy selection.

#[cfg(feature = "chromium")]
pub mod chromium;
pub mod static_html;

use crate::config::{BrowserMode, ScraperConfig};
use crate::domain::ports::{BrowserLauncher, BrowserSession};
use crate::utils::error::{BrowserError, BrowserResult};
use async_trait::async_trait;
use scraper::Selector;
use std::fmt;

pub use static_html::StaticHtmlLauncher;

/// Where a CDP browser comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromiumTarget {
    Launch,
    Connect(String),
}

impl ChromiumTarget {
    /// Whether closing the session should shut the browser down. A remote
    /// browser belongs to its service; we only leave it.
    pub fn owns_browser(&self) -> bool {
        matches!(self, ChromiumTarget::Launch)
    }
}

impl fmt::Display for ChromiumTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromiumTarget::Launch => f.write_str("local Chromium launch"),
            ChromiumTarget::Connect(endpoint) => write!(f, "remote browser connection to {}", endpoint),
        }
    }
}

/// Parses a CSS selector up front so a malformed one fails as
/// `InvalidSelector` instead of looking like an absent element.
pub(crate) fn parse_selector(selector: &str) -> BrowserResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| BrowserError::InvalidSelector(format!("{}: {}", selector, e)))
}

/// Picks the acquisition strategy named by `ScraperConfig::browser`.
#[derive(Debug, Clone)]
pub struct ConfiguredLauncher {
    mode: BrowserMode,
    remote_endpoint: Option<String>,
    user_agent: String,
}

impl ConfiguredLauncher {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            mode: config.browser,
            remote_endpoint: config.remote_endpoint.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    fn remote_target(&self) -> BrowserResult<ChromiumTarget> {
        self.remote_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .map(|endpoint| ChromiumTarget::Connect(endpoint.to_string()))
            .ok_or_else(|| {
                tracing::error!("REMOTE_BROWSER_ENDPOINT is not set");
                BrowserError::Unavailable("Remote browser endpoint not configured.".to_string())
            })
    }

    #[cfg(feature = "chromium")]
    async fn launch_chromium(&self, target: ChromiumTarget) -> BrowserResult<Box<dyn BrowserSession>> {
        chromium::ChromiumLauncher::new(target, self.user_agent.clone())
            .launch()
            .await
    }

    #[cfg(not(feature = "chromium"))]
    async fn launch_chromium(&self, target: ChromiumTarget) -> BrowserResult<Box<dyn BrowserSession>> {
        Err(BrowserError::Unavailable(format!(
            "{} requires the `chromium` feature; use the `http` browser mode instead.",
            target
        )))
    }
}

#[async_trait]
impl BrowserLauncher for ConfiguredLauncher {
    async fn launch(&self) -> BrowserResult<Box<dyn BrowserSession>> {
        tracing::debug!("Acquiring browser session (mode: {})", self.mode);
        match self.mode {
            BrowserMode::Http => StaticHtmlLauncher::new(self.user_agent.clone()).launch().await,
            BrowserMode::Remote => {
                let target = self.remote_target()?;
                self.launch_chromium(target).await
            }
            BrowserMode::Local => self.launch_chromium(ChromiumTarget::Launch).await,
        }
    }
}
