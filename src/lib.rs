pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{ConfiguredLauncher, StaticHtmlLauncher};
pub use config::{BrowserMode, ScraperConfig};
pub use crate::core::scraper::Scraper;
pub use domain::model::{ErrorDescriptor, ScrapeOutcome, SpecCategory, SpecificationRecord};
pub use utils::error::{BrowserError, ScrapeError};

/// Scrapes `query` with configuration taken from the process environment.
pub async fn scrape(query: &str) -> ScrapeOutcome {
    match ScraperConfig::from_env() {
        Ok(config) => {
            let launcher = ConfiguredLauncher::from_config(&config);
            Scraper::new(launcher, config).scrape(query).await
        }
        Err(e) => {
            tracing::error!("❌ Invalid scraper environment: {}", e);
            ScrapeOutcome::Error(ErrorDescriptor::from(&ScrapeError::EnvironmentUnavailable {
                reason: e.to_string(),
            }))
        }
    }
}
