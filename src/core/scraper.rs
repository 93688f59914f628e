use crate::config::ScraperConfig;
use crate::core::{extract, search};
use crate::domain::model::{ScrapeOutcome, SpecificationRecord};
use crate::domain::ports::{BrowserLauncher, BrowserSession};
use crate::utils::error::{FaultContext, Result, ScrapeError};

/// Looks up one phone per call: search, open the first hit, read its
/// specification tables.
///
/// Each call acquires its own session from the launcher and releases it
/// before returning, whatever the outcome.
pub struct Scraper<L: BrowserLauncher> {
    launcher: L,
    config: ScraperConfig,
}

impl<L: BrowserLauncher> Scraper<L> {
    pub fn new(launcher: L, config: ScraperConfig) -> Self {
        Self { launcher, config }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub async fn scrape(&self, query: &str) -> ScrapeOutcome {
        tracing::info!("🚀 Starting scrape for: \"{}\"", query);

        let result = match self.launcher.launch().await {
            Ok(mut session) => {
                let result = self.run(session.as_ref(), query).await;
                release(session.as_mut()).await;
                result
            }
            Err(e) => Err(ScrapeError::environment(e)),
        };

        match &result {
            Ok(record) => tracing::info!(
                "✅ Scraping successful for: \"{}\" ({} categories)",
                query,
                record.categories().len()
            ),
            Err(e) => {
                tracing::error!("❌ Scrape failed ({:?}): {}", e.kind(), e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
            }
        }
        ScrapeOutcome::from(result)
    }

    async fn run(&self, session: &dyn BrowserSession, query: &str) -> Result<SpecificationRecord> {
        let page = session.new_page().await.or_fault(query)?;

        let result = search::resolve_first_result(page.as_ref(), &self.config, query).await?;
        tracing::info!(
            "📱 Found \"{}\". Navigating to details page: {}",
            result.title,
            result.link
        );

        extract::load_detail_page(page.as_ref(), &self.config, &result, query).await?;
        extract::extract_record(page.as_ref(), &self.config, &result, query).await
    }
}

async fn release(session: &mut dyn BrowserSession) {
    if !session.is_connected() {
        return;
    }
    tracing::info!("Closing browser connection.");
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }
}
