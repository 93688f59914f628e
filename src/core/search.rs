use crate::config::ScraperConfig;
use crate::core::query::{absolutize, build_search_url};
use crate::core::selectors::{LINK_ATTR, SEARCH_RESULT_LINK};
use crate::domain::model::SearchResult;
use crate::domain::ports::Page;
use crate::utils::error::{FaultContext, Result, ScrapeError};

/// Runs the site search and returns the first hit with an absolute link.
pub async fn resolve_first_result(
    page: &dyn Page,
    config: &ScraperConfig,
    query: &str,
) -> Result<SearchResult> {
    let search_url = build_search_url(config, query);
    tracing::info!("🔎 Navigating to search URL: {}", search_url);

    let search_timeout = || ScrapeError::SearchTimeout {
        query: query.to_string(),
    };

    match page.goto(&search_url, config.timeouts.search_navigation()).await {
        Err(e) if e.is_timeout() => {
            tracing::warn!("Search page timed out for query: \"{}\": {}", query, e);
            return Err(search_timeout());
        }
        other => other.or_fault(query)?,
    }

    match page
        .wait_for_selector(SEARCH_RESULT_LINK, config.timeouts.search_results())
        .await
    {
        Err(e) if e.is_timeout() => {
            tracing::warn!("Search results timeout or no results for query: \"{}\"", query);
            return Err(search_timeout());
        }
        other => other.or_fault(query)?,
    }

    let no_link = || ScrapeError::NoResultLink {
        query: query.to_string(),
    };

    let Some(first) = page.query_selector(SEARCH_RESULT_LINK).await.or_fault(query)? else {
        return Err(no_link());
    };

    let title = first
        .text_content()
        .await
        .or_fault(query)?
        .unwrap_or_default()
        .trim()
        .to_string();

    let link = first
        .get_attribute(LINK_ATTR)
        .await
        .or_fault(query)?
        .filter(|link| !link.trim().is_empty())
        .ok_or_else(|| {
            tracing::warn!("No phone link found for query: \"{}\"", query);
            no_link()
        })?;

    Ok(SearchResult {
        title,
        link: absolutize(&config.site_root(), link.trim()),
    })
}
