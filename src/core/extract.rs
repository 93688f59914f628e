use crate::config::ScraperConfig;
use crate::core::query::absolutize;
use crate::core::selectors::{
    CATEGORY_HEADER, IMAGE_ATTR, MAIN_IMAGE, PHONE_NAME_TITLE, SPECS_CONTAINER, SPEC_LABEL,
    SPEC_ROW, SPEC_TABLE, SPEC_VALUE,
};
use crate::domain::model::{SearchResult, SpecCategory, SpecificationRecord};
use crate::domain::ports::{ElementHandle, Page};
use crate::utils::error::{BrowserResult, FaultContext, Result, ScrapeError};

/// Opens the detail page and waits for the specs container.
pub async fn load_detail_page(
    page: &dyn Page,
    config: &ScraperConfig,
    result: &SearchResult,
    query: &str,
) -> Result<()> {
    let detail_timeout = || ScrapeError::DetailTimeout {
        title: result.title.clone(),
    };

    match page
        .goto(&result.link, config.timeouts.detail_navigation())
        .await
    {
        Err(e) if e.is_timeout() => {
            tracing::warn!("Details page timeout for: \"{}\": {}", result.title, e);
            return Err(detail_timeout());
        }
        other => other.or_fault(query)?,
    }

    match page
        .wait_for_selector(SPECS_CONTAINER, config.timeouts.specs_container())
        .await
    {
        Err(e) if e.is_timeout() => {
            tracing::warn!(
                "Details page timeout or specs list not found for: \"{}\"",
                result.title
            );
            Err(detail_timeout())
        }
        other => other.or_fault(query),
    }
}

/// Reads name, image and every specification table of the loaded detail page.
pub async fn extract_record(
    page: &dyn Page,
    config: &ScraperConfig,
    result: &SearchResult,
    query: &str,
) -> Result<SpecificationRecord> {
    let phone_name = match page.query_selector(PHONE_NAME_TITLE).await.or_fault(query)? {
        Some(title) => trimmed_text(title.as_ref()).await.or_fault(query)?,
        None => result.title.clone(),
    };
    let mut record = SpecificationRecord::new(phone_name);

    if let Some(image) = page.query_selector(MAIN_IMAGE).await.or_fault(query)? {
        record.image_url = image
            .get_attribute(IMAGE_ATTR)
            .await
            .or_fault(query)?
            .filter(|src| !src.trim().is_empty())
            .map(|src| absolutize(&config.site_root(), src.trim()));
    }

    match page.query_selector(SPECS_CONTAINER).await.or_fault(query)? {
        Some(container) => {
            for table in container.query_selector_all(SPEC_TABLE).await.or_fault(query)? {
                if let Some(category) = extract_category(table.as_ref()).await.or_fault(query)? {
                    record.upsert_category(category);
                }
            }
        }
        None => tracing::warn!("Specs list container ({}) not found", SPECS_CONTAINER),
    }

    tracing::debug!(
        "Extracted {} categories for \"{}\"",
        record.categories().len(),
        record.phone_name
    );
    Ok(record)
}

/// Walks one specification table. Returns `None` when the table has no
/// usable header; the category may still be empty.
pub async fn extract_category(table: &dyn ElementHandle) -> BrowserResult<Option<SpecCategory>> {
    let Some(header) = table.query_selector(CATEGORY_HEADER).await? else {
        return Ok(None);
    };
    let name = trimmed_text(header.as_ref()).await?;
    if name.is_empty() {
        return Ok(None);
    }

    let mut category = SpecCategory::new(name);
    for row in table.query_selector_all(SPEC_ROW).await? {
        let label = row.query_selector(SPEC_LABEL).await?;
        let value = row.query_selector(SPEC_VALUE).await?;
        let (Some(label), Some(value)) = (label, value) else {
            continue;
        };

        let label = trimmed_text(label.as_ref()).await?;
        let value = trimmed_text(value.as_ref()).await?;
        if !label.is_empty() && !value.is_empty() {
            category.insert(label, value);
        }
    }
    Ok(Some(category))
}

async fn trimmed_text(element: &dyn ElementHandle) -> BrowserResult<String> {
    Ok(element
        .text_content()
        .await?
        .unwrap_or_default()
        .trim()
        .to_string())
}
