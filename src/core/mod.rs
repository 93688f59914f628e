pub mod extract;
pub mod query;
pub mod scraper;
pub mod search;
pub mod selectors;

pub use crate::domain::model::{ScrapeOutcome, SearchResult, SpecCategory, SpecificationRecord};
pub use crate::domain::ports::{BrowserLauncher, BrowserSession, ElementHandle, Page};
pub use crate::utils::error::Result;
