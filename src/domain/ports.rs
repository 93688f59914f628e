use crate::utils::error::BrowserResult;
use async_trait::async_trait;
use std::time::Duration;

/// A located DOM element. Queries search the element's descendants.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    async fn text_content(&self) -> BrowserResult<Option<String>>;
    async fn get_attribute(&self, name: &str) -> BrowserResult<Option<String>>;
    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>>;
    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>>;
}

#[async_trait]
pub trait Page: Send + Sync {
    /// Navigates and returns once the new document has been parsed, without
    /// waiting for subresources.
    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()>;

    /// Fails with `BrowserError::Timeout` if nothing matches `selector`
    /// within `timeout`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> BrowserResult<()>;

    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>>;
    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>>;
}

/// An exclusively owned browser (or browser-like) session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn new_page(&self) -> BrowserResult<Box<dyn Page>>;
    fn is_connected(&self) -> bool;
    async fn close(&mut self) -> BrowserResult<()>;
}

/// Acquisition strategy for a session: local launch, remote connect, plain HTTP.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> BrowserResult<Box<dyn BrowserSession>>;
}
