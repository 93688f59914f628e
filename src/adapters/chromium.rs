//! Browser capability over the Chrome DevTools Protocol (`chromiumoxide`).
//!
//! Either launches a local headless Chromium or attaches to a remote one
//! (e.g. a hosted browser service) through its websocket endpoint.

use super::{parse_selector, ChromiumTarget};
use crate::domain::ports::{BrowserLauncher, BrowserSession, ElementHandle, Page};
use crate::utils::error::{BrowserError, BrowserResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const TEXT_CONTENT_FN: &str = "function() { return this.textContent; }";

fn protocol(e: impl std::fmt::Display) -> BrowserError {
    BrowserError::Protocol(e.to_string())
}

/// Lookup errors that can clear up while the page is still settling, e.g.
/// a node id invalidated by a document swap.
fn is_transient_lookup(e: &CdpError) -> bool {
    match e {
        CdpError::NotFound | CdpError::FrameNotFound(_) => true,
        CdpError::Chrome(err) => {
            err.message.contains("Could not find node") || err.message.contains("No node")
        }
        _ => false,
    }
}

pub struct ChromiumLauncher {
    target: ChromiumTarget,
    user_agent: String,
}

impl ChromiumLauncher {
    pub fn new(target: ChromiumTarget, user_agent: impl Into<String>) -> Self {
        Self {
            target,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> BrowserResult<Box<dyn BrowserSession>> {
        let (browser, mut handler) = match &self.target {
            ChromiumTarget::Launch => {
                tracing::info!("Launching local headless Chromium...");
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .arg("--disable-setuid-sandbox")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(|e| {
                        BrowserError::Unavailable(format!("Invalid browser config: {}", e))
                    })?;
                Browser::launch(config).await
            }
            ChromiumTarget::Connect(endpoint) => {
                tracing::info!("Connecting to remote browser: {}", endpoint);
                Browser::connect(endpoint.clone()).await
            }
        }
        .map_err(|e| BrowserError::Unavailable(format!("{} failed: {}", self.target, e)))?;

        // CDP 訊息處理迴圈；連線關閉時結束
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error: {}", e);
                }
            }
            tracing::debug!("CDP handler loop ended");
        });

        tracing::info!("Browser session ready ({})", self.target);
        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
            user_agent: self.user_agent.clone(),
            owns_browser: self.target.owns_browser(),
            pages: Mutex::new(Vec::new()),
            connected: true,
        }))
    }
}

pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    user_agent: String,
    owns_browser: bool,
    pages: Mutex<Vec<chromiumoxide::Page>>,
    connected: bool,
}

impl ChromiumSession {
    async fn close_pages(&mut self) -> BrowserResult<()> {
        let pages = match self.pages.get_mut() {
            Ok(pages) => std::mem::take(pages),
            Err(poisoned) => std::mem::take(poisoned.into_inner()),
        };
        let mut result = Ok(());
        for page in pages {
            if let Err(e) = page.close().await {
                result = Err(protocol(e));
            }
        }
        result
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn new_page(&self) -> BrowserResult<Box<dyn Page>> {
        if !self.connected {
            return Err(BrowserError::Closed);
        }
        let page = self.browser.new_page("about:blank").await.map_err(protocol)?;
        page.set_user_agent(SetUserAgentOverrideParams::new(self.user_agent.clone()))
            .await
            .map_err(protocol)?;
        self.pages
            .lock()
            .map_err(|_| BrowserError::Protocol("page list lock poisoned".to_string()))?
            .push(page.clone());
        Ok(Box::new(ChromiumPage { page }))
    }

    fn is_connected(&self) -> bool {
        self.connected && !self.handler_task.is_finished()
    }

    async fn close(&mut self) -> BrowserResult<()> {
        self.connected = false;
        let result = if self.owns_browser {
            self.browser.close().await.map(|_| ()).map_err(protocol)
        } else {
            // 遠端瀏覽器由服務管理：只關自己開的分頁，再斷線
            self.close_pages().await
        };
        self.handler_task.abort();
        result
    }
}

pub struct ChromiumPage {
    page: chromiumoxide::Page,
}

impl ChromiumPage {
    async fn ready_state(&self) -> BrowserResult<String> {
        self.page
            .evaluate("document.readyState")
            .await
            .map_err(protocol)?
            .into_value::<String>()
            .map_err(protocol)
    }
}

#[async_trait]
impl Page for ChromiumPage {
    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()> {
        tracing::debug!("Navigating to {}", url);
        let navigation = async {
            let response = self
                .page
                .execute(NavigateParams::new(url))
                .await
                .map_err(protocol)?;
            if let Some(error_text) = &response.result.error_text {
                return Err(BrowserError::Navigation {
                    url: url.to_string(),
                    message: error_text.clone(),
                });
            }

            // DOMContentLoaded 之後 readyState 離開 "loading"
            while self.ready_state().await? == "loading" {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Ok::<(), BrowserError>(())
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| BrowserError::Timeout {
                operation: "navigating to",
                target: url.to_string(),
                timeout,
            })?
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> BrowserResult<()> {
        parse_selector(selector)?;

        let wait = async {
            loop {
                match self.page.find_elements(selector).await {
                    Ok(found) if !found.is_empty() => return Ok(()),
                    Ok(_) => {}
                    Err(e) if is_transient_lookup(&e) => {
                        tracing::trace!("selector '{}' not ready: {}", selector, e)
                    }
                    Err(e) => return Err(protocol(e)),
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| BrowserError::Timeout {
                operation: "waiting for selector",
                target: selector.to_string(),
                timeout,
            })?
    }

    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>> {
        Ok(self.query_selector_all(selector).await?.into_iter().next())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
        let elements = self.page.find_elements(selector).await.map_err(protocol)?;
        Ok(wrap_all(elements))
    }
}

fn wrap_all(elements: Vec<Element>) -> Vec<Box<dyn ElementHandle>> {
    elements
        .into_iter()
        .map(|element| Box::new(ChromiumElement { element }) as Box<dyn ElementHandle>)
        .collect()
}

pub struct ChromiumElement {
    element: Element,
}

#[async_trait]
impl ElementHandle for ChromiumElement {
    async fn text_content(&self) -> BrowserResult<Option<String>> {
        let returns = self
            .element
            .call_js_fn(TEXT_CONTENT_FN, false)
            .await
            .map_err(protocol)?;
        Ok(returns
            .result
            .value
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    async fn get_attribute(&self, name: &str) -> BrowserResult<Option<String>> {
        self.element.attribute(name).await.map_err(protocol)
    }

    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>> {
        Ok(self.query_selector_all(selector).await?.into_iter().next())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
        let elements = self.element.find_elements(selector).await.map_err(protocol)?;
        Ok(wrap_all(elements))
    }
}
