//! Browser capability backed by plain HTTP.
//!
//! `goto` issues a GET and parses the body; the parsed document is the DOM.
//! Static markup cannot change after parsing, so `wait_for_selector` answers
//! immediately: present, or the timeout condition.

use super::parse_selector;
use crate::domain::ports::{BrowserLauncher, BrowserSession, ElementHandle, Page};
use crate::utils::error::{BrowserError, BrowserResult};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type SharedDocument = Arc<Mutex<Html>>;

pub struct StaticHtmlLauncher {
    user_agent: String,
}

impl StaticHtmlLauncher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl BrowserLauncher for StaticHtmlLauncher {
    async fn launch(&self) -> BrowserResult<Box<dyn BrowserSession>> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| BrowserError::Unavailable(format!("HTTP client could not be built: {}", e)))?;
        tracing::debug!("Static HTML session opened");
        Ok(Box::new(StaticHtmlSession {
            client,
            connected: true,
        }))
    }
}

pub struct StaticHtmlSession {
    client: Client,
    connected: bool,
}

#[async_trait]
impl BrowserSession for StaticHtmlSession {
    async fn new_page(&self) -> BrowserResult<Box<dyn Page>> {
        if !self.connected {
            return Err(BrowserError::Closed);
        }
        Ok(Box::new(StaticHtmlPage::new(self.client.clone())))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn close(&mut self) -> BrowserResult<()> {
        self.connected = false;
        Ok(())
    }
}

pub struct StaticHtmlPage {
    client: Client,
    document: Mutex<Option<SharedDocument>>,
}

impl StaticHtmlPage {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            document: Mutex::new(None),
        }
    }

    /// Replaces the current document with `body`.
    pub fn load_html(&self, body: &str) -> BrowserResult<()> {
        let parsed = Arc::new(Mutex::new(Html::parse_document(body)));
        let mut current = self
            .document
            .lock()
            .map_err(|_| BrowserError::Protocol("page lock poisoned".to_string()))?;
        *current = Some(parsed);
        Ok(())
    }

    fn current(&self) -> BrowserResult<SharedDocument> {
        self.document
            .lock()
            .map_err(|_| BrowserError::Protocol("page lock poisoned".to_string()))?
            .clone()
            .ok_or(BrowserError::NoDocument)
    }

    fn select(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
        let document = self.current()?;
        select_within(&document, DOCUMENT_ROOT, selector)
    }
}

fn navigation_error(e: reqwest::Error, url: &str, timeout: Duration) -> BrowserError {
    if e.is_timeout() {
        BrowserError::Timeout {
            operation: "navigating to",
            target: url.to_string(),
            timeout,
        }
    } else {
        BrowserError::Http(e)
    }
}

#[async_trait]
impl Page for StaticHtmlPage {
    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| navigation_error(e, url, timeout))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered {}", url, status);
        }

        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e, url, timeout))?;
        tracing::debug!("Loaded {} bytes from {}", body.len(), url);
        self.load_html(&body)
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> BrowserResult<()> {
        if self.select(selector)?.is_empty() {
            return Err(BrowserError::Timeout {
                operation: "waiting for selector",
                target: selector.to_string(),
                timeout,
            });
        }
        Ok(())
    }

    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
        self.select(selector)
    }
}

/// Node index of the document itself.
const DOCUMENT_ROOT: usize = 0;

/// An element addressed by its pre-order position in the parsed document.
pub struct StaticElement {
    document: SharedDocument,
    index: usize,
}

fn lock(document: &SharedDocument) -> BrowserResult<std::sync::MutexGuard<'_, Html>> {
    document
        .lock()
        .map_err(|_| BrowserError::Protocol("document lock poisoned".to_string()))
}

/// Descendants of the node at `scope` matching `selector`, in document
/// order. A pre-order subtree is contiguous, so a descendant's global index
/// is `scope` plus its offset within the subtree.
fn select_within(
    document: &SharedDocument,
    scope: usize,
    selector: &str,
) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
    let selector = parse_selector(selector)?;
    let html = lock(document)?;
    let Some(scope_node) = html.tree.root().descendants().nth(scope) else {
        return Ok(Vec::new());
    };

    let matches = scope_node
        .descendants()
        .enumerate()
        .skip(1)
        .filter(|(_, node)| ElementRef::wrap(*node).is_some_and(|el| selector.matches(&el)))
        .map(|(offset, _)| {
            Box::new(StaticElement {
                document: Arc::clone(document),
                index: scope + offset,
            }) as Box<dyn ElementHandle>
        })
        .collect();
    Ok(matches)
}

impl StaticElement {
    fn read<T>(&self, f: impl FnOnce(ElementRef<'_>) -> T) -> BrowserResult<T> {
        let html = lock(&self.document)?;
        let element = html
            .tree
            .root()
            .descendants()
            .nth(self.index)
            .and_then(ElementRef::wrap)
            .ok_or_else(|| BrowserError::Protocol(format!("stale element handle #{}", self.index)))?;
        Ok(f(element))
    }
}

#[async_trait]
impl ElementHandle for StaticElement {
    async fn text_content(&self) -> BrowserResult<Option<String>> {
        self.read(|el| Some(el.text().collect::<String>()))
    }

    async fn get_attribute(&self, name: &str) -> BrowserResult<Option<String>> {
        self.read(|el| el.value().attr(name).map(str::to_string))
    }

    async fn query_selector(&self, selector: &str) -> BrowserResult<Option<Box<dyn ElementHandle>>> {
        Ok(select_within(&self.document, self.index, selector)?.into_iter().next())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<Box<dyn ElementHandle>>> {
        select_within(&self.document, self.index, selector)
    }
}
