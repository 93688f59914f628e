use std::time::Duration;
use thiserror::Error;

/// Failures reported by a browser capability (see `domain::ports`).
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Timeout {timeout:?} exceeded while {operation} '{target}'")]
    Timeout {
        operation: &'static str,
        target: String,
        timeout: Duration,
    },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser protocol error: {0}")]
    Protocol(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("No document loaded; navigate first")]
    NoDocument,

    #[error("Browser session is closed")]
    Closed,
}

impl BrowserError {
    pub fn is_timeout(&self) -> bool {
        match self {
            BrowserError::Timeout { .. } => true,
            BrowserError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EnvironmentUnavailable,
    SearchTimeout,
    NoResultLink,
    DetailTimeout,
    UnexpectedFault,
}

/// Every way a scrape can end early. The display text is the message the
/// caller sees in the `error` field.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Browser could not be started: {reason}")]
    EnvironmentUnavailable { reason: String },

    #[error("Search results took too long to load or no results found for query: \"{query}\".")]
    SearchTimeout { query: String },

    #[error("No phone found or link extraction failed for query: \"{query}\". Please try a different query.")]
    NoResultLink { query: String },

    #[error("Details page took too long to load or specs list not found for: \"{title}\".")]
    DetailTimeout { title: String },

    #[error("{}", fault_message(.query, .source))]
    UnexpectedFault {
        query: String,
        #[source]
        source: BrowserError,
    },
}

fn fault_message(query: &str, source: &BrowserError) -> String {
    if source.is_timeout() {
        format!("Scraping process timed out. Query: \"{}\". Error: {}", query, source)
    } else {
        format!("Scraping process failed: {}. Query: \"{}\"", source, query)
    }
}

impl ScrapeError {
    pub fn environment(error: BrowserError) -> Self {
        ScrapeError::EnvironmentUnavailable {
            reason: error.to_string(),
        }
    }

    pub fn unexpected(query: &str, source: BrowserError) -> Self {
        ScrapeError::UnexpectedFault {
            query: query.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::EnvironmentUnavailable { .. } => ErrorKind::EnvironmentUnavailable,
            ScrapeError::SearchTimeout { .. } => ErrorKind::SearchTimeout,
            ScrapeError::NoResultLink { .. } => ErrorKind::NoResultLink,
            ScrapeError::DetailTimeout { .. } => ErrorKind::DetailTimeout,
            ScrapeError::UnexpectedFault { .. } => ErrorKind::UnexpectedFault,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::EnvironmentUnavailable { .. } => {
                "Set REMOTE_BROWSER_ENDPOINT, or select the `http` or `local` browser strategy"
            }
            ScrapeError::SearchTimeout { .. } | ScrapeError::NoResultLink { .. } => {
                "Try a more specific query, e.g. brand and model"
            }
            ScrapeError::DetailTimeout { .. } => "The site may be slow or its markup changed; try again later",
            ScrapeError::UnexpectedFault { .. } => "Re-run with --verbose to see the failing step",
        }
    }
}

/// Extension for turning a raw browser failure into an `UnexpectedFault`
/// tagged with the query being scraped.
pub trait FaultContext<T> {
    fn or_fault(self, query: &str) -> Result<T>;
}

impl<T> FaultContext<T> for BrowserResult<T> {
    fn or_fault(self, query: &str) -> Result<T> {
        self.map_err(|e| ScrapeError::unexpected(query, e))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_query_and_title() {
        let err = ScrapeError::SearchTimeout {
            query: "Pixel 9".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Search results took too long to load or no results found for query: \"Pixel 9\"."
        );
        assert_eq!(err.kind(), ErrorKind::SearchTimeout);

        let err = ScrapeError::DetailTimeout {
            title: "Google Pixel 9".to_string(),
        };
        assert!(err.to_string().contains("\"Google Pixel 9\""));
    }

    #[test]
    fn test_unexpected_fault_distinguishes_timeouts() {
        let timeout = ScrapeError::unexpected(
            "Galaxy S24",
            BrowserError::Timeout {
                operation: "reading text of",
                target: "td.nfo".to_string(),
                timeout: Duration::from_secs(5),
            },
        );
        assert!(timeout
            .to_string()
            .starts_with("Scraping process timed out. Query: \"Galaxy S24\"."));

        let other = ScrapeError::unexpected("Galaxy S24", BrowserError::Protocol("boom".into()));
        assert_eq!(
            other.to_string(),
            "Scraping process failed: Browser protocol error: boom. Query: \"Galaxy S24\""
        );
    }

    #[test]
    fn test_environment_reason_is_not_double_prefixed() {
        let err = ScrapeError::environment(BrowserError::Unavailable(
            "Remote browser endpoint not configured".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Browser could not be started: Remote browser endpoint not configured"
        );
        assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
    }
}
