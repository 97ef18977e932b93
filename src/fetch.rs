// src/fetch.rs

//! Document fetching interface.
//!
//! The core calls the fetcher once per document it needs and treats every
//! error kind as recoverable for that single call: the affected document is
//! skipped for the cycle and recorded as absent in the snapshot.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::config::FetcherConfig;
use crate::error::Result;

/// Per-call fetch failure taxonomy.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("document not found")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            FetchError::NotFound
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Source of semi-structured documents.
///
/// Implementations own every interaction side effect; extraction stays pure.
/// Documents are handed over as page source text so implementations remain
/// `Send` and parsing happens inside the extraction engine.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document at `url`.
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Fetch the document at `url`, then activate each node matching
    /// `toggle_selector` in turn, capturing the document after each
    /// activation. Returns one capture per toggle target, in page order.
    ///
    /// This is the two-step protocol required by pages that only reveal a
    /// section (e.g. a team's bench list) after a UI toggle.
    async fn fetch_interactive(
        &self,
        url: &str,
        toggle_selector: &str,
    ) -> FetchResult<Vec<String>>;
}

/// Plain HTTP fetcher backed by reqwest.
///
/// Without script execution a toggle activation is a no-op, so
/// `fetch_interactive` returns the statically rendered document once per
/// toggle target. A browser-automation fetcher would implement the same
/// trait and return genuinely distinct captures.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher from the configured user agent and timeout.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> FetchResult<String> {
        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.get_text(url).await
    }

    async fn fetch_interactive(
        &self,
        url: &str,
        toggle_selector: &str,
    ) -> FetchResult<Vec<String>> {
        let selector = Selector::parse(toggle_selector)
            .map_err(|e| FetchError::Transport(format!("bad toggle selector: {e:?}")))?;

        let body = self.get_text(url).await?;
        let toggle_count = {
            let document = Html::parse_document(&body);
            document.select(&selector).count()
        };

        Ok(vec![body; toggle_count])
    }
}
