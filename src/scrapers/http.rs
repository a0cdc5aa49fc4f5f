//! HTTP fetch primitive for the scraping engine.
//!
//! The engine only needs `fetch(url) -> HTML string`; everything else
//! (redirects, compression, TLS) lives behind [`Fetcher`] so tests can
//! substitute canned fixtures.

use std::time::Duration;

use async_trait::async_trait;

/// Errors raised by the fetch primitive.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Fetch a URL and return the response body as text.
///
/// Implementations are expected to follow redirects and raise on
/// non-2xx responses; degradation is handled by the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Reqwest-backed HTTP client with a shared user agent and timeout.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the given user agent and timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
