//! Page client module
//!
//! Provides `PageClient` for fetching raw page content over HTTP.
//! Requests are bounded by a fixed timeout; there are no retries.

use eyre::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// How long to wait on the network fetch before giving up.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for fetching page content.
///
/// A thin wrapper around [`reqwest::Client`] that applies the crate's
/// user agent and a bounded request timeout. One-shot fetches only; a
/// failed request is fatal to the run.
///
/// # Example
/// ```no_run
/// use bankcap::client::PageClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = PageClient::try_new()?;
/// let url = Url::parse("https://en.wikipedia.org/wiki/List_of_largest_banks")?;
/// let html = client.fetch_text(&url).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Create a new page client with the default timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn try_new() -> Result<Self> {
        Self::try_new_with_timeout(FETCH_TIMEOUT)
    }

    /// Create a new page client with a custom request timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn try_new_with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bankcap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the body of `url` as text
    ///
    /// # Errors
    /// Returns an error if the request fails, times out, or the server
    /// responds with a non-success status
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        log::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eyre::bail!("Failed to fetch {} ({}): {}", url, status, body);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        log::debug!("Fetched {} byte(s) from {}", body.len(), url);

        Ok(body)
    }
}
