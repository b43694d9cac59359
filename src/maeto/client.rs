//! HTTP client for Loja Maeto requests using wreq for browser emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for search/detail-page fetching - enables mocking for tests.
#[async_trait]
pub trait MaetoSearch: Send + Sync {
    /// Fetches one search-results page and returns the HTML response.
    async fn search(&self, query: &str, page: u32) -> Result<String>;

    /// Fetches an arbitrary absolute URL (product detail pages).
    async fn page(&self, url: &str) -> Result<String>;

    /// Returns the configured base origin.
    fn base_url(&self) -> String;
}

#[async_trait]
impl<'a, T: MaetoSearch + ?Sized> MaetoSearch for &'a T {
    async fn search(&self, query: &str, page: u32) -> Result<String> {
        (**self).search(query, page).await
    }

    async fn page(&self, url: &str) -> Result<String> {
        (**self).page(url).await
    }

    fn base_url(&self) -> String {
        (**self).base_url()
    }
}

/// Loja Maeto HTTP client with browser impersonation.
pub struct MaetoClient {
    client: Client,
    base_url: String,
}

impl MaetoClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Performs a GET request; any non-success status is a uniform error.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "pt-BR,pt;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl MaetoSearch for MaetoClient {
    async fn search(&self, query: &str, page: u32) -> Result<String> {
        let url =
            format!("{}/search?q={}&page={}", self.base_url, urlencoding::encode(query), page);

        info!("Searching: {} (page {})", query, page);
        self.get(&url).await
    }

    async fn page(&self, url: &str) -> Result<String> {
        info!("Fetching page: {}", url);
        self.get(url).await
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
