//! HTTP page fetching using wreq for TLS fingerprint emulation.

use crate::amazon::models::SortKey;
use crate::amazon::regions::Region;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Source of raw page markup - enables mocking for tests.
///
/// Implementations own header spoofing, timeouts, and status handling;
/// a non-success HTTP status is an error, never a page to parse.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the product detail page for an ASIN.
    async fn product_page(&self, asin: &str) -> Result<String>;

    /// Fetches one review-listing page for an ASIN.
    async fn review_page(&self, asin: &str, page: u32, sort: SortKey) -> Result<String>;

    /// Returns the marketplace domain this source targets.
    fn domain(&self) -> &str;
}

/// wreq-backed page fetcher with browser impersonation.
pub struct PageClient {
    client: Client,
    domain: String,
    base_url: Option<String>,
}

impl PageClient {
    /// Creates a client for the given marketplace domain.
    pub fn new(config: &Config, domain: impl Into<String>) -> Result<Self> {
        Self::with_base_url(config, domain, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(
        config: &Config,
        domain: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, domain: domain.into(), base_url })
    }

    /// Returns the base URL (custom for testing, or domain-based).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| format!("https://www.{}", self.domain))
    }

    /// Performs a GET request with browser-like headers.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", Region::accept_language_for(&self.domain))
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "max-age=0")
            .header("Upgrade-Insecure-Requests", "1")
            .header("Connection", "keep-alive")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing --delay.");
            anyhow::bail!("Rate limited by Amazon (503). Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl PageSource for PageClient {
    async fn product_page(&self, asin: &str) -> Result<String> {
        let url = format!("{}/dp/{}", self.base_url(), asin);

        info!("Fetching product: {}", asin);
        self.get(&url).await
    }

    async fn review_page(&self, asin: &str, page: u32, sort: SortKey) -> Result<String> {
        let url = format!(
            "{}/product-reviews/{}/?pageNumber={}&sortBy={}",
            self.base_url(),
            asin,
            page,
            sort.as_param()
        );

        info!("Fetching review page {} for {}", page, asin);
        self.get(&url).await
    }

    fn domain(&self) -> &str {
        &self.domain
    }
}
