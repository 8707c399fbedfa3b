//! Scrape command: resolves a product URL, fetches details and reviews,
//! and renders the selected output.

use crate::amazon::client::{PageClient, PageSource};
use crate::amazon::models::{Product, Review, SortKey};
use crate::amazon::parser::parse_product_page;
use crate::amazon::reviews::ReviewCollector;
use crate::amazon::urls;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Which parts of the scraped data to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Product details only
    Details,
    /// Reviews only
    Reviews,
    /// Details with reviews attached
    Full,
}

impl Selection {
    /// Derives the selection from the two CLI flags; neither flag means both.
    pub fn from_flags(details: bool, reviews: bool) -> Self {
        match (details, reviews) {
            (true, false) => Selection::Details,
            (false, true) => Selection::Reviews,
            _ => Selection::Full,
        }
    }
}

/// Executes a product scrape end to end.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves `url`, fetches the requested data, and returns formatted
    /// output. An unresolvable URL is fatal; fetch failures degrade to
    /// empty or partial output.
    pub async fn execute(&self, url: &str, selection: Selection) -> Result<String> {
        let resolved = urls::resolve(url)?;

        // The --region flag overrides the marketplace from the URL
        let domain = match self.config.region {
            Some(region) => region.domain().to_string(),
            None => resolved.domain.clone(),
        };

        info!("Using Amazon domain: {}", domain);
        info!("Product ID (ASIN): {}", resolved.asin);

        let client =
            PageClient::new(&self.config, domain).context("Failed to create HTTP client")?;

        self.execute_with_source(&client, &resolved.asin, selection).await
    }

    /// Runs the scrape against a provided page source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl PageSource,
        asin: &str,
        selection: Selection,
    ) -> Result<String> {
        let formatter = Formatter::new(self.config.format);

        let mut product = if selection == Selection::Reviews {
            Product::default()
        } else {
            self.fetch_product(source, asin).await
        };

        if selection == Selection::Details {
            return Ok(formatter.format_product(&product));
        }

        let reviews = self.fetch_reviews(source, asin).await;

        if selection == Selection::Reviews {
            return Ok(formatter.format_reviews(&reviews));
        }

        product.reviews = reviews;
        Ok(formatter.format_product(&product))
    }

    /// Fetches and parses the product detail page. A fetch failure is
    /// logged and degrades to a zero-value product; extraction itself
    /// cannot fail.
    async fn fetch_product(&self, source: &impl PageSource, asin: &str) -> Product {
        match source.product_page(asin).await {
            Ok(html) => parse_product_page(&html),
            Err(e) => {
                warn!("Error fetching product details: {:#}", e);
                Product::default()
            }
        }
    }

    /// Collects reviews, keeping partial results when a page fetch fails.
    async fn fetch_reviews(&self, source: &impl PageSource, asin: &str) -> Vec<Review> {
        let sort = SortKey::parse(&self.config.sort);

        let collector = ReviewCollector::new(source).with_delay(
            Duration::from_millis(self.config.delay_ms),
            Duration::from_millis(self.config.delay_jitter_ms),
        );

        match collector.collect(asin, self.config.review_count, sort).await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Error fetching reviews: {:#}", e);
                e.collected
            }
        }
    }
}
