//! Paginated review collection with count and page ceilings.

use crate::amazon::client::PageSource;
use crate::amazon::models::{Review, SortKey};
use crate::amazon::parser::parse_review_page;
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Reviews Amazon serves per listing page.
pub const REVIEWS_PER_PAGE: usize = 10;

/// Hard ceiling on pages fetched in one collection, regardless of the
/// requested count.
pub const MAX_REVIEW_PAGES: u32 = 10;

/// A review-page fetch failed mid-collection.
///
/// Carries everything collected before the failure; partial results are
/// preserved, not discarded.
#[derive(Debug, Error)]
#[error("failed to fetch review page {page}: {cause}")]
pub struct CollectError {
    /// Page whose fetch failed
    pub page: u32,
    /// Underlying fetch error
    pub cause: anyhow::Error,
    /// Reviews collected from earlier pages
    pub collected: Vec<Review>,
}

/// Walks review-listing pages in order, collecting up to a requested
/// number of reviews.
pub struct ReviewCollector<'a, S: PageSource + ?Sized> {
    source: &'a S,
    delay: Duration,
    jitter: Duration,
}

impl<'a, S: PageSource + ?Sized> ReviewCollector<'a, S> {
    /// Creates a collector with the default 2 s inter-page delay.
    pub fn new(source: &'a S) -> Self {
        Self { source, delay: Duration::from_secs(2), jitter: Duration::ZERO }
    }

    /// Overrides the inter-page courtesy delay. Tests set it to zero.
    pub fn with_delay(mut self, delay: Duration, jitter: Duration) -> Self {
        self.delay = delay;
        self.jitter = jitter;
        self
    }

    /// Collects up to `count` reviews for `asin`, fetching pages in
    /// strictly increasing order.
    ///
    /// Never fetches more than `ceil(count / 10)` pages, capped at
    /// [`MAX_REVIEW_PAGES`]. Excess reviews on the final page are
    /// dropped. On a fetch failure the error carries all reviews
    /// collected so far.
    pub async fn collect(
        &self,
        asin: &str,
        count: usize,
        sort: SortKey,
    ) -> Result<Vec<Review>, CollectError> {
        let mut collected: Vec<Review> = Vec::new();

        let pages = count.div_ceil(REVIEWS_PER_PAGE).min(MAX_REVIEW_PAGES as usize) as u32;

        let mut page = 1;
        while page <= pages && collected.len() < count {
            let html = match self.source.review_page(asin, page, sort).await {
                Ok(html) => html,
                Err(cause) => {
                    warn!("review page {} fetch failed: {:#}, returning partial results", page, cause);
                    return Err(CollectError { page, cause, collected });
                }
            };

            let page_reviews = parse_review_page(&html);
            let remaining = count - collected.len();
            collected.extend(page_reviews.into_iter().take(remaining));

            debug!(page, total = collected.len(), "collected review page");

            page += 1;
            if page <= pages && collected.len() < count {
                self.pause().await;
            }
        }

        Ok(collected)
    }

    /// Courtesy delay between page fetches, with random jitter.
    async fn pause(&self) {
        if self.delay.is_zero() && self.jitter.is_zero() {
            return;
        }

        let jitter_ms = if self.jitter.is_zero() {
            0
        } else {
            rand::rng().random_range(0..=self.jitter.as_millis() as u64)
        };

        let total = self.delay + Duration::from_millis(jitter_ms);
        debug!("Delaying {}ms before next page", total.as_millis());
        tokio::time::sleep(total).await;
    }
}
