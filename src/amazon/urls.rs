//! Product URL resolution: extracts the ASIN and marketplace domain.

use anyhow::{bail, Result};
use regex_lite::Regex;
use std::sync::LazyLock;

/// A resolved product reference: ASIN plus the marketplace it lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Amazon Standard Identification Number (10 alphanumeric characters)
    pub asin: String,
    /// Marketplace domain, e.g. "amazon.de"
    pub domain: String,
}

/// ASIN patterns for product URLs across all marketplaces.
/// Tried in order; group 1 captures the ASIN.
static ASIN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"amazon\.[a-z.]+/(?:[A-Za-z0-9-]+/)?dp/([A-Z0-9]{10})",
        r"amazon\.[a-z.]+/gp/product/([A-Z0-9]{10})",
        r"amazon\.[a-z.]+/(?:[A-Za-z0-9-]+/)?product/([A-Z0-9]{10})",
        // Short URLs (amzn.to, amzn.eu, ...)
        r"amzn\.[a-z]+/([A-Z0-9]{10})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:www\.)?([a-zA-Z0-9.-]+)").unwrap());

/// Resolves a product URL to its ASIN and marketplace domain.
///
/// The domain falls back to "amazon.com" when the URL has no recognizable
/// authority. A URL with no extractable ASIN is a hard failure: callers
/// must not attempt any fetch for it.
pub fn resolve(url: &str) -> Result<ProductRef> {
    let domain = DOMAIN_PATTERN
        .captures(url)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "amazon.com".to_string());

    for pattern in ASIN_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(url) {
            return Ok(ProductRef { asin: captures[1].to_string(), domain });
        }
    }

    bail!("Invalid Amazon URL, couldn't extract a product ID: {}", url)
}
