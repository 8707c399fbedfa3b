//! HTML parsers for Amazon product detail and review-listing pages.
//!
//! Extraction is read-only and never fails: a field whose selectors all
//! miss is simply absent. Only the HTTP layer produces real errors.

use crate::amazon::extract::{collapse_whitespace, extract_first};
use crate::amazon::models::{Product, Review};
use crate::amazon::rating::{decode_rating, parse_out_of_five};
use crate::amazon::selectors::{self, review};
use scraper::{ElementRef, Html};
use tracing::debug;

/// Currency glyphs accepted by the offscreen-price fallback.
const CURRENCY_GLYPHS: [char; 4] = ['$', '£', '€', '¥'];

/// Parses a product detail page into a [`Product`] (sans reviews).
///
/// Fields that cannot be located stay `None` (rating stays 0.0); callers
/// can render the result without special-casing emptiness.
pub fn parse_product_page(html: &str) -> Product {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = extract_first(root, &selectors::TITLE);

    let price = extract_first(root, &selectors::PRICE).or_else(|| offscreen_price(root));

    let rating = decode_rating(&document);

    let description = extract_first(root, &selectors::DESCRIPTION)
        .map(|text| collapse_whitespace(&text))
        .or_else(|| bullet_description(root));

    debug!(
        title = title.is_some(),
        price = price.is_some(),
        rating,
        description = description.is_some(),
        "parsed product page"
    );

    Product { title, price, rating, description, reviews: Vec::new() }
}

/// Special-case price fallback, run only after the primary chain is
/// exhausted: the first offscreen span whose text starts with a currency
/// glyph.
fn offscreen_price(root: ElementRef) -> Option<String> {
    root.select(&selectors::PRICE_OFFSCREEN).find_map(|node| {
        let text = node.text().collect::<String>();
        let trimmed = text.trim();
        match trimmed.chars().next() {
            Some(first) if CURRENCY_GLYPHS.contains(&first) => Some(trimmed.to_string()),
            _ => None,
        }
    })
}

/// Description fallback: feature bullets joined into one line.
fn bullet_description(root: ElementRef) -> Option<String> {
    let bullets: Vec<String> = root
        .select(&selectors::DESCRIPTION_BULLETS)
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if bullets.is_empty() {
        None
    } else {
        Some(bullets.join(" • "))
    }
}

/// Parses a review-listing page into zero or more [`Review`]s, in
/// document order. No dedup across pages: page boundaries are assumed
/// disjoint.
pub fn parse_review_page(html: &str) -> Vec<Review> {
    let document = Html::parse_document(html);

    let reviews: Vec<Review> =
        document.select(&review::BLOCK).map(parse_review_block).collect();

    debug!(count = reviews.len(), "parsed review page");
    reviews
}

/// Extracts one review from its block. Each field uses a single fixed
/// locator; a missing node leaves the field empty.
fn parse_review_block(block: ElementRef) -> Review {
    let author = block_text(block, &review::AUTHOR);
    let date = block_text(block, &review::DATE);
    let title = block_text(block, &review::TITLE);
    let content = block_text(block, &review::BODY);

    // Reviews only ever encode the rating as visible star text; the
    // class-token fallback does not apply at review granularity.
    let rating = block
        .select(&review::STARS)
        .next()
        .and_then(|node| parse_out_of_five(&node.text().collect::<String>()))
        .unwrap_or(0.0);

    let verified = block.select(&review::VERIFIED).next().is_some();

    Review { author, date, rating, title, content, verified }
}

fn block_text(block: ElementRef, selector: &scraper::Selector) -> Option<String> {
    let text = block.select(selector).next()?.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
