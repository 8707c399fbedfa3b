//! Selector rule tables for Amazon product and review pages.
//!
//! Fallback chains are ordered most-current-markup-first; when Amazon
//! ships a new page variant, add its selector at the front of the chain
//! and keep the old ones for pages that still serve the previous layout.
//!
//! **Update process**: when a field comes back empty on a live page,
//! capture an HTML sample, add the new selector, and add a test fixture.

use crate::amazon::extract::FieldRule;
use scraper::Selector;
use std::sync::LazyLock;

/// Fallback chain for the product title.
pub static TITLE: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::text("span#productTitle"),
        FieldRule::text("h1#title"),
        FieldRule::text("h1.a-spacing-none"),
    ]
});

/// Fallback chain for the displayed price.
pub static PRICE: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::text("span.a-price span.a-offscreen"),
        FieldRule::text("span.a-price.a-text-price span.a-offscreen"),
        FieldRule::text("span.a-price"),
        FieldRule::text("span#priceblock_ourprice"),
        FieldRule::text("span#priceblock_dealprice"),
        FieldRule::text("span#price"),
        FieldRule::text("span.a-color-price"),
    ]
});

/// Last-resort price locator: every offscreen span on the page.
/// The parser accepts the first one whose text starts with a currency glyph.
pub static PRICE_OFFSCREEN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-offscreen").unwrap());

/// Fallback chain for the product description.
pub static DESCRIPTION: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::text("div#productDescription"),
        FieldRule::text("div#dpx-product-description_feature_div"),
        FieldRule::text("div#feature-bullets"),
        FieldRule::text("div#dpx-feature-bullets_feature_div"),
        FieldRule::text("div#bookDescription_feature_div"),
        FieldRule::text("div#aplus"),
    ]
});

/// Feature bullets, joined into a description when every chain rule missed.
pub static DESCRIPTION_BULLETS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.a-spacing-mini").unwrap());

/// Selectors for the rating decoder.
pub mod rating {
    use super::*;

    /// Popover-style rating widget; the rating lives in its title attribute.
    pub static POPOVER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#acrPopover").unwrap());

    /// Icon-style rating widget with visible "x out of 5 stars" text.
    pub static ICON_STAR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("i.a-icon-star").unwrap());

    /// Icons whose class token encodes the rating (a-star-4-5 -> 4.5).
    pub static STAR_CLASS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("i[class*='a-star-']").unwrap());
}

/// Single fixed locators for review-listing pages. Review markup is
/// stable within one listing page, so no fallback chains here.
pub mod review {
    use super::*;

    /// One review block.
    pub static BLOCK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-hook='review']").unwrap());

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-profile-name").unwrap());

    pub static DATE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-hook='review-date']").unwrap());

    pub static STARS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("i[data-hook='review-star-rating']").unwrap());

    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[data-hook='review-title']").unwrap());

    pub static BODY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-hook='review-body']").unwrap());

    /// "Verified Purchase" badge; its presence alone marks a review verified.
    pub static VERIFIED: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-hook='avp-badge']").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy statics to ensure they parse
        let _ = &*TITLE;
        let _ = &*PRICE;
        let _ = &*PRICE_OFFSCREEN;
        let _ = &*DESCRIPTION;
        let _ = &*DESCRIPTION_BULLETS;
        let _ = &*rating::POPOVER;
        let _ = &*rating::ICON_STAR;
        let _ = &*rating::STAR_CLASS;
        let _ = &*review::BLOCK;
        let _ = &*review::AUTHOR;
        let _ = &*review::DATE;
        let _ = &*review::STARS;
        let _ = &*review::TITLE;
        let _ = &*review::BODY;
        let _ = &*review::VERIFIED;
    }

    #[test]
    fn test_review_block_matching() {
        let html = Html::parse_document(
            r#"<div data-hook="review">
                <span class="a-profile-name">Alice</span>
            </div>
            <div data-hook="review">
                <span class="a-profile-name">Bob</span>
            </div>"#,
        );

        let blocks: Vec<_> = html.select(&review::BLOCK).collect();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_star_class_matching() {
        let html = Html::parse_document(r#"<i class="a-icon a-star-4-5"></i>"#);
        assert!(html.select(&rating::STAR_CLASS).next().is_some());

        let html = Html::parse_document(r#"<i class="a-icon-star-small"></i>"#);
        assert!(html.select(&rating::STAR_CLASS).next().is_none());
    }
}
