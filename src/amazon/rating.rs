//! Rating decoder: reconciles the three encodings Amazon uses for the
//! same star value.
//!
//! Strategies are tried in order; the first one that yields a number
//! wins. A parse failure inside a strategy is silent — it just means
//! that strategy produced no value. Alternate encodings discovered later
//! slot in as additional strategies without touching callers.

use crate::amazon::selectors::rating::{ICON_STAR, POPOVER, STAR_CLASS};
use regex_lite::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Class token like `a-star-4-5` (4.5 stars) or `a-star-5` (5.0 stars).
static STAR_CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"a-star-(\d)(?:[-.](\d))?").unwrap());

/// Decodes the product's star rating from a parsed document.
///
/// Returns 0.0 when no encoding on the page can be decoded; an unknown
/// rating is a valid first-class state, not an error.
pub fn decode_rating(document: &Html) -> f64 {
    popover_attribute(document)
        .or_else(|| icon_text(document))
        .or_else(|| class_encoded(document))
        .unwrap_or(0.0)
}

/// Strategy 1: descriptive text in the popover widget's title attribute.
fn popover_attribute(document: &Html) -> Option<f64> {
    let node = document.select(&POPOVER).next()?;
    parse_out_of_five(node.value().attr("title")?)
}

/// Strategy 2: visible "x out of 5 stars" text in the first star icon.
fn icon_text(document: &Html) -> Option<f64> {
    let node = document.select(&ICON_STAR).next()?;
    parse_out_of_five(&node.text().collect::<String>())
}

/// Strategy 3: rating encoded in a CSS class token.
///
/// Candidates that fail to decode do not stop the scan; the first
/// successfully decoded element is kept.
fn class_encoded(document: &Html) -> Option<f64> {
    document
        .select(&STAR_CLASS)
        .find_map(|node| decode_star_class(node.value().attr("class")?))
}

/// Parses the leading numeric token of `"<number> out of 5 stars"`.
pub(crate) fn parse_out_of_five(text: &str) -> Option<f64> {
    if !text.contains("out of 5 stars") {
        return None;
    }
    text.split_whitespace().next()?.parse().ok()
}

/// Decodes `a-star-<major>` or `a-star-<major>[-.]<minor>` class tokens.
fn decode_star_class(classes: &str) -> Option<f64> {
    let captures = STAR_CLASS_TOKEN.captures(classes)?;
    let major: f64 = captures[1].parse().ok()?;

    let minor = match captures.get(2) {
        // "5" -> 0.5: the minor part is a fractional digit string
        Some(m) => format!("0.{}", m.as_str()).parse().ok()?,
        None => 0.0,
    };

    Some(major + minor)
}
