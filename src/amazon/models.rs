//! Data models for scraped products and reviews.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product scraped from an Amazon detail page.
///
/// Every text field is best-effort: markup drift leaves it `None` rather
/// than failing the whole extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Displayed price, kept as raw text (currency symbol included)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Star rating, 0.0 when undecodable
    pub rating: f64,
    /// Product description or feature bullets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Collected reviews, omitted from JSON when empty
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Returns true if no detail field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.rating == 0.0
    }
}

/// A single customer review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Review date as shown on the page (locale-formatted text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Star rating, 0.0 when undecodable
    pub rating: f64,
    /// Review headline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Review body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// True iff the "Verified Purchase" badge was present
    pub verified: bool,
}

/// Review sort order accepted by the review listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Helpful,
    Recent,
    Rating,
}

impl SortKey {
    /// Maps a caller-supplied sort string to a sort key.
    ///
    /// Total mapping: unrecognized values (including the empty string)
    /// fall back to [`SortKey::Helpful`].
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "recent" => SortKey::Recent,
            "rating" => SortKey::Rating,
            _ => SortKey::Helpful,
        }
    }

    /// Returns the `sortBy` query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Helpful => "helpful",
            SortKey::Recent => "recent",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}
