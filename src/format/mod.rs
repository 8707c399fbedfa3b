//! Output rendering for products and reviews (JSON, table).

use crate::amazon::models::{Product, Review};
use crate::config::OutputFormat;

/// Renders scraped data for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats product details (any attached reviews included).
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => json_pretty(product),
            OutputFormat::Table => self.table_product(product),
        }
    }

    /// Formats a review list on its own.
    pub fn format_reviews(&self, reviews: &[Review]) -> String {
        match self.format {
            OutputFormat::Json => json_pretty(&reviews),
            OutputFormat::Table => {
                if reviews.is_empty() {
                    "No reviews found.".to_string()
                } else {
                    reviews
                        .iter()
                        .map(|r| self.table_review(r))
                        .collect::<Vec<_>>()
                        .join("\n\n")
                }
            }
        }
    }

    fn table_product(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:       {}", field(&product.title)));
        lines.push(format!("Price:       {}", field(&product.price)));

        if product.rating > 0.0 {
            lines.push(format!("Rating:      {:.1}/5", product.rating));
        } else {
            lines.push("Rating:      N/A".to_string());
        }

        lines.push(format!("Description: {}", field(&product.description)));

        if !product.reviews.is_empty() {
            lines.push(String::new());
            lines.push(format!("Reviews ({}):", product.reviews.len()));
            for review in &product.reviews {
                lines.push(String::new());
                lines.push(self.table_review(review));
            }
        }

        lines.join("\n")
    }

    fn table_review(&self, review: &Review) -> String {
        let mut lines = Vec::new();

        let stars = if review.rating > 0.0 {
            format!("{:.1}/5", review.rating)
        } else {
            "N/A".to_string()
        };

        let verified = if review.verified { " [Verified Purchase]" } else { "" };

        lines.push(format!("  {} - {}{}", stars, field(&review.title), verified));
        lines.push(format!("  By {} | {}", field(&review.author), field(&review.date)));
        if let Some(content) = &review.content {
            lines.push(format!("  {}", content));
        }

        lines.join("\n")
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
