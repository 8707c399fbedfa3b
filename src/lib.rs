//! amz-product - Amazon product detail and review scraper CLI
//!
//! A Rust implementation with TLS fingerprint emulation for reliable
//! scraping. Field extraction is built on ordered fallback selector
//! chains so that Amazon markup drift degrades output field-by-field
//! instead of failing whole pages.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod format;

pub use amazon::models::{Product, Review, SortKey};
pub use amazon::regions::Region;
pub use config::Config;
