//! Amazon-specific modules: page fetching, extraction, and data models.

pub mod client;
pub mod extract;
pub mod models;
pub mod parser;
pub mod rating;
pub mod regions;
pub mod reviews;
pub mod selectors;
pub mod urls;

pub use client::{PageClient, PageSource};
pub use models::{Product, Review, SortKey};
pub use regions::Region;
pub use reviews::{CollectError, ReviewCollector};
pub use urls::ProductRef;
