//! Site scraping and content normalization.
//!
//! The engine consumes a `fetch(url) -> HTML` primitive and exposes a
//! `scrape(slug) -> normalized record` contract. Its two public entry
//! points ([`GalleryScraper::fetch_list`] and
//! [`GalleryScraper::scrape_detail`]) always return structurally valid
//! results; fetch failures and selector misses degrade individual
//! fields and are reported through the accumulated log list instead of
//! errors. Only configuration mistakes surface as [`ScrapeError`].

pub mod engine;
pub mod http;

pub use engine::GalleryScraper;
pub use http::{FetchError, Fetcher, HttpClient};

/// Hard errors: programming/config mistakes, not transient scraping
/// conditions.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The requested content kind has no scraper configuration.
    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    /// The configuration itself is unusable (bad base URL).
    #[error("Invalid scraper configuration: {0}")]
    InvalidConfig(String),
}
