//! Collaborator interfaces for the scraping pipeline
//!
//! The listing reader, batch enricher and pipeline never reach for a global
//! client or parser. Everything network, markup or filesystem related is
//! passed in through these traits.

use async_trait::async_trait;
use scraper::Html;

use crate::domain::game::GameRecord;
use crate::infrastructure::scrape_error::ScrapeResult;

/// Outbound HTTP GET returning the response body as text
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url`; non-success statuses are reported as network errors
    async fn fetch_text(&self, url: &str) -> ScrapeResult<String>;
}

/// Turns response bodies into queryable documents
pub trait MarkupParser: Send + Sync {
    /// Parse an HTML listing page
    fn parse_html(&self, body: &str, source_url: &str) -> ScrapeResult<Html>;

    /// Parse an XML detail document
    fn parse_xml(&self, body: &str, source_url: &str) -> ScrapeResult<Html>;
}

/// Receives the final record sequence once the whole run succeeded
pub trait GameExporter: Send + Sync {
    /// Write every record; returns a human readable location of the artifact
    fn export(&self, records: &[GameRecord]) -> ScrapeResult<String>;
}
