//! `scraper` backed document parser
//!
//! Both the listing page and the XML API response go through html5ever.
//! The tree builder is lenient about XML (self-closing tags nest their
//! following siblings), which is harmless here because every selector in
//! the field table is a descendant lookup.

use scraper::Html;
use tracing::debug;

use crate::domain::services::MarkupParser;
use crate::infrastructure::scrape_error::{DocumentKind, ScrapeError, ScrapeResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperMarkupParser;

impl ScraperMarkupParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_document(kind: DocumentKind, body: &str, source_url: &str) -> ScrapeResult<Html> {
        if body.trim().is_empty() {
            return Err(ScrapeError::parse(kind, source_url, "empty response body"));
        }
        if !body.contains('<') {
            return Err(ScrapeError::parse(kind, source_url, "response contains no markup"));
        }

        debug!("Parsing {} document ({} bytes) from {}", kind, body.len(), source_url);
        Ok(Html::parse_document(body))
    }
}

impl MarkupParser for ScraperMarkupParser {
    fn parse_html(&self, body: &str, source_url: &str) -> ScrapeResult<Html> {
        Self::parse_document(DocumentKind::Html, body, source_url)
    }

    fn parse_xml(&self, body: &str, source_url: &str) -> ScrapeResult<Html> {
        Self::parse_document(DocumentKind::Xml, body, source_url)
    }
}
