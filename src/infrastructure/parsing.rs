//! HTML/XML parsing infrastructure
//!
//! Trait-based parsers for the two documents the scraper reads: the ranked
//! listing page and the batch detail document.

pub mod config;
pub mod context;
pub mod detail_parser;
pub mod field_spec;
pub mod listing_parser;

// Re-export public types
pub use config::{DetailSelectors, ListingSelectors, ParsingConfig};
pub use context::{DetailContext, ListingContext};
pub use detail_parser::GameDetailParser;
pub use field_spec::{CompiledFieldSpec, ExtractionRule, FieldSpec, default_field_specs};
pub use listing_parser::GameListParser;

use scraper::Html;

use crate::infrastructure::scrape_error::ScrapeResult;

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse a document with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ScrapeResult<Self::Output>;
}
