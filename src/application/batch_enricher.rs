//! Batch enricher: a batch of ids in, one detail request, records out

#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use tracing::debug;

use crate::domain::game::GameRecord;
use crate::domain::services::{HttpFetcher, MarkupParser};
use crate::infrastructure::config::utils::batch_details_url;
use crate::infrastructure::parsing::{ContextualParser, DetailContext, GameDetailParser};
use crate::infrastructure::scrape_error::ScrapeResult;

/// Fetches the XML API document for a batch and runs the field table over it
pub struct BatchEnricher {
    fetcher: Arc<dyn HttpFetcher>,
    markup: Arc<dyn MarkupParser>,
    parser: GameDetailParser,
    base_url: String,
}

impl BatchEnricher {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        markup: Arc<dyn MarkupParser>,
        parser: GameDetailParser,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            markup,
            parser,
            base_url: base_url.into(),
        }
    }

    /// Fetch details for `ids` in a single request.
    ///
    /// Records come back in document order. Ids the document does not
    /// describe are silently absent. An empty slice makes no request.
    pub async fn fetch_batch_details<S: AsRef<str>>(&self, ids: &[S]) -> ScrapeResult<Vec<GameRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = batch_details_url(&self.base_url, ids);
        let body = self.fetcher.fetch_text(&url).await?;

        let document = self.markup.parse_xml(&body, &url)?;
        let context = DetailContext::new(url, self.base_url.clone(), ids);
        let records = self.parser.parse_with_context(&document, &context)?;

        if records.len() < ids.len() {
            debug!(
                "Batch returned {} records for {} requested ids",
                records.len(),
                ids.len()
            );
        }
        Ok(records)
    }
}
