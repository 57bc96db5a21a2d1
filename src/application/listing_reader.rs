//! Listing reader: one ranked listing page in, game refs out

#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use tracing::debug;

use crate::domain::game::GameRef;
use crate::domain::services::{HttpFetcher, MarkupParser};
use crate::infrastructure::config::utils::listing_page_url;
use crate::infrastructure::parsing::{ContextualParser, GameListParser, ListingContext};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Fetches and parses ranked listing pages
pub struct ListingReader {
    fetcher: Arc<dyn HttpFetcher>,
    markup: Arc<dyn MarkupParser>,
    parser: GameListParser,
    base_url: String,
}

impl ListingReader {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        markup: Arc<dyn MarkupParser>,
        parser: GameListParser,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            markup,
            parser,
            base_url: base_url.into(),
        }
    }

    /// Fetch one listing page (1-based) and return its games in ranking order.
    ///
    /// Makes exactly one request. Pacing is the caller's job.
    pub async fn fetch_listing_page(&self, page: u32) -> ScrapeResult<Vec<GameRef>> {
        if page == 0 {
            return Err(ScrapeError::configuration("page", "listing pages start at 1"));
        }

        let url = listing_page_url(&self.base_url, page);
        let body = self.fetcher.fetch_text(&url).await?;

        let html = self.markup.parse_html(&body, &url)?;
        let games = self
            .parser
            .parse_with_context(&html, &ListingContext::new(page, self.base_url.clone()))?;

        match games.first() {
            Some(first) => debug!("Listing page {} yielded {} games, first {}", page, games.len(), first),
            None => debug!("Listing page {} yielded no games", page),
        }
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::markup::ScraperMarkupParser;
    use crate::infrastructure::scrape_error::DocumentKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request with the same body and counts calls
    struct CountingFetcher {
        body: String,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HttpFetcher for CountingFetcher {
        async fn fetch_text(&self, _url: &str) -> ScrapeResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn reader(fetcher: &Arc<CountingFetcher>) -> ListingReader {
        ListingReader::new(
            fetcher.clone(),
            Arc::new(ScraperMarkupParser::new()),
            GameListParser::new().unwrap(),
            "https://boardgamegeek.com",
        )
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_without_a_request() {
        let fetcher = CountingFetcher::new("<html></html>");

        let result = reader(&fetcher).fetch_listing_page(0).await;

        assert!(matches!(result, Err(ScrapeError::Configuration { .. })));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_body_is_a_parse_error() {
        let fetcher = CountingFetcher::new("");

        let result = reader(&fetcher).fetch_listing_page(1).await;

        assert!(matches!(
            result,
            Err(ScrapeError::Parse { document: DocumentKind::Html, .. })
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_plain_text_body_is_a_parse_error() {
        let fetcher = CountingFetcher::new("Service Unavailable");
        let result = reader(&fetcher).fetch_listing_page(3).await;
        assert!(matches!(result, Err(ScrapeError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_page_yields_games_in_order() {
        let fetcher = CountingFetcher::new(
            "<table><tr><td class=\"collection_objectname\"><a href=\"/boardgame/7/a\">A</a></td></tr>\
             <tr><td class=\"collection_objectname\"><a href=\"/boardgame/3/b\">B</a></td></tr></table>",
        );

        let games = reader(&fetcher).fetch_listing_page(2).await.unwrap();

        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "3"]);
        assert_eq!(games[1].link, "https://boardgamegeek.com/boardgame/3/b");
    }
}
