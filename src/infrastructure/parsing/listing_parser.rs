//! Game listing parser
//!
//! Reads the ranked browse page: every game-name anchor becomes a `GameRef`
//! in document order, so the site ranking is preserved.

#![allow(clippy::uninlined_format_args)]

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::config::ListingSelectors;
use super::{ContextualParser, ListingContext};
use crate::domain::game::GameRef;
use crate::infrastructure::config::utils::resolve_link;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Parser for ranked listing pages
#[derive(Debug, Clone)]
pub struct GameListParser {
    anchor_selector: Selector,
    id_pattern: Regex,
}

impl GameListParser {
    /// Create a listing parser with the default selectors
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(&ListingSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        let anchor_selector = Selector::parse(&selectors.anchor)
            .map_err(|e| ScrapeError::invalid_selector(&selectors.anchor, e.to_string()))?;

        let id_pattern = Regex::new(&selectors.id_pattern).map_err(|e| {
            ScrapeError::configuration("parsing.listing.id_pattern", e.to_string())
        })?;
        if id_pattern.captures_len() < 2 {
            return Err(ScrapeError::configuration(
                "parsing.listing.id_pattern",
                format!("pattern '{}' has no capture group for the id", selectors.id_pattern),
            ));
        }

        Ok(Self {
            anchor_selector,
            id_pattern,
        })
    }

    /// Pull the game id out of a listing href
    pub fn extract_id(&self, href: &str) -> Option<String> {
        self.id_pattern
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl ContextualParser for GameListParser {
    type Output = Vec<GameRef>;
    type Context = ListingContext;

    /// Any anchor without a usable href fails the whole page
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ScrapeResult<Self::Output> {
        debug!("Parsing listing page {}", context.page);

        let mut games = Vec::new();
        for (index, anchor) in html.select(&self.anchor_selector).enumerate() {
            let href = anchor.value().attr("href").ok_or_else(|| {
                ScrapeError::malformed_listing(
                    context.page,
                    None,
                    format!("anchor {} has no href attribute", index),
                )
            })?;

            let id = self.extract_id(href).ok_or_else(|| {
                ScrapeError::malformed_listing(
                    context.page,
                    Some(href),
                    format!("no game id in link '{}'", href),
                )
            })?;

            let name: String = anchor.text().collect();
            games.push(GameRef::new(name, id, resolve_link(&context.base_url, href)));
        }

        if games.is_empty() {
            warn!("No game anchors found on listing page {}", context.page);
        } else {
            debug!("Extracted {} games from listing page {}", games.len(), context.page);
        }

        Ok(games)
    }
}
