//! Game detail parser for the XML API batch document
//!
//! Every game element under the collection root becomes one `GameRecord`
//! by running the field extraction table against it. Ids the batch did not
//! ask for, and elements the API marks as unknown, produce no record.

#![allow(clippy::uninlined_format_args)]

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::config::ParsingConfig;
use super::field_spec::{CompiledFieldSpec, compile_field_specs};
use super::{ContextualParser, DetailContext};
use crate::domain::game::GameRecord;
use crate::infrastructure::config::utils::game_link;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Parser turning a batch detail document into records
#[derive(Debug, Clone)]
pub struct GameDetailParser {
    game_selector: Selector,
    missing_item_selector: Selector,
    id_attribute: String,
    fields: Vec<CompiledFieldSpec>,
}

impl GameDetailParser {
    /// Create a detail parser with the default field table
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    /// Create parser with custom selectors and field table
    pub fn with_config(config: &ParsingConfig) -> ScrapeResult<Self> {
        let detail = &config.detail;
        Ok(Self {
            game_selector: compile_selector(&detail.game_element)?,
            missing_item_selector: compile_selector(&detail.missing_item)?,
            id_attribute: detail.id_attribute.clone(),
            fields: compile_field_specs(&config.fields)?,
        })
    }

    /// Build one record from a game element
    fn extract_record(&self, element: ElementRef<'_>, id: &str, base_url: &str) -> GameRecord {
        let mut record = GameRecord::new(id.to_string(), game_link(base_url, id));
        for spec in &self.fields {
            record.set(spec.field, spec.extract(element));
        }
        record
    }
}

fn compile_selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::invalid_selector(css, e.to_string()))
}

impl ContextualParser for GameDetailParser {
    type Output = Vec<GameRecord>;
    type Context = DetailContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ScrapeResult<Self::Output> {
        debug!("Parsing detail document from {}", context.url);

        let mut records = Vec::new();
        for element in html.select(&self.game_selector) {
            let id = element.value().attr(&self.id_attribute).unwrap_or_default();

            if !context.is_requested(id) {
                warn!("Dropping game element with unrequested id '{}' from {}", id, context.url);
                continue;
            }

            if element.select(&self.missing_item_selector).next().is_some() {
                debug!("Game {} not known to the API, skipping", id);
                continue;
            }

            records.push(self.extract_record(element, id, &context.base_url));
        }

        debug!(
            "Extracted {} of {} requested games",
            records.len(),
            context.requested_ids.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://boardgamegeek.com";

    const SINGLE_GAME: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<boardgames termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
  <boardgame objectid="100">
    <name sortindex="1">Alt Name</name>
    <name primary="true" sortindex="1">Foo</name>
    <statistics page="1">
      <ratings>
        <usersrated>42</usersrated>
        <average>7.5</average>
        <bayesaverage>6.9</bayesaverage>
        <ranks>
          <rank type="family" id="5497" name="strategygames" friendlyname="Strategy Game Rank" value="9" bayesaverage="6.9" />
          <rank type="subtype" id="1" name="boardgame" friendlyname="Board Game Rank" value="5" bayesaverage="6.9" />
        </ranks>
        <owned>1000</owned>
        <averageweight>2.5</averageweight>
      </ratings>
    </statistics>
  </boardgame>
</boardgames>"#;

    fn parse(xml: &str, ids: &[&str]) -> Vec<GameRecord> {
        let parser = GameDetailParser::new().unwrap();
        let doc = Html::parse_document(xml);
        let context = DetailContext::new("https://test/xmlapi".to_string(), BASE.to_string(), ids);
        parser.parse_with_context(&doc, &context).unwrap()
    }

    #[test]
    fn test_parser_creation() {
        assert!(GameDetailParser::new().is_ok());
    }

    #[test]
    fn test_single_game_fields_are_raw_strings() {
        let records = parse(SINGLE_GAME, &["100"]);
        assert_eq!(records.len(), 1);

        let game = &records[0];
        assert_eq!(game.id, "100");
        assert_eq!(game.name, "Foo");
        assert_eq!(game.rank, "5");
        assert_eq!(game.num_ratings, "42");
        assert_eq!(game.average_rating, "7.5");
        assert_eq!(game.bgg_rating, "6.9");
        assert_eq!(game.num_owned, "1000");
        assert_eq!(game.weight, "2.5");
        assert_eq!(game.link, "https://boardgamegeek.com/boardgame/100");
    }

    #[test]
    fn test_missing_selectors_yield_empty_strings() {
        let records = parse(SINGLE_GAME, &["100"]);
        let game = &records[0];
        assert_eq!(game.min_players, "");
        assert_eq!(game.max_players, "");
        assert_eq!(game.min_time, "");
        assert_eq!(game.max_time, "");
    }

    #[test]
    fn test_missing_rank_yields_empty_string() {
        let xml = r#"<boardgames><boardgame objectid="3"><name primary="true">X</name></boardgame></boardgames>"#;
        let records = parse(xml, &["3"]);
        assert_eq!(records[0].rank, "");
    }

    #[test]
    fn test_requested_id_absent_from_document_has_no_record() {
        let records = parse(SINGLE_GAME, &["100", "200"]);
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.id != "200"));
    }

    #[test]
    fn test_unrequested_ids_are_dropped() {
        let xml = r#"<boardgames>
            <boardgame objectid="1"><minplayers>2</minplayers></boardgame>
            <boardgame objectid="999"><minplayers>1</minplayers></boardgame>
            <boardgame><minplayers>3</minplayers></boardgame>
        </boardgames>"#;
        let records = parse(xml, &["1"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].min_players, "2");
    }

    #[test]
    fn test_unknown_item_marker_is_skipped() {
        let xml = r#"<boardgames>
            <boardgame objectid="1"><error message="Item not found"></error></boardgame>
            <boardgame objectid="2"><maxplaytime>60</maxplaytime></boardgame>
        </boardgames>"#;
        let records = parse(xml, &["1", "2"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
        assert_eq!(records[0].max_time, "60");
    }

    #[test]
    fn test_document_order_is_kept() {
        let xml = r#"<boardgames>
            <boardgame objectid="30"></boardgame>
            <boardgame objectid="10"></boardgame>
            <boardgame objectid="20"></boardgame>
        </boardgames>"#;
        let ids: Vec<String> = parse(xml, &["10", "20", "30"]).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["30", "10", "20"]);
    }

    #[test]
    fn test_game_elements_outside_collection_are_ignored() {
        let xml = r#"<other><boardgame objectid="1"></boardgame></other>"#;
        assert!(parse(xml, &["1"]).is_empty());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        assert_eq!(parse(SINGLE_GAME, &["100"]), parse(SINGLE_GAME, &["100"]));
    }
}
