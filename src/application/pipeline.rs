//! Top-games pipeline
//!
//! Walks the ranked listing pages in order, enriches the collected games in
//! fixed-size batches through the XML API, and hands the records to the
//! exporter. Every outbound request is preceded by the configured pause and
//! requests are strictly sequential. Any failure aborts the whole run before
//! anything is written.

#![allow(clippy::uninlined_format_args)]

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::application::batch_enricher::BatchEnricher;
use crate::application::listing_reader::ListingReader;
use crate::domain::game::{GameRecord, GameRef};
use crate::domain::services::{GameExporter, HttpFetcher, MarkupParser};
use crate::infrastructure::config::{AppConfig, ScrapingConfig};
use crate::infrastructure::csv_exporter::CsvFileExporter;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::markup::ScraperMarkupParser;
use crate::infrastructure::parsing::{GameDetailParser, GameListParser};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Pacing and sizing for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub page_count: u32,
    pub batch_size: usize,
    pub request_delay: Duration,
}

impl From<&ScrapingConfig> for PipelineSettings {
    fn from(config: &ScrapingConfig) -> Self {
        Self {
            page_count: config.page_count,
            batch_size: config.batch_size,
            request_delay: config.request_delay(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&ScrapingConfig::default())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub refs_collected: usize,
    pub batches_fetched: usize,
    pub records_collected: usize,
    pub output_location: String,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} games listed, {} batches, {} records -> {} in {:.1}s",
            self.pages_fetched,
            self.refs_collected,
            self.batches_fetched,
            self.records_collected,
            self.output_location,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Records gathered before export
#[derive(Debug, Clone, Default)]
pub struct CollectedGames {
    pub refs: Vec<GameRef>,
    pub records: Vec<GameRecord>,
    pub batches_fetched: usize,
}

pub struct Pipeline {
    listing: ListingReader,
    enricher: BatchEnricher,
    exporter: Arc<dyn GameExporter>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        listing: ListingReader,
        enricher: BatchEnricher,
        exporter: Arc<dyn GameExporter>,
        settings: PipelineSettings,
    ) -> ScrapeResult<Self> {
        if settings.page_count == 0 {
            return Err(ScrapeError::configuration(
                "scraping.page_count",
                "at least one listing page is required",
            ));
        }
        if settings.batch_size == 0 {
            return Err(ScrapeError::configuration(
                "scraping.batch_size",
                "batch size must be positive",
            ));
        }

        Ok(Self {
            listing,
            enricher,
            exporter,
            settings,
        })
    }

    /// Assemble a pipeline from configuration around the given collaborators
    pub fn from_config(
        config: &AppConfig,
        fetcher: Arc<dyn HttpFetcher>,
        markup: Arc<dyn MarkupParser>,
        exporter: Arc<dyn GameExporter>,
    ) -> ScrapeResult<Self> {
        config.validate()?;

        let base_url = config.scraping.base_url.trim_end_matches('/').to_string();
        let listing = ListingReader::new(
            fetcher.clone(),
            markup.clone(),
            GameListParser::with_config(&config.parsing.listing)?,
            base_url.clone(),
        );
        let enricher = BatchEnricher::new(
            fetcher,
            markup,
            GameDetailParser::with_config(&config.parsing)?,
            base_url,
        );

        Self::new(listing, enricher, exporter, PipelineSettings::from(&config.scraping))
    }

    /// Production wiring: reqwest client, scraper parser, CSV file
    pub fn with_defaults(config: &AppConfig) -> ScrapeResult<Self> {
        let fetcher = Arc::new(HttpClient::with_config(config.http.clone())?);
        let markup = Arc::new(ScraperMarkupParser::new());
        let exporter = Arc::new(CsvFileExporter::new(config.export.output_path.clone()));
        Self::from_config(config, fetcher, markup, exporter)
    }

    async fn pace(&self) {
        sleep(self.settings.request_delay).await;
    }

    /// Walk listing pages 1..=page_count, concatenating refs in page order
    pub async fn collect_refs(&self) -> ScrapeResult<Vec<GameRef>> {
        let mut refs = Vec::new();

        for page in 1..=self.settings.page_count {
            self.pace().await;
            info!("📄 Fetching listing page {}", page);

            let games = self.listing.fetch_listing_page(page).await?;
            refs.extend(games);
        }

        info!("✅ Collected {} games from {} listing pages", refs.len(), self.settings.page_count);
        Ok(refs)
    }

    /// Enrich refs batch by batch, concatenating records in batch order
    pub async fn enrich(&self, refs: &[GameRef]) -> ScrapeResult<(Vec<GameRecord>, usize)> {
        let mut records = Vec::with_capacity(refs.len());
        let mut batches = 0;

        for (index, batch) in refs.chunks(self.settings.batch_size).enumerate() {
            let start = index * self.settings.batch_size;
            let ids: Vec<&str> = batch.iter().map(|game| game.id.as_str()).collect();

            self.pace().await;
            info!("📦 Fetching games {} to {}", start + 1, start + batch.len());

            let batch_records = self.enricher.fetch_batch_details(&ids).await?;
            debug!("Batch {} produced {} records", index + 1, batch_records.len());
            records.extend(batch_records);
            batches += 1;
        }

        Ok((records, batches))
    }

    /// Listing phase then enrichment phase, with no export
    pub async fn collect_games(&self) -> ScrapeResult<CollectedGames> {
        let refs = self.collect_refs().await?;
        let (records, batches_fetched) = self.enrich(&refs).await?;

        Ok(CollectedGames {
            refs,
            records,
            batches_fetched,
        })
    }

    /// Full run. The exporter is only invoked once every request succeeded.
    pub async fn run(&self) -> ScrapeResult<RunSummary> {
        let started = Instant::now();
        info!(
            "🚀 Starting run: {} listing pages, batches of {}, {}ms between requests",
            self.settings.page_count,
            self.settings.batch_size,
            self.settings.request_delay.as_millis()
        );

        let collected = self.collect_games().await?;
        let output_location = self.exporter.export(&collected.records)?;

        let summary = RunSummary {
            pages_fetched: self.settings.page_count,
            refs_collected: collected.refs.len(),
            batches_fetched: collected.batches_fetched,
            records_collected: collected.records.len(),
            output_location,
            elapsed: started.elapsed(),
        };
        info!("🎉 Run complete: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_follow_scraping_config() {
        let config = ScrapingConfig {
            page_count: 3,
            batch_size: 7,
            request_delay_ms: 250,
            ..ScrapingConfig::default()
        };
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.page_count, 3);
        assert_eq!(settings.batch_size, 7);
        assert_eq!(settings.request_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_default_settings() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.page_count, 10);
        assert_eq!(settings.batch_size, 20);
        assert_eq!(settings.request_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let mut config = AppConfig::default();
        config.scraping.batch_size = 0;
        assert!(matches!(
            Pipeline::with_defaults(&config),
            Err(ScrapeError::Configuration { .. })
        ));
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            pages_fetched: 1,
            refs_collected: 2,
            batches_fetched: 1,
            records_collected: 2,
            output_location: "output.csv".to_string(),
            elapsed: Duration::from_millis(2500),
        };
        assert_eq!(
            summary.to_string(),
            "1 pages, 2 games listed, 1 batches, 2 records -> output.csv in 2.5s"
        );
    }
}
