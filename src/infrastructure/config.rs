//! Configuration infrastructure
//!
//! Every knob of a run lives in `AppConfig`. Defaults reproduce the fixed
//! behavior of the scraper (10 listing pages, batches of 20, one second of
//! pacing before every request, `output.csv` in the working directory).
//! An optional JSON file can override any subset of them; the manager only
//! ever reads it.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use url::Url;

use crate::infrastructure::http_client::HttpClientConfig;
use crate::infrastructure::parsing::ParsingConfig;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing/batching behavior of the pipeline
    pub scraping: ScrapingConfig,

    /// HTTP client settings
    pub http: HttpClientConfig,

    /// Selectors and the field extraction table
    pub parsing: ParsingConfig,

    /// Where the CSV lands
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Site root used for every URL the pipeline builds
    pub base_url: String,

    /// Number of ranked listing pages to walk, starting at page 1
    pub page_count: u32,

    /// Identifiers per detail request
    pub batch_size: usize,

    /// Pause before every outbound request, in milliseconds
    pub request_delay_ms: u64,
}

impl ScrapingConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: bgg::BASE_URL.to_string(),
            page_count: defaults::PAGE_COUNT,
            batch_size: defaults::BATCH_SIZE,
            request_delay_ms: defaults::REQUEST_DELAY_MS,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// CSV destination, relative paths resolve against the working directory
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(defaults::OUTPUT_FILE),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Write logs to standard error
    pub console_output: bool,

    /// Also write logs to a file
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    /// Log file name inside the log directory
    pub log_file_name: String,

    /// Module-specific log level filters (e.g. "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            log_file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> ScrapeResult<()> {
        let base = Url::parse(&self.scraping.base_url).map_err(|e| {
            ScrapeError::configuration("scraping.base_url", format!("invalid URL: {}", e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScrapeError::configuration(
                "scraping.base_url",
                format!("unsupported scheme '{}'", base.scheme()),
            ));
        }
        if self.scraping.page_count == 0 {
            return Err(ScrapeError::configuration(
                "scraping.page_count",
                "at least one listing page is required",
            ));
        }
        if self.scraping.batch_size == 0 {
            return Err(ScrapeError::configuration(
                "scraping.batch_size",
                "batch size must be positive",
            ));
        }
        if self.parsing.fields.is_empty() {
            return Err(ScrapeError::configuration(
                "parsing.fields",
                "the field extraction table is empty",
            ));
        }
        Ok(())
    }
}

/// Locates and reads the optional configuration file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    candidates: Vec<PathBuf>,
}

impl ConfigManager {
    /// Get the per-user configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Look in the working directory first, then the user config directory
    pub fn new() -> Self {
        let mut candidates = vec![PathBuf::from(defaults::CONFIG_FILE_NAME)];
        if let Ok(dir) = Self::get_config_dir() {
            candidates.push(dir.join(defaults::CONFIG_FILE_NAME));
        }
        Self { candidates }
    }

    /// Use exactly one file location
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    /// First candidate file that exists, if any
    pub fn locate(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.is_file())
    }

    /// Load configuration, falling back to defaults when no file exists
    pub async fn load_config(&self) -> Result<AppConfig> {
        let config = match self.locate() {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read configuration file {:?}", path))?;
                serde_json::from_str::<AppConfig>(&content)
                    .with_context(|| format!("Failed to parse configuration file {:?}", path))?
            }
            None => AppConfig::default(),
        };

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// BoardGameGeek URLs
pub mod bgg {
    /// Site root
    pub const BASE_URL: &str = "https://boardgamegeek.com";

    /// Ranked browse listing, followed by the page number
    pub const LISTING_PATH: &str = "/browse/boardgame/page/";

    /// Legacy XML API, followed by comma separated ids
    pub const DETAIL_API_PATH: &str = "/xmlapi/boardgame/";

    /// Query asking the XML API for the statistics block
    pub const STATS_QUERY: &str = "stats=1";

    /// Canonical game page, followed by the id
    pub const GAME_PAGE_PATH: &str = "/boardgame/";
}

/// Default configuration values
pub mod defaults {
    /// Default number of ranked listing pages
    pub const PAGE_COUNT: u32 = 10;

    /// Default identifiers per detail request
    pub const BATCH_SIZE: usize = 20;

    /// Default pause before each request in milliseconds
    pub const REQUEST_DELAY_MS: u64 = 1000;

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Default user agent
    pub const USER_AGENT: &str = concat!("bgg-top-games/", env!("CARGO_PKG_VERSION"));

    /// Default CSV file name
    pub const OUTPUT_FILE: &str = "output.csv";

    /// Optional configuration file name
    pub const CONFIG_FILE_NAME: &str = "bgg_top_games.json";

    /// Directory name under the user config directory
    pub const APP_DIR_NAME: &str = "bgg-top-games";

    // Selector defaults
    /// Anchors of the game-name cells on a listing page
    pub const LISTING_ANCHOR_SELECTOR: &str = ".collection_objectname a";

    /// Pattern capturing the numeric id out of a listing href
    pub const LISTING_ID_PATTERN: &str = r"/boardgame/(\d+)";

    /// Game elements under the top-level collection of the XML document
    pub const GAME_ELEMENT_SELECTOR: &str = "boardgames > boardgame";

    /// Attribute carrying the id on a game element
    pub const GAME_ID_ATTRIBUTE: &str = "objectid";

    /// Child element the API emits for ids it does not know
    pub const MISSING_ITEM_SELECTOR: &str = "error";

    // Log configuration defaults
    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "bgg-top-games.log";
}

/// URL building helper functions
pub mod utils {
    use super::bgg::{DETAIL_API_PATH, GAME_PAGE_PATH, LISTING_PATH, STATS_QUERY};

    fn root(base_url: &str) -> &str {
        base_url.trim_end_matches('/')
    }

    /// Ranked listing page, e.g. `https://boardgamegeek.com/browse/boardgame/page/3`
    pub fn listing_page_url(base_url: &str, page: u32) -> String {
        format!("{}{}{}", root(base_url), LISTING_PATH, page)
    }

    /// Detail request for a batch of ids with statistics enabled
    pub fn batch_details_url<S: AsRef<str>>(base_url: &str, ids: &[S]) -> String {
        let joined = ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        format!("{}{}{}?{}", root(base_url), DETAIL_API_PATH, joined, STATS_QUERY)
    }

    /// Canonical game page for an id
    pub fn game_link(base_url: &str, id: &str) -> String {
        format!("{}{}{}", root(base_url), GAME_PAGE_PATH, id)
    }

    /// Absolute link for a listing href
    pub fn resolve_link(base_url: &str, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", root(base_url), href)
        } else {
            format!("{}/{}", root(base_url), href)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_fixed_pipeline_constants() {
        let config = AppConfig::default();
        assert_eq!(config.scraping.page_count, 10);
        assert_eq!(config.scraping.batch_size, 20);
        assert_eq!(config.scraping.request_delay(), Duration::from_millis(1000));
        assert_eq!(config.scraping.base_url, "https://boardgamegeek.com");
        assert_eq!(config.export.output_path, PathBuf::from("output.csv"));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("not a url", "scraping.base_url")]
    #[case("ftp://boardgamegeek.com", "scraping.base_url")]
    fn test_validate_rejects_bad_base_url(#[case] base_url: &str, #[case] expected_field: &str) {
        let mut config = AppConfig::default();
        config.scraping.base_url = base_url.to_string();
        match config.validate() {
            Err(ScrapeError::Configuration { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = AppConfig::default();
        config.scraping.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scraping.page_count = 0;
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case("https://boardgamegeek.com", 1, "https://boardgamegeek.com/browse/boardgame/page/1")]
    #[case("https://boardgamegeek.com/", 10, "https://boardgamegeek.com/browse/boardgame/page/10")]
    fn test_listing_page_url(#[case] base: &str, #[case] page: u32, #[case] expected: &str) {
        assert_eq!(utils::listing_page_url(base, page), expected);
    }

    #[test]
    fn test_batch_details_url_joins_ids_with_commas() {
        let ids = vec!["174430".to_string(), "161936".to_string(), "224517".to_string()];
        assert_eq!(
            utils::batch_details_url("https://boardgamegeek.com", &ids),
            "https://boardgamegeek.com/xmlapi/boardgame/174430,161936,224517?stats=1"
        );
    }

    #[test]
    fn test_resolve_link() {
        let base = "https://boardgamegeek.com";
        assert_eq!(
            utils::resolve_link(base, "/boardgame/100/foo"),
            "https://boardgamegeek.com/boardgame/100/foo"
        );
        assert_eq!(
            utils::resolve_link(base, "https://other.example/boardgame/1"),
            "https://other.example/boardgame/1"
        );
        assert_eq!(utils::game_link(base, "100"), "https://boardgamegeek.com/boardgame/100");
    }

    #[tokio::test]
    async fn test_load_config_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.json"));
        assert!(manager.locate().is_none());

        let config = manager.load_config().await.unwrap();
        assert_eq!(config.scraping.page_count, defaults::PAGE_COUNT);
    }

    #[tokio::test]
    async fn test_load_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bgg_top_games.json");
        std::fs::write(
            &path,
            r#"{ "scraping": { "page_count": 2, "request_delay_ms": 0 }, "export": { "output_path": "top.csv" } }"#,
        )
        .unwrap();

        let manager = ConfigManager::with_path(&path);
        assert_eq!(manager.locate(), Some(path.as_path()));

        let config = manager.load_config().await.unwrap();
        assert_eq!(config.scraping.page_count, 2);
        assert_eq!(config.scraping.request_delay_ms, 0);
        assert_eq!(config.scraping.batch_size, defaults::BATCH_SIZE);
        assert_eq!(config.export.output_path, PathBuf::from("top.csv"));
        assert_eq!(config.parsing.fields.len(), 11);
    }

    #[tokio::test]
    async fn test_load_invalid_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bgg_top_games.json");
        std::fs::write(&path, r#"{ "scraping": { "batch_size": 0 } }"#).unwrap();

        let result = ConfigManager::with_path(&path).load_config().await;
        assert!(result.is_err());
    }
}
