//! Infrastructure layer for HTTP, parsing, export and process setup
//!
//! This module provides the concrete collaborators behind the domain traits
//! (reqwest client, scraper-based parser, CSV exporter) together with
//! configuration, logging and the error type shared by every layer.

pub mod config;
pub mod csv_exporter;
pub mod http_client;
pub mod logging;
pub mod markup;
pub mod parsing;
pub mod scrape_error;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, ExportConfig, LoggingConfig, ScrapingConfig};
pub use csv_exporter::{CsvFileExporter, write_csv};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{init_fallback_logging, init_logging, init_logging_with_config, log_system_info};
pub use markup::ScraperMarkupParser;
pub use parsing::{GameDetailParser, GameListParser, ParsingConfig};
pub use scrape_error::{DocumentKind, ScrapeError, ScrapeResult};
