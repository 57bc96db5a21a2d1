//! BGG Top Games - ranked board game scraper
//!
//! Walks the BoardGameGeek ranked listing, enriches every listed game with
//! statistics from the XML API in batches, and writes one CSV row per game.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{Pipeline, RunSummary};
pub use domain::{GameRecord, GameRef};
pub use infrastructure::{AppConfig, ScrapeError, ScrapeResult};
