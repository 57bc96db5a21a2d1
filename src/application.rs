//! Application layer module
//!
//! Use cases that drive the domain traits: reading listing pages, enriching
//! batches of games, and the end-to-end pipeline that ties them together.

pub mod batch_enricher;
pub mod listing_reader;
pub mod pipeline;

pub use batch_enricher::BatchEnricher;
pub use listing_reader::ListingReader;
pub use pipeline::{CollectedGames, Pipeline, PipelineSettings, RunSummary};
