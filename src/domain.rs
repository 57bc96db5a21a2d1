//! Domain module - game entities and collaborator interfaces
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod game;
pub mod services;

pub use game::{GameField, GameRecord, GameRef};
pub use services::{GameExporter, HttpFetcher, MarkupParser};
