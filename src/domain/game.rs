//! Game entities produced by the listing and detail stages
//!
//! `GameRef` is what a listing page yields; `GameRecord` is the flattened,
//! export-ready row built from the XML detail document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A game as discovered on a ranked listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    /// Display name as rendered in the listing anchor
    pub name: String,
    /// Numeric BGG object id, kept as the raw string from the link
    pub id: String,
    /// Absolute link to the game page
    pub link: String,
}

impl GameRef {
    pub fn new(name: String, id: String, link: String) -> Self {
        Self { name, id, link }
    }
}

impl fmt::Display for GameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id: {})", self.name, self.id)
    }
}

/// Output fields filled by the extraction table.
///
/// `id` and `link` are not listed here: they come from the enclosing
/// element and the URL template rather than from a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameField {
    Name,
    Rank,
    AverageRating,
    BggRating,
    NumRatings,
    NumOwned,
    Weight,
    MinPlayers,
    MaxPlayers,
    MinTime,
    MaxTime,
}

impl GameField {
    /// All extractable fields in column order
    pub const ALL: [GameField; 11] = [
        GameField::Name,
        GameField::Rank,
        GameField::AverageRating,
        GameField::BggRating,
        GameField::NumRatings,
        GameField::NumOwned,
        GameField::Weight,
        GameField::MinPlayers,
        GameField::MaxPlayers,
        GameField::MinTime,
        GameField::MaxTime,
    ];

    /// Column header used in the CSV export
    pub fn column_name(self) -> &'static str {
        match self {
            GameField::Name => "name",
            GameField::Rank => "rank",
            GameField::AverageRating => "averageRating",
            GameField::BggRating => "bggRating",
            GameField::NumRatings => "numRatings",
            GameField::NumOwned => "numOwned",
            GameField::Weight => "weight",
            GameField::MinPlayers => "minPlayers",
            GameField::MaxPlayers => "maxPlayers",
            GameField::MinTime => "minTime",
            GameField::MaxTime => "maxTime",
        }
    }
}

impl fmt::Display for GameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One exported row.
///
/// Every value is the raw string found in the detail document. Numeric
/// looking values (rank, ratings, player counts) are intentionally left
/// unparsed. Field declaration order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub average_rating: String,
    pub bgg_rating: String,
    pub num_ratings: String,
    pub num_owned: String,
    pub weight: String,
    pub min_players: String,
    pub max_players: String,
    pub min_time: String,
    pub max_time: String,
    pub link: String,
}

impl GameRecord {
    /// CSV header row, matching the struct field order
    pub const COLUMNS: [&'static str; 13] = [
        "id",
        "name",
        "rank",
        "averageRating",
        "bggRating",
        "numRatings",
        "numOwned",
        "weight",
        "minPlayers",
        "maxPlayers",
        "minTime",
        "maxTime",
        "link",
    ];

    /// Create a record with every extracted field empty
    pub fn new(id: String, link: String) -> Self {
        Self {
            id,
            link,
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: GameField, value: String) {
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: GameField) -> &str {
        match field {
            GameField::Name => &self.name,
            GameField::Rank => &self.rank,
            GameField::AverageRating => &self.average_rating,
            GameField::BggRating => &self.bgg_rating,
            GameField::NumRatings => &self.num_ratings,
            GameField::NumOwned => &self.num_owned,
            GameField::Weight => &self.weight,
            GameField::MinPlayers => &self.min_players,
            GameField::MaxPlayers => &self.max_players,
            GameField::MinTime => &self.min_time,
            GameField::MaxTime => &self.max_time,
        }
    }

    fn slot_mut(&mut self, field: GameField) -> &mut String {
        match field {
            GameField::Name => &mut self.name,
            GameField::Rank => &mut self.rank,
            GameField::AverageRating => &mut self.average_rating,
            GameField::BggRating => &mut self.bgg_rating,
            GameField::NumRatings => &mut self.num_ratings,
            GameField::NumOwned => &mut self.num_owned,
            GameField::Weight => &mut self.weight,
            GameField::MinPlayers => &mut self.min_players,
            GameField::MaxPlayers => &mut self.max_players,
            GameField::MinTime => &mut self.min_time,
            GameField::MaxTime => &mut self.max_time,
        }
    }
}
