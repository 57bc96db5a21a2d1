//! Parsing configuration for listing and detail extraction
//!
//! Centralized configuration for CSS selectors, the listing id pattern and
//! the detail field table.

use serde::{Deserialize, Serialize};

use super::field_spec::{FieldSpec, default_field_specs};
use crate::infrastructure::config::defaults;

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Listing page selectors
    pub listing: ListingSelectors,

    /// Detail document selectors
    pub detail: DetailSelectors,

    /// Field extraction table, in output column order
    pub fields: Vec<FieldSpec>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            listing: ListingSelectors::default(),
            detail: DetailSelectors::default(),
            fields: default_field_specs(),
        }
    }
}

/// Selectors for ranked listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Anchor inside each game-name cell
    pub anchor: String,

    /// Regex whose first capture group is the game id in an anchor href
    pub id_pattern: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            anchor: defaults::LISTING_ANCHOR_SELECTOR.to_string(),
            id_pattern: defaults::LISTING_ID_PATTERN.to_string(),
        }
    }
}

/// Selectors for the XML detail document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    /// One element per game under the collection root
    pub game_element: String,

    /// Attribute of the game element holding its id
    pub id_attribute: String,

    /// Marker child for ids the API could not resolve
    pub missing_item: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            game_element: defaults::GAME_ELEMENT_SELECTOR.to_string(),
            id_attribute: defaults::GAME_ID_ATTRIBUTE.to_string(),
            missing_item: defaults::MISSING_ITEM_SELECTOR.to_string(),
        }
    }
}
