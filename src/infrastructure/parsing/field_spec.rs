//! Declarative field extraction table for the XML detail document
//!
//! Each entry maps one output field to a selector and an extraction rule.
//! Selectors are scoped to a single game element and only the first
//! matching descendant is considered.

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::domain::game::GameField;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// How a value is read from the matched element.
///
/// Both rules map "no element" to the empty string, so a record never has a
/// missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionRule {
    /// Concatenated text content of the element
    #[default]
    TextContent,
    /// Value of the named attribute
    Attribute(String),
}

impl ExtractionRule {
    pub fn apply(&self, element: Option<ElementRef<'_>>) -> String {
        let Some(element) = element else {
            return String::new();
        };
        match self {
            ExtractionRule::TextContent => element.text().collect(),
            ExtractionRule::Attribute(name) => element
                .value()
                .attr(name)
                .map(str::to_string)
                .unwrap_or_default(),
        }
    }
}

/// One row of the extraction table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: GameField,
    pub selector: String,
    #[serde(default)]
    pub rule: ExtractionRule,
}

impl FieldSpec {
    /// Selector read with the default text rule
    pub fn text(field: GameField, selector: &str) -> Self {
        Self {
            field,
            selector: selector.to_string(),
            rule: ExtractionRule::TextContent,
        }
    }

    /// Selector read through a named attribute
    pub fn attribute(field: GameField, selector: &str, attribute: &str) -> Self {
        Self {
            field,
            selector: selector.to_string(),
            rule: ExtractionRule::Attribute(attribute.to_string()),
        }
    }

    pub fn compile(&self) -> ScrapeResult<CompiledFieldSpec> {
        let selector = Selector::parse(&self.selector)
            .map_err(|e| ScrapeError::invalid_selector(&self.selector, e.to_string()))?;
        Ok(CompiledFieldSpec {
            field: self.field,
            selector,
            rule: self.rule.clone(),
        })
    }
}

/// Field spec with its selector parsed once up front
#[derive(Debug, Clone)]
pub struct CompiledFieldSpec {
    pub field: GameField,
    pub selector: Selector,
    pub rule: ExtractionRule,
}

impl CompiledFieldSpec {
    /// Run the rule against the first matching descendant of `scope`
    pub fn extract(&self, scope: ElementRef<'_>) -> String {
        self.rule.apply(scope.select(&self.selector).next())
    }
}

/// Statistics pulled for every game, in CSV column order
pub fn default_field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text(GameField::Name, r#"name[primary="true"]"#),
        FieldSpec::attribute(GameField::Rank, r#"rank[name="boardgame"]"#, "value"),
        FieldSpec::text(GameField::AverageRating, "ratings average"),
        FieldSpec::text(GameField::BggRating, "ratings bayesaverage"),
        FieldSpec::text(GameField::NumRatings, "usersrated"),
        FieldSpec::text(GameField::NumOwned, "owned"),
        FieldSpec::text(GameField::Weight, "averageweight"),
        FieldSpec::text(GameField::MinPlayers, "minplayers"),
        FieldSpec::text(GameField::MaxPlayers, "maxplayers"),
        FieldSpec::text(GameField::MinTime, "minplaytime"),
        FieldSpec::text(GameField::MaxTime, "maxplaytime"),
    ]
}

/// Compile a whole table, failing on the first bad selector
pub fn compile_field_specs(specs: &[FieldSpec]) -> ScrapeResult<Vec<CompiledFieldSpec>> {
    specs.iter().map(FieldSpec::compile).collect()
}
