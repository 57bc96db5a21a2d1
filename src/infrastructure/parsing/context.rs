//! Parsing context for listing and detail extraction
//!
//! Provides context objects carrying the request-specific state a parser
//! needs (page number, base URL, requested ids).

use std::collections::HashSet;

/// Context information for a listing page
#[derive(Debug, Clone)]
pub struct ListingContext {
    /// Listing page being parsed
    pub page: u32,

    /// Base URL for resolving relative links
    pub base_url: String,
}

impl ListingContext {
    pub fn new(page: u32, base_url: String) -> Self {
        Self { page, base_url }
    }
}

/// Context information for one batch detail document
#[derive(Debug, Clone)]
pub struct DetailContext {
    /// URL the document was fetched from
    pub url: String,

    /// Base URL used to build game links
    pub base_url: String,

    /// Ids that were asked for in this batch
    pub requested_ids: HashSet<String>,
}

impl DetailContext {
    pub fn new<S: AsRef<str>>(url: String, base_url: String, ids: &[S]) -> Self {
        Self {
            url,
            base_url,
            requested_ids: ids.iter().map(|id| id.as_ref().to_string()).collect(),
        }
    }

    pub fn is_requested(&self, id: &str) -> bool {
        self.requested_ids.contains(id)
    }
}
