//! Error types for the scraping pipeline
//!
//! Every stage returns `ScrapeResult`. Nothing is retried or recovered
//! below the top-level boundary in `main`: the first error ends the run.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("Network request failed: {url} - {message}")]
    Network {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to parse {document} document from {url}: {reason}")]
    Parse {
        document: DocumentKind,
        url: String,
        reason: String,
    },

    #[error("Malformed listing on page {page}: {reason}")]
    MalformedListing {
        page: u32,
        href: Option<String>,
        reason: String,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Export to {path} failed: {message}")]
    Export { path: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String, field: String },
}

/// Which kind of document failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Xml,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Html => f.write_str("HTML"),
            DocumentKind::Xml => f.write_str("XML"),
        }
    }
}

impl ScrapeError {
    /// Transport-level failure (connection, body read)
    pub fn network(url: &str, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.to_string(),
            status: None,
            message: message.into(),
        }
    }

    /// Non-success HTTP status
    pub fn http_status(url: &str, status: u16) -> Self {
        Self::Network {
            url: url.to_string(),
            status: Some(status),
            message: format!("HTTP error {status}"),
        }
    }

    pub fn parse(document: DocumentKind, url: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            document,
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_listing(page: u32, href: Option<&str>, reason: impl Into<String>) -> Self {
        Self::MalformedListing {
            page,
            href: href.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    pub fn export(path: &str, message: impl Into<String>) -> Self {
        Self::Export {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: field.to_string(),
        }
    }

    /// HTTP status carried by a network error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Short label used in the final log line
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Parse { .. } => "parse",
            Self::MalformedListing { .. } => "malformed-listing",
            Self::InvalidSelector { .. } => "invalid-selector",
            Self::Export { .. } => "export",
            Self::Configuration { .. } => "configuration",
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_keeps_code() {
        let err = ScrapeError::http_status("https://example.com/x", 503);
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.kind(), "network");
        assert!(err.to_string().contains("HTTP error 503"));
    }

    #[test]
    fn test_malformed_listing_message() {
        let err = ScrapeError::malformed_listing(4, Some("/boardgameexpansion/1"), "no game id in link");
        assert_eq!(
            err.to_string(),
            "Malformed listing on page 4: no game id in link"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_parse_error_names_document_kind() {
        let err = ScrapeError::parse(DocumentKind::Xml, "https://example.com/api", "empty body");
        assert!(err.to_string().starts_with("Failed to parse XML document"));
    }
}
