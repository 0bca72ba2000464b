//! Gleaner: a declarative extraction-and-crawl engine
//!
//! This crate extracts structured records from paginated search-result
//! listings and the detail pages they link to. A caller declares, without
//! per-page procedural code: which structural path in an HTML document yields
//! a field's value, how to walk to subsequent result pages, how to follow a
//! discovered link into a child document and merge its fields back into the
//! parent record, and how fetched documents are cached on disk so re-runs
//! are incremental.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod document;
pub mod extract;
pub mod output;
pub mod path;
pub mod schema;

use thiserror::Error;

/// Main error type for gleaner operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network or cache-storage failure while obtaining a document.
    /// Timeouts classify here as well; there is no retry.
    #[error("Fetch failed for {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Parse failed for {url}: {message}")]
    ParseFailed { url: String, message: String },

    /// Two fields would share the same output column after a JOIN merge.
    /// Detected at schema-build time, before any network access.
    #[error("Ambiguous extraction: entity '{entity}' declares output column '{field}' more than once")]
    ExtractionAmbiguous { entity: String, field: String },

    /// A field marked required matched no node.
    #[error("Required field '{field}' of entity '{entity}' is absent on {url}")]
    MissingField {
        entity: String,
        field: String,
        url: String,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GleanError {
    /// Wraps any underlying cause as a `FetchFailed` carrying the URL.
    pub fn fetch_failed<E>(url: &url::Url, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GleanError::FetchFailed {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for gleaner operations
pub type Result<T> = std::result::Result<T, GleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, DocumentAccessor, Orchestrator};
pub use document::Document;
pub use extract::{ExtractionMode, ExtractionRule};
pub use path::{Combinator, PathStep, StructuralPath, TextMatch};
pub use schema::{EntitySchema, Field, LinkFollower, MergePolicy, Record};
