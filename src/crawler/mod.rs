//! Crawling: document access, pagination, and record assembly
//!
//! The pieces compose bottom-up: `fetcher` speaks HTTP, `accessor` layers
//! the document cache over it, `paginator` walks the bounded page sequence,
//! `assembler` runs an entity schema over each page, and `orchestrator`
//! ties a full run together from a loaded configuration.

pub mod accessor;
pub mod assembler;
pub mod fetcher;
pub mod orchestrator;
pub mod paginator;

pub use accessor::{DocumentAccessor, PersistMode};
pub use assembler::{assemble, AssembleOptions, DetailFailure};
pub use fetcher::{build_http_client, fetch_page};
pub use orchestrator::{CrawlReport, Orchestrator};
pub use paginator::Paginator;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl from a loaded configuration.
pub async fn crawl(config: &Config) -> Result<CrawlReport> {
    Orchestrator::from_config(config)?.crawl().await
}
