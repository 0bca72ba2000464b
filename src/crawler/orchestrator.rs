//! Crawl orchestration
//!
//! Drives the paginator across result pages and runs the entity schema over
//! each one, concatenating records in page order, item order within a page.
//! No deduplication is performed across pages.

use crate::cache::{CacheKey, DocumentStore};
use crate::config::Config;
use crate::crawler::accessor::{DocumentAccessor, PersistMode};
use crate::crawler::assembler::{assemble, AssembleOptions};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::paginator::Paginator;
use crate::schema::{compile_entity, compile_paginator, EntitySchema, PaginatorConfig, Record};
use crate::{ConfigError, GleanError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Outcome of a completed crawl run.
#[derive(Debug)]
pub struct CrawlReport {
    pub entity: String,
    pub records: Vec<Record>,
    pub pages_visited: u32,
    /// Partition the run's documents were stored in; absent in
    /// read-through mode.
    pub cache_dir: Option<PathBuf>,
}

/// Owns everything a crawl run needs: the compiled schema, the pagination
/// rule, and the document accessor.
pub struct Orchestrator {
    accessor: DocumentAccessor,
    schema: EntitySchema,
    paginator: Option<PaginatorConfig>,
    options: AssembleOptions,
    url_template: String,
    location: String,
}

impl Orchestrator {
    /// Compiles the declared schema and builds the HTTP client and store.
    /// Schema problems (including colliding output columns) fail here,
    /// before any network access.
    pub fn from_config(config: &Config) -> Result<Self> {
        let schema = compile_entity(&config.entity)?;
        let paginator = config
            .paginator
            .as_ref()
            .map(compile_paginator)
            .transpose()?;

        let user_agent = config
            .crawl
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("gleaner/{}", env!("CARGO_PKG_VERSION")));
        let client = build_http_client(
            &user_agent,
            Duration::from_secs(config.crawl.request_timeout_secs),
            Duration::from_secs(config.crawl.connect_timeout_secs),
        )?;

        let store = DocumentStore::new(&config.cache.root_dir, config.cache.policy.into());
        let mode = if config.cache.persist {
            PersistMode::Persist
        } else {
            PersistMode::ReadThrough
        };

        Ok(Orchestrator {
            accessor: DocumentAccessor::new(client, store, mode),
            schema,
            paginator,
            options: AssembleOptions {
                detail_failure: config.crawl.detail_failure.into(),
            },
            url_template: config.crawl.url_template.clone(),
            location: config.crawl.location.clone(),
        })
    }

    /// Runs the crawl to completion. A fetch or parse failure on a listing
    /// page aborts the run; detail-link failures follow the configured
    /// policy.
    pub async fn crawl(&self) -> Result<CrawlReport> {
        let start_url = build_start_url(&self.url_template, &self.location)?;
        tracing::info!(
            entity = self.schema.name(),
            url = %start_url,
            location = %self.location,
            "starting crawl"
        );

        let start_key = CacheKey::listing_page(&self.location, 1);
        let start = self.accessor.resolve(Some(&start_key), &start_url).await?;

        let mut pager = Paginator::new(&self.accessor, start, self.paginator.as_ref(), &self.location);
        let mut records = Vec::new();
        let mut pages_visited = 0u32;

        while let Some(page) = pager.next_page().await? {
            pages_visited += 1;
            tracing::info!(page = pages_visited, url = %page.url(), "extracting items");

            let page_records = assemble(&self.accessor, &self.schema, &page, &self.options).await?;
            tracing::debug!(
                page = pages_visited,
                records = page_records.len(),
                "page assembled"
            );
            records.extend(page_records);
        }

        tracing::info!(
            entity = self.schema.name(),
            records = records.len(),
            pages = pages_visited,
            "crawl complete"
        );

        Ok(CrawlReport {
            entity: self.schema.name().to_string(),
            records,
            pages_visited,
            cache_dir: self
                .accessor
                .persists()
                .then(|| self.accessor.store().partition()),
        })
    }
}

/// Substitutes the location parameter into the URL template. A single
/// substitution point, by design; there is no general templating.
fn build_start_url(template: &str, location: &str) -> Result<Url> {
    let substituted = template.replace("{location}", location);
    Url::parse(&substituted)
        .map_err(|e| {
            GleanError::Config(ConfigError::InvalidUrl(format!(
                "start URL '{}': {}",
                substituted, e
            )))
        })
}
