//! Document accessor: cached-or-fetched document resolution

use crate::cache::{CacheKey, DocumentStore};
use crate::crawler::fetcher::fetch_page;
use crate::document::Document;
use crate::{GleanError, Result};
use reqwest::Client;
use url::Url;

/// Whether resolved documents are persisted to the cache.
///
/// `ReadThrough` is for callers that only need extraction and do not want
/// files created on disk; existing cache entries are still honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    Persist,
    ReadThrough,
}

/// Resolves documents deterministically from cache or network.
///
/// If an entry exists for the key, the stored bytes are parsed and no
/// network call is made. Otherwise the URL is fetched and, in persisting
/// mode, the raw body is stored under the key before the parsed document is
/// returned. Network and storage errors both surface as `FetchFailed`; the
/// accessor does not retry.
pub struct DocumentAccessor {
    client: Client,
    store: DocumentStore,
    mode: PersistMode,
}

impl DocumentAccessor {
    pub fn new(client: Client, store: DocumentStore, mode: PersistMode) -> Self {
        DocumentAccessor {
            client,
            store,
            mode,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn persists(&self) -> bool {
        self.mode == PersistMode::Persist
    }

    /// Resolves a document. A `None` key (a detail link discovered in
    /// read-through mode) always goes to the network and is never stored.
    pub async fn resolve(&self, key: Option<&CacheKey>, url: &Url) -> Result<Document> {
        if let Some(key) = key {
            if self.store.contains(key) {
                tracing::debug!(key = %key.rel_path().display(), %url, "cache hit");
                let body = self
                    .store
                    .read(key)
                    .map_err(|e| GleanError::fetch_failed(url, e))?;
                return Document::parse(&body, url.clone(), Some(key.clone()));
            }
        }

        tracing::debug!(%url, "cache miss, fetching");
        let body = fetch_page(&self.client, url).await?;

        if let (Some(key), PersistMode::Persist) = (key, self.mode) {
            self.store
                .write(key, &body)
                .map_err(|e| GleanError::fetch_failed(url, e))?;
            tracing::debug!(key = %key.rel_path().display(), "stored");
        }

        Document::parse(&body, url.clone(), key.cloned())
    }
}
