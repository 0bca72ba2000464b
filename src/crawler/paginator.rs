//! Pagination: a bounded, one-shot sequence of result pages

use crate::cache::CacheKey;
use crate::crawler::accessor::DocumentAccessor;
use crate::document::Document;
use crate::extract::{extract, ExtractionRule};
use crate::schema::PaginatorConfig;
use crate::Result;
use url::Url;

/// Yields the start document first, then up to `max_follow_count` further
/// pages. The next-page URL is always extracted from the most recently
/// yielded document; an absent link ends the sequence early, which is
/// normal exhaustion, not an error. Each page fetch is a one-shot
/// side-effecting operation, so the sequence is not restartable.
pub struct Paginator<'a> {
    accessor: &'a DocumentAccessor,
    config: Option<&'a PaginatorConfig>,
    location: String,
    queued: Option<Document>,
    next_url: Option<Url>,
    next_page_number: u32,
    remaining: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(
        accessor: &'a DocumentAccessor,
        start: Document,
        config: Option<&'a PaginatorConfig>,
        location: &str,
    ) -> Self {
        let remaining = config.map(|c| c.max_follow_count).unwrap_or(0);
        let next_url = if remaining > 0 {
            config.and_then(|c| next_url_from(&start, &c.next_page))
        } else {
            None
        };

        Paginator {
            accessor,
            config,
            location: location.to_string(),
            queued: Some(start),
            next_url,
            next_page_number: 2,
            remaining,
        }
    }

    /// Advances the sequence. Returns `Ok(None)` once the follow cap is
    /// reached or no next-page link was found.
    pub async fn next_page(&mut self) -> Result<Option<Document>> {
        if let Some(doc) = self.queued.take() {
            return Ok(Some(doc));
        }

        if self.remaining == 0 {
            return Ok(None);
        }

        let Some(url) = self.next_url.take() else {
            tracing::debug!("no next-page link, page sequence exhausted");
            return Ok(None);
        };

        let key = CacheKey::listing_page(&self.location, self.next_page_number);
        let doc = self.accessor.resolve(Some(&key), &url).await?;

        self.remaining -= 1;
        self.next_page_number += 1;
        self.next_url = if self.remaining > 0 {
            self.config.and_then(|c| next_url_from(&doc, &c.next_page))
        } else {
            None
        };

        Ok(Some(doc))
    }
}

fn next_url_from(doc: &Document, rule: &ExtractionRule) -> Option<Url> {
    let href = extract(&doc.root(), rule)?;
    match doc.join(&href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(href = %href, error = %e, "next-page link is not a valid URL");
            None
        }
    }
}
