//! Document cache: deterministic keys and atomic on-disk storage
//!
//! The cache makes re-runs incremental: a key that already exists on disk
//! short-circuits the network fetch entirely. Layout under the root
//! directory follows the original listing crawl: one date-stamped
//! subdirectory per calendar day (under the daily policy), one file per
//! listing page (`{location}_{page:04}.html`), and one subdirectory per
//! listing page holding its followed detail documents.

mod key;
mod store;

pub use key::CacheKey;
pub use store::DocumentStore;

use crate::config::CachePolicySpec;

/// Cache-coherence policy. This is an explicit parameter, not an inferred
/// behavior: `Daily` means "fetch at most once per key per calendar day",
/// `Permanent` means a key is never re-fetched once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Daily,
    Permanent,
}

impl From<CachePolicySpec> for CachePolicy {
    fn from(spec: CachePolicySpec) -> Self {
        match spec {
            CachePolicySpec::Daily => CachePolicy::Daily,
            CachePolicySpec::Permanent => CachePolicy::Permanent,
        }
    }
}
