//! On-disk document storage

use crate::cache::{CacheKey, CachePolicy};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores raw document bytes under deterministic keys.
///
/// Writes are atomic: the body goes to a temporary sibling file which is
/// then renamed into place, so a partially written document is never
/// visible as a valid cache entry. Directory creation is idempotent.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    policy: CachePolicy,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>, policy: CachePolicy) -> Self {
        DocumentStore {
            root: root.into(),
            policy,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory documents of the current run land in. Under the daily
    /// policy this is a date-stamped subdirectory, so the same key fetched
    /// on a later day misses the cache and is fetched again.
    pub fn partition(&self) -> PathBuf {
        match self.policy {
            CachePolicy::Daily => {
                let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
                self.root.join(today.to_string())
            }
            CachePolicy::Permanent => self.root.clone(),
        }
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.partition().join(key.rel_path())
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    pub fn read(&self, key: &CacheKey) -> io::Result<String> {
        fs::read_to_string(self.path_for(key))
    }

    pub fn write(&self, key: &CacheKey, body: &str) -> io::Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = path.clone();
        tmp.set_extension("html.part");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)
    }
}
