//! Deterministic cache keys

use url::Url;

/// Logical key of one cached document, relative to the cache partition.
///
/// Listing pages sit directly in the partition as `{location}_{page:04}`;
/// detail pages sit in a subdirectory named after the listing page they
/// were discovered on, keyed by an identifier taken from their own URL.
/// Key derivation is run-deterministic, so no two fetches in a single run
/// ever target the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    dir: Option<String>,
    stem: String,
}

impl CacheKey {
    /// Key of a results page. Page numbering is 1-based, matching the
    /// stored file names (`22008_0001.html` is the first page).
    pub fn listing_page(location: &str, page_number: u32) -> Self {
        CacheKey {
            dir: None,
            stem: format!("{}_{:04}", sanitize(location), page_number),
        }
    }

    /// Key of a detail page followed from the listing page stored under
    /// `parent`. The stem is the identifier segment of the detail URL: for
    /// `/Property/307634/EST6886/Springfield` that is `EST6886`.
    pub fn detail_page(parent: &CacheKey, url: &Url) -> Self {
        CacheKey {
            dir: Some(parent.stem.clone()),
            stem: identifier_from_url(url),
        }
    }

    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path relative to the cache partition, `.html` extension included.
    pub fn rel_path(&self) -> std::path::PathBuf {
        let file = format!("{}.html", self.stem);
        match &self.dir {
            Some(dir) => std::path::Path::new(dir).join(file),
            None => std::path::PathBuf::from(file),
        }
    }
}

/// Picks the identifier segment of a detail URL: the second-to-last path
/// segment when there are at least two, otherwise the last one.
fn identifier_from_url(url: &Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let picked = match segments.len() {
        0 => "detail",
        1 => segments[0],
        n => segments[n - 2],
    };
    sanitize(picked)
}

/// Keeps cache file names filesystem-safe.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
