use serde::Deserialize;

/// Main configuration structure for a crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub entity: EntitySpec,
    #[serde(default)]
    pub paginator: Option<PaginatorSpec>,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Start URL template with a single `{location}` substitution point
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// Location code substituted into the template
    pub location: String,

    /// What to do when a followed detail link fails to fetch or parse
    #[serde(rename = "detail-failure", default)]
    pub detail_failure: DetailFailureSpec,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overrides the default `gleaner/<version>` user agent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

/// Policy for a failed detail-link fetch. `Skip` drops that one record and
/// reports the failure; `Abort` fails the whole run. Skipping alters output
/// completeness, which is why this is an explicit configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailFailureSpec {
    #[default]
    Skip,
    Abort,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Root directory for stored documents
    #[serde(rename = "root-dir")]
    pub root_dir: String,

    /// Cache-coherence policy
    #[serde(default)]
    pub policy: CachePolicySpec,

    /// When false, fetched documents are never written to disk
    /// (read-through mode)
    #[serde(default = "default_true")]
    pub persist: bool,
}

/// Cache-coherence policy. `Daily` partitions keys by calendar day (fetch at
/// most once per key per day); `Permanent` memoizes forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicySpec {
    #[default]
    Daily,
    Permanent,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file to write
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Placeholder written for absent field values
    #[serde(rename = "missing-value", default = "default_missing_value")]
    pub missing_value: String,
}

/// One structural-path step
#[derive(Debug, Clone, Deserialize)]
pub struct StepSpec {
    pub tag: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(rename = "text-equals", default)]
    pub text_equals: Option<String>,

    #[serde(rename = "text-contains", default)]
    pub text_contains: Option<String>,

    /// Match only the element sibling immediately following the previous
    /// step's node, instead of searching its subtree
    #[serde(rename = "next-sibling", default)]
    pub next_sibling: bool,
}

/// Extraction mode of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSpec {
    Attribute,
    Text,
    FollowingText,
}

/// One field of an entity
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    pub path: Vec<StepSpec>,

    pub mode: ModeSpec,

    /// Attribute name; required when mode = "attribute"
    #[serde(default)]
    pub attribute: Option<String>,

    /// Ordinal of the following text node for mode = "following-text"
    /// (0 = the first text node after the label)
    #[serde(rename = "text-index", default)]
    pub text_index: usize,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub follow: Option<FollowSpec>,
}

/// Link-follower declaration nested under a field
#[derive(Debug, Clone, Deserialize)]
pub struct FollowSpec {
    #[serde(default)]
    pub merge: MergeSpec,

    /// Child entity name; defaults to `<parent>-<field>`
    #[serde(default)]
    pub name: Option<String>,

    /// Row-root path inside the child document; empty treats the whole
    /// child document as one row
    #[serde(default)]
    pub rows: Vec<StepSpec>,

    pub fields: Vec<FieldSpec>,
}

/// Merge policy of a link follower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeSpec {
    #[default]
    Join,
    Append,
}

/// Top-level entity declaration
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    pub name: String,

    /// Row-root path selecting each listing item on a results page
    #[serde(default)]
    pub rows: Vec<StepSpec>,

    pub fields: Vec<FieldSpec>,
}

/// Pagination declaration
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatorSpec {
    /// Additional pages beyond the first
    #[serde(rename = "max-follow-count", default = "default_follow_count")]
    pub max_follow_count: u32,

    /// Path locating the next-page link
    #[serde(rename = "next-page")]
    pub next_page: Vec<StepSpec>,

    /// Attribute holding the next-page URL; defaults to `href`
    #[serde(default)]
    pub attribute: Option<String>,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_missing_value() -> String {
    "N/A".to_string()
}

fn default_follow_count() -> u32 {
    2
}
