//! Configuration module
//!
//! Crawls are described entirely in a TOML file: the start-URL template and
//! location parameter, cache layout and coherence policy, output options,
//! the pagination rule, and the declarative entity schema itself (fields,
//! structural paths, link followers). Loading validates the file before
//! anything touches the network.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    CacheConfig, CachePolicySpec, Config, CrawlConfig, DetailFailureSpec, EntitySpec, FieldSpec,
    FollowSpec, MergeSpec, ModeSpec, OutputConfig, PaginatorSpec, StepSpec,
};
pub use validation::validate;
