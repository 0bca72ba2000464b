//! Entity schemas: named, ordered field collections bound to extraction rules
//!
//! An [`EntitySchema`] describes one logical record type ("houses"): which
//! row roots to iterate on a listing page, which fields to extract per row,
//! and which fields additionally follow their extracted URL into a child
//! document. Schemas are validated when built; colliding output columns are
//! a configuration error surfaced before any network access.

mod compile;
mod entity;
mod follower;
mod record;

pub use compile::{compile_entity, compile_paginator};
pub use entity::{EntitySchema, Field, SchemaBuilder};
pub use follower::{LinkFollower, MergePolicy};
pub use record::Record;

use crate::extract::ExtractionRule;

/// Pagination configuration: how to find the next-page link, and how many
/// pages beyond the first may be followed.
#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// Rule locating the next-page link; conventionally `Attribute("href")`.
    pub next_page: ExtractionRule,
    /// Cap on additional pages beyond the first. Zero means only the start
    /// page is visited.
    pub max_follow_count: u32,
}
