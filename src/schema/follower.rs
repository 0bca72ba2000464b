//! Link followers: fields whose extracted URL is itself mined for fields

use crate::schema::EntitySchema;

/// How a followed child document's fields relate to the parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Child fields become additional columns of the same parent record.
    Join,
    /// Each child row becomes an independent record carrying the parent's
    /// link field as a back-reference column. Reserved for repeating child
    /// structures.
    Append,
}

/// A nested schema run against the document behind an extracted URL.
#[derive(Debug, Clone)]
pub struct LinkFollower {
    pub schema: EntitySchema,
    pub merge: MergePolicy,
}

impl LinkFollower {
    pub fn join(schema: EntitySchema) -> Self {
        LinkFollower {
            schema,
            merge: MergePolicy::Join,
        }
    }

    pub fn append(schema: EntitySchema) -> Self {
        LinkFollower {
            schema,
            merge: MergePolicy::Append,
        }
    }
}
