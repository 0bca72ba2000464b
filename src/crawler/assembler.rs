//! Record assembly: running an entity schema over one document
//!
//! For each row root the schema selects, every field is attempted in order;
//! fields carrying a link follower resolve the child document through the
//! accessor and recursively assemble the nested schema against it, merging
//! per the follower's policy. Results are returned explicitly; there is no
//! shared accumulation state.

use crate::cache::CacheKey;
use crate::config::DetailFailureSpec;
use crate::crawler::accessor::DocumentAccessor;
use crate::document::Document;
use crate::extract::extract;
use crate::path::find_all;
use crate::schema::{EntitySchema, MergePolicy, Record};
use crate::{GleanError, Result};
use std::future::Future;
use std::pin::Pin;

/// Policy for a failed detail-link fetch or parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFailure {
    /// Drop the affected record, report the failure, continue the run.
    Skip,
    /// Fail the whole run on the first detail failure.
    Abort,
}

impl From<DetailFailureSpec> for DetailFailure {
    fn from(spec: DetailFailureSpec) -> Self {
        match spec {
            DetailFailureSpec::Skip => DetailFailure::Skip,
            DetailFailureSpec::Abort => DetailFailure::Abort,
        }
    }
}

/// Options applied while assembling records.
#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    pub detail_failure: DetailFailure,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            detail_failure: DetailFailure::Skip,
        }
    }
}

/// Runs a schema against one document, producing its records in row order.
///
/// Boxed because link followers recurse through nested schemas.
pub fn assemble<'a>(
    accessor: &'a DocumentAccessor,
    schema: &'a EntitySchema,
    doc: &'a Document,
    options: &'a AssembleOptions,
) -> Pin<Box<dyn Future<Output = Result<Vec<Record>>> + 'a>> {
    Box::pin(async move {
        let root = doc.root();
        let row_roots = match schema.row_path() {
            Some(path) => find_all(&root, path),
            None => vec![root],
        };

        let mut records = Vec::new();

        'rows: for row in &row_roots {
            let mut record = Record::with_columns(schema.columns().iter().cloned());
            let mut appended = Vec::new();

            for field in schema.fields() {
                let value = extract(row, &field.rule);

                if value.is_none() && field.required {
                    return Err(GleanError::MissingField {
                        entity: schema.name().to_string(),
                        field: field.name.clone(),
                        url: doc.url().to_string(),
                    });
                }

                let Some(value) = value else { continue };
                record.set(&field.name, value.clone());

                let Some(follower) = &field.follower else {
                    continue;
                };

                let outcome = follow_link(accessor, doc, &value, follower, options).await;
                let child_records = match outcome {
                    Ok(children) => children,
                    Err(e) if is_detail_failure(&e) => match options.detail_failure {
                        DetailFailure::Abort => return Err(e),
                        DetailFailure::Skip => {
                            tracing::warn!(
                                entity = schema.name(),
                                field = %field.name,
                                error = %e,
                                "detail link failed, skipping record"
                            );
                            continue 'rows;
                        }
                    },
                    Err(e) => return Err(e),
                };

                match follower.merge {
                    MergePolicy::Join => {
                        if child_records.len() > 1 {
                            tracing::debug!(
                                entity = follower.schema.name(),
                                rows = child_records.len(),
                                "JOIN merge uses only the first child row"
                            );
                        }
                        if let Some(child) = child_records.first() {
                            for (name, value) in child.iter() {
                                if let Some(value) = value {
                                    record.set(name, value.to_string());
                                }
                            }
                        }
                    }
                    MergePolicy::Append => {
                        for child in &child_records {
                            let mut extra = Record::with_columns(
                                std::iter::once(field.name.clone())
                                    .chain(child.columns().map(|c| c.to_string())),
                            );
                            extra.set(&field.name, value.clone());
                            for (name, child_value) in child.iter() {
                                if let Some(child_value) = child_value {
                                    extra.set(name, child_value.to_string());
                                }
                            }
                            appended.push(extra);
                        }
                    }
                }
            }

            records.push(record);
            records.append(&mut appended);
        }

        Ok(records)
    })
}

async fn follow_link(
    accessor: &DocumentAccessor,
    parent: &Document,
    href: &str,
    follower: &crate::schema::LinkFollower,
    options: &AssembleOptions,
) -> Result<Vec<Record>> {
    let child_url = parent.join(href).map_err(|e| GleanError::ParseFailed {
        url: href.to_string(),
        message: format!("extracted link is not a valid URL: {}", e),
    })?;

    let child_key = parent
        .key()
        .map(|parent_key| CacheKey::detail_page(parent_key, &child_url));

    let child_doc = accessor.resolve(child_key.as_ref(), &child_url).await?;
    assemble(accessor, &follower.schema, &child_doc, options).await
}

/// Only fetch and parse failures are subject to the detail-failure policy;
/// configuration-level errors always abort.
fn is_detail_failure(e: &GleanError) -> bool {
    matches!(
        e,
        GleanError::FetchFailed { .. } | GleanError::ParseFailed { .. }
    )
}
