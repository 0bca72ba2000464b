//! Entity schema construction and build-time validation

use crate::extract::ExtractionRule;
use crate::path::StructuralPath;
use crate::schema::{LinkFollower, MergePolicy};
use crate::{GleanError, Result};

/// One named field of an entity schema.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub rule: ExtractionRule,
    /// A required field that matches nothing fails the run instead of
    /// yielding an absent value.
    pub required: bool,
    pub follower: Option<LinkFollower>,
}

impl Field {
    pub fn new(name: impl Into<String>, rule: ExtractionRule) -> Self {
        Field {
            name: name.into(),
            rule,
            required: false,
            follower: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn follow(mut self, follower: LinkFollower) -> Self {
        self.follower = Some(follower);
        self
    }
}

/// An ordered collection of named fields representing one record type.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    name: String,
    row_path: Option<StructuralPath>,
    fields: Vec<Field>,
    /// Flattened output columns, JOIN children included, in output order.
    columns: Vec<String>,
}

impl EntitySchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            row_path: None,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path selecting each row root on a container page. `None` treats the
    /// whole document as a single row, the usual shape for detail pages.
    pub fn row_path(&self) -> Option<&StructuralPath> {
        self.row_path.as_ref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The output column set this schema produces per record, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Builds and validates an [`EntitySchema`].
pub struct SchemaBuilder {
    name: String,
    row_path: Option<StructuralPath>,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Sets the row-root path for container pages.
    pub fn rows(mut self, path: StructuralPath) -> Self {
        self.row_path = Some(path);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates the schema and computes its flattened output columns.
    ///
    /// Fails fast with [`GleanError::ExtractionAmbiguous`] when two fields
    /// would share an output column after JOIN merging, or when an APPEND
    /// child column collides with the back-reference column.
    pub fn build(self) -> Result<EntitySchema> {
        let mut columns: Vec<String> = Vec::new();

        for field in &self.fields {
            push_column(&self.name, &mut columns, &field.name)?;

            match &field.follower {
                Some(LinkFollower {
                    schema,
                    merge: MergePolicy::Join,
                }) => {
                    for column in schema.columns() {
                        push_column(&self.name, &mut columns, column)?;
                    }
                }
                Some(LinkFollower {
                    schema,
                    merge: MergePolicy::Append,
                }) => {
                    // Appended child records are separate rows; only the
                    // back-reference column can collide.
                    if schema.columns().iter().any(|c| c == &field.name) {
                        return Err(GleanError::ExtractionAmbiguous {
                            entity: self.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                }
                None => {}
            }
        }

        Ok(EntitySchema {
            name: self.name,
            row_path: self.row_path,
            fields: self.fields,
            columns,
        })
    }
}

fn push_column(entity: &str, columns: &mut Vec<String>, name: &str) -> Result<()> {
    if columns.iter().any(|c| c == name) {
        return Err(GleanError::ExtractionAmbiguous {
            entity: entity.to_string(),
            field: name.to_string(),
        });
    }
    columns.push(name.to_string());
    Ok(())
}
