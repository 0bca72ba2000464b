//! Compiles declarative config specs into validated runtime schemas

use crate::config::{EntitySpec, FieldSpec, MergeSpec, ModeSpec, PaginatorSpec, StepSpec};
use crate::extract::{ExtractionMode, ExtractionRule};
use crate::path::{PathStep, StructuralPath, TextMatch};
use crate::schema::{EntitySchema, Field, LinkFollower, PaginatorConfig};
use crate::{ConfigError, Result};

/// Compiles a declared entity into a runtime schema.
///
/// Column collisions (duplicate names, JOIN merges reusing a parent name)
/// surface here as [`crate::GleanError::ExtractionAmbiguous`], before any
/// network access.
pub fn compile_entity(spec: &EntitySpec) -> Result<EntitySchema> {
    let mut builder = EntitySchema::builder(&spec.name);

    if !spec.rows.is_empty() {
        builder = builder.rows(compile_steps(&spec.rows)?);
    }

    for field_spec in &spec.fields {
        builder = builder.field(compile_field(&spec.name, field_spec)?);
    }

    builder.build()
}

/// Compiles the pagination declaration. The next-page rule reads an
/// attribute, `href` unless overridden.
pub fn compile_paginator(spec: &PaginatorSpec) -> Result<PaginatorConfig> {
    let attribute = spec.attribute.clone().unwrap_or_else(|| "href".to_string());
    Ok(PaginatorConfig {
        next_page: ExtractionRule::new(
            compile_steps(&spec.next_page)?,
            ExtractionMode::Attribute(attribute),
        ),
        max_follow_count: spec.max_follow_count,
    })
}

fn compile_field(entity: &str, spec: &FieldSpec) -> Result<Field> {
    let mode = match spec.mode {
        ModeSpec::Attribute => {
            let attribute = spec.attribute.clone().ok_or_else(|| {
                ConfigError::Validation(format!(
                    "field '{}' of entity '{}' uses mode \"attribute\" without an attribute name",
                    spec.name, entity
                ))
            })?;
            ExtractionMode::Attribute(attribute)
        }
        ModeSpec::Text => ExtractionMode::Text,
        ModeSpec::FollowingText => ExtractionMode::TextFollowingLabel {
            index: spec.text_index,
        },
    };

    let rule = ExtractionRule::new(compile_steps(&spec.path)?, mode);
    let mut field = Field::new(&spec.name, rule);
    if spec.required {
        field = field.required();
    }

    if let Some(follow) = &spec.follow {
        let child_name = follow
            .name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", entity, spec.name));
        let child_spec = EntitySpec {
            name: child_name,
            rows: follow.rows.clone(),
            fields: follow.fields.clone(),
        };
        let child_schema = compile_entity(&child_spec)?;
        field = field.follow(match follow.merge {
            MergeSpec::Join => LinkFollower::join(child_schema),
            MergeSpec::Append => LinkFollower::append(child_schema),
        });
    }

    Ok(field)
}

fn compile_steps(specs: &[StepSpec]) -> Result<StructuralPath> {
    let mut steps = Vec::with_capacity(specs.len());
    for spec in specs {
        let mut step = PathStep::tag(&spec.tag);
        if let Some(id) = &spec.id {
            step = step.with_id(id);
        }
        for class in &spec.classes {
            step = step.with_class(class);
        }
        if let Some(text) = &spec.text_equals {
            step = step.with_text(TextMatch::Equals(text.clone()));
        } else if let Some(text) = &spec.text_contains {
            step = step.with_text(TextMatch::Contains(text.clone()));
        }
        if spec.next_sibling {
            step = step.as_sibling();
        }
        steps.push(step);
    }
    Ok(StructuralPath::from_steps(steps)?)
}
