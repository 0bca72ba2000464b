use crate::config::types::{
    Config, CrawlConfig, EntitySpec, FieldSpec, ModeSpec, PaginatorSpec, StepSpec,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration. Runs before any network access;
/// structural problems in the declared schema are rejected here, column
/// collisions are rejected during schema compilation.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_cache_config(config)?;
    validate_output_config(config)?;
    validate_entity_spec(&config.entity)?;
    if let Some(paginator) = &config.paginator {
        validate_paginator_spec(paginator)?;
    }
    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.location.is_empty() {
        return Err(ConfigError::Validation(
            "location cannot be empty".to_string(),
        ));
    }

    if !config.url_template.contains("{location}") {
        return Err(ConfigError::Validation(
            "url-template must contain the {location} substitution point".to_string(),
        ));
    }

    // The template must produce a parseable absolute URL once substituted.
    let substituted = config.url_template.replace("{location}", &config.location);
    Url::parse(&substituted)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid url-template: {}", e)))?;

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_cache_config(config: &Config) -> Result<(), ConfigError> {
    if config.cache.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "cache root-dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_output_config(config: &Config) -> Result<(), ConfigError> {
    if config.output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_entity_spec(entity: &EntitySpec) -> Result<(), ConfigError> {
    if entity.name.is_empty() {
        return Err(ConfigError::Validation(
            "entity name cannot be empty".to_string(),
        ));
    }

    if entity.fields.is_empty() {
        return Err(ConfigError::Validation(format!(
            "entity '{}' must declare at least one field",
            entity.name
        )));
    }

    validate_steps(&entity.name, "rows", &entity.rows, true)?;

    for field in &entity.fields {
        validate_field_spec(&entity.name, field)?;
    }

    Ok(())
}

fn validate_field_spec(entity: &str, field: &FieldSpec) -> Result<(), ConfigError> {
    if field.name.is_empty() {
        return Err(ConfigError::Validation(format!(
            "entity '{}' has a field with an empty name",
            entity
        )));
    }

    validate_steps(entity, &field.name, &field.path, false)?;

    match field.mode {
        ModeSpec::Attribute => {
            if field.attribute.is_none() {
                return Err(ConfigError::Validation(format!(
                    "field '{}' of entity '{}' uses mode \"attribute\" without an attribute name",
                    field.name, entity
                )));
            }
        }
        ModeSpec::Text | ModeSpec::FollowingText => {
            if field.attribute.is_some() {
                return Err(ConfigError::Validation(format!(
                    "field '{}' of entity '{}' sets an attribute but its mode does not read one",
                    field.name, entity
                )));
            }
        }
    }

    if let Some(follow) = &field.follow {
        if follow.fields.is_empty() {
            return Err(ConfigError::Validation(format!(
                "link follower on field '{}' of entity '{}' declares no fields",
                field.name, entity
            )));
        }
        let child_name = follow.name.clone().unwrap_or_else(|| field.name.clone());
        validate_steps(&child_name, "rows", &follow.rows, true)?;
        for child in &follow.fields {
            validate_field_spec(&child_name, child)?;
        }
    }

    Ok(())
}

fn validate_paginator_spec(paginator: &PaginatorSpec) -> Result<(), ConfigError> {
    validate_steps("paginator", "next-page", &paginator.next_page, false)
}

/// Validates one declared path. `may_be_empty` covers row-root paths, where
/// an empty list means "the whole document is one row".
fn validate_steps(
    scope: &str,
    name: &str,
    steps: &[StepSpec],
    may_be_empty: bool,
) -> Result<(), ConfigError> {
    if steps.is_empty() {
        if may_be_empty {
            return Ok(());
        }
        return Err(ConfigError::Validation(format!(
            "path '{}' of '{}' must have at least one step",
            name, scope
        )));
    }

    for (index, step) in steps.iter().enumerate() {
        if step.tag.is_empty() {
            return Err(ConfigError::Validation(format!(
                "path '{}' of '{}': step {} has an empty tag",
                name, scope, index
            )));
        }
        if step.text_equals.is_some() && step.text_contains.is_some() {
            return Err(ConfigError::Validation(format!(
                "path '{}' of '{}': step {} sets both text-equals and text-contains",
                name, scope, index
            )));
        }
        if index == 0 && step.next_sibling {
            return Err(ConfigError::Validation(format!(
                "path '{}' of '{}': the first step cannot be a next-sibling step",
                name, scope
            )));
        }
    }

    Ok(())
}
