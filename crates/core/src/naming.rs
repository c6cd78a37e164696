//! Display-name rules for organizations and datasets.
//!
//! Two names collide when they are equal after trimming surrounding
//! whitespace and lower-casing, so `" Acme "` and `"acme"` are the same
//! organization. The database enforces the same rule with a unique index on
//! `lower(btrim(name))`.

use crate::error::CoreError;

/// Maximum length for an organization or dataset name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Canonical comparison key for a name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a proposed name and return the trimmed form to persist.
pub fn validate_name(entity: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity} name must not be blank"
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{entity} name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Whether `candidate` collides with any of `existing` under normalization.
pub fn is_name_taken<'a, I>(candidate: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize_name(candidate);
    existing.into_iter().any(|name| normalize_name(name) == wanted)
}
