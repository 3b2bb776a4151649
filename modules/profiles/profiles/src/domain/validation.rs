//! Form validation.
//!
//! Rules run fail-fast in field order (first name, last name, age), so the
//! user sees one message at a time. Nothing here touches the network.

use profiles_sdk::ProfileInput;
use thiserror::Error;

use super::fields::FormFields;
use super::form::ProfileForm;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_AGE: u32 = 13;
pub const MAX_AGE: u32 = 120;

/// First failing rule of a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate the form and build the request body.
///
/// Names are trimmed, age is parsed as a plain integer, interests are split
/// on commas.
///
/// # Errors
/// Returns the first failing rule as a [`ValidationError`].
pub fn validate_form(form: &ProfileForm) -> Result<ProfileInput, ValidationError> {
    let first_name = validate_name(
        FormFields::FIRST_NAME,
        &form.first_name,
        "First name is required",
        "First name must be at most 50 characters",
    )?;
    let last_name = validate_name(
        FormFields::LAST_NAME,
        &form.last_name,
        "Last name is required",
        "Last name must be at most 50 characters",
    )?;
    let age = validate_age(&form.age)?;

    Ok(ProfileInput {
        first_name,
        last_name,
        age,
        interests: parse_interests(&form.interests),
    })
}

/// Split a comma-separated interests string.
///
/// Entries are trimmed and empty ones dropped; order is kept.
#[must_use]
pub fn parse_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|interest| !interest.is_empty())
        .map(str::to_owned)
        .collect()
}

fn validate_name(
    field: &'static str,
    value: &str,
    required: &'static str,
    too_long: &'static str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, required));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(field, too_long));
    }
    Ok(trimmed.to_owned())
}

fn validate_age(value: &str) -> Result<u32, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(FormFields::AGE, "Age is required"));
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
        .ok_or_else(|| ValidationError::new(FormFields::AGE, "Age must be between 13 and 120"))
}
