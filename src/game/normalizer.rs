//! Gate and prepare two raw name strings before any compatibility math runs.

use serde::Serialize;

/// A pair of names that passed validation: trimmed, case-folded, with
/// internal whitespace preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedPair {
    pub first: String,
    pub second: String,
}

/// Rejections surfaced back to the caller; none of these abort the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("both names are required")]
    EmptyName,
    #[error("names cannot be the same")]
    IdenticalNames,
    #[error("names must contain only letters and spaces")]
    InvalidCharacters,
}

/// Validate and normalize two raw names. Pure function, no side effects.
pub fn validate(first: &str, second: &str) -> Result<ValidatedPair, ValidationError> {
    let first = first.trim();
    let second = second.trim();

    if first.is_empty() || second.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let first = first.to_lowercase();
    let second = second.to_lowercase();

    if first == second {
        return Err(ValidationError::IdenticalNames);
    }

    if !is_name(&first) || !is_name(&second) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(ValidatedPair { first, second })
}

fn is_name(value: &str) -> bool {
    value.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}
