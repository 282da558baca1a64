//! Repository functions for the domain layer.
//!
//! Repositories wrap the `*_sea` adapters, validate input the schema cannot
//! express, and convert `DbErr` into `DomainError`.

use crate::errors::domain::{DomainError, ValidationKind};

pub mod courses;
pub mod holes;
pub mod players;
pub mod round_segments;
pub mod rounds;

/// Longest accepted course name, in characters.
pub const COURSE_NAME_MAX: usize = 50;
/// Longest accepted player name, in characters.
pub const PLAYER_NAME_MAX: usize = 120;

/// Trim `raw` and check it is non-blank and at most `max` characters.
pub(crate) fn validate_name(field: &str, raw: &str, max: usize) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("{field} must not be blank"),
        ));
    }
    let len = name.chars().count();
    if len > max {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("{field} is {len} characters, at most {max} allowed"),
        ));
    }
    Ok(name.to_string())
}
