//! Common validation utilities.

use uuid::Uuid;
use validator::ValidationError;

/// Maximum length of a free-text name field, matching the `VARCHAR(100)` columns.
pub const MAX_NAME_LENGTH: u64 = 100;

/// Validates that a text field contains at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Parses an opaque resource identifier.
///
/// Identifiers are UUIDs (hyphenated, simple, braced or URN form) with no
/// surrounding whitespace. Returns `None` for anything else so callers can
/// map it to their own bad-request error.
pub fn parse_resource_id(raw: &str) -> Option<Uuid> {
    Uuid::try_parse(raw).ok()
}
