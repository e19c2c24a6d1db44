//! Input validation for cellar operations.
//!
//! Validates secret keys before they are mapped onto files.

use crate::error::{Result, ValidationError};

/// Validate a secret key.
///
/// Keys are `/`-separated relative paths:
/// - Cannot be empty or start with `/`
/// - Components cannot be empty, `.` or `..`
/// - Components cannot start with `.` (reserved for `.git` and friends)
/// - No backslashes or NUL bytes
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    let invalid = |reason: &str| -> crate::error::Error {
        ValidationError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if key.starts_with('/') {
        return Err(invalid("must be relative"));
    }
    if key.contains('\\') {
        return Err(invalid("use '/' to separate components"));
    }
    if key.contains('\0') {
        return Err(invalid("contains a NUL byte"));
    }

    for component in key.split('/') {
        if component.is_empty() {
            return Err(invalid("empty path component"));
        }
        if component == "." || component == ".." {
            return Err(invalid("'.' and '..' are not allowed"));
        }
        if component.starts_with('.') {
            return Err(invalid("components cannot start with '.'"));
        }
    }

    Ok(())
}
