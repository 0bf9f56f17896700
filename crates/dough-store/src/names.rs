//! Recipe name validation.
//!
//! Recipe names double as file names in [`FsRecipeStore`](crate::FsRecipeStore),
//! so they follow the rules that keep them portable:
//! - Must be non-empty after trimming and at most 64 characters
//! - Must not start with `.`
//! - Must not contain `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
//! - Must not contain control characters
//! - Must not have leading or trailing whitespace

use crate::error::{Result, StoreError};

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Characters that are forbidden anywhere in a recipe name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a recipe name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use dough_store::names::validate_recipe_name;
///
/// assert!(validate_recipe_name("friday night").is_ok());
/// assert!(validate_recipe_name("").is_err());
/// assert!(validate_recipe_name("../escape").is_err());
/// ```
pub fn validate_recipe_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(name, "name must not be empty"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(
            name,
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }

    if name.trim() != name {
        return Err(invalid(name, "must not start or end with whitespace"));
    }

    if name.starts_with('.') {
        return Err(invalid(name, "must not start with '.'"));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
        }
    }

    if name.chars().any(char::is_control) {
        return Err(invalid(name, "contains a control character"));
    }

    Ok(())
}

fn invalid(name: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    }
}
