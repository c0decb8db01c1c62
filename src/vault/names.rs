//! Validation for user-supplied names.
//!
//! Folder names, note titles and asset filenames all become path
//! components under the vault root, so they share one rule set.

use crate::errors::{FolderVaultError, Result};

/// Longest name accepted (most filesystems cap a component at 255 bytes).
const MAX_NAME_LEN: usize = 255;

/// Validate a name and return it with surrounding whitespace trimmed.
///
/// `what` labels the input in the empty-input error ("Folder name", ...).
pub fn validate_name(what: &'static str, raw: &str) -> Result<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(FolderVaultError::EmptyInput(what));
    }

    let invalid = |reason: &str| FolderVaultError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.len() > MAX_NAME_LEN {
        return Err(invalid("longer than 255 bytes"));
    }
    if name == "." || name == ".." {
        return Err(invalid("reserved path component"));
    }
    if name.starts_with('.') {
        return Err(invalid("cannot start with '.'"));
    }
    if name.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
        return Err(invalid("cannot contain '/', '\\' or NUL"));
    }

    Ok(name.to_string())
}
