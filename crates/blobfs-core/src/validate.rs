//! File-name validation for the create path

use crate::{CoreError, Result};

/// Check a file name's final extension against a comma-separated allow-list.
///
/// The comparison is on the lower-cased extension; a name without an
/// extension is rejected.
pub fn check_file_name(file_name: &str, allowed_extensions: &str) -> Result<()> {
    let extension = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            extension.to_lowercase()
        }
        _ => return Err(CoreError::InvalidFileType(file_name.to_string())),
    };

    let allowed = allowed_extensions
        .split(',')
        .map(|e| e.trim().trim_start_matches("*."))
        .any(|e| e.eq_ignore_ascii_case(&extension));

    if allowed {
        Ok(())
    } else {
        Err(CoreError::InvalidFileType(file_name.to_string()))
    }
}
