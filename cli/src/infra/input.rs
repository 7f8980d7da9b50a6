//! Reads the app list file.

use std::path::Path;

use crate::domain::{AppList, InputError, parse_app_list};

/// Read and parse the JSON app list at `path`.
///
/// # Errors
///
/// Returns `InputError::Unreadable` if the file cannot be read, or any
/// parse error from [`parse_app_list`].
pub fn read_app_list(path: &Path) -> Result<AppList, InputError> {
    let json = std::fs::read_to_string(path).map_err(|e| InputError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_app_list(&json)
}
