//! Local package file naming.
//!
//! Files follow `<label>-<version>-<package>.apk`, e.g.
//! `RuStore-v1.68.1.0-ru.vk.store.apk`. Only the text after the last `-` is
//! meaningful.

use crate::domain::device::PACKAGE_EXTENSION;

/// Returns `true` if `file_name` has the package extension (any case).
#[must_use]
pub fn is_package_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(PACKAGE_EXTENSION))
}

/// Package identifier encoded in a local package file name.
///
/// Returns `None` if the name has no `-` or nothing follows the last one.
#[must_use]
pub fn package_name_from_file_name(file_name: &str) -> Option<&str> {
    let (_, tail) = file_name.rsplit_once('-')?;
    let package = match tail.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case(PACKAGE_EXTENSION) => stem,
        _ => tail,
    };
    (!package.is_empty()).then_some(package)
}
