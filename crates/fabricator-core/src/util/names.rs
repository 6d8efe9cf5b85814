//! Logical name utilities.
//!
//! Entities discovered on disk are named after their file stem; entities
//! listed in a mapping are named after their key. Both forms go through
//! [`normalize_name`] before being handed back to callers.

use std::path::Path;

/// Normalize a logical name.
///
/// Trims surrounding whitespace and lowercases. Returns `None` when
/// nothing is left, so an empty name never wins over a fallback.
///
/// # Examples
///
/// ```
/// use fabricator_core::util::names::normalize_name;
///
/// assert_eq!(normalize_name("Status"), Some("status".to_string()));
/// assert_eq!(normalize_name("  Voice Leading "), Some("voice leading".to_string()));
/// assert_eq!(normalize_name("   "), None);
/// ```
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Logical name for a location: its file stem, left as written.
///
/// A directory location (no extension) keeps its full final component.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use fabricator_core::util::names::name_from_path;
///
/// assert_eq!(name_from_path(Path::new("/plugins/Status.js")), Some("Status".to_string()));
/// assert_eq!(name_from_path(Path::new("/plugins/sub")), Some("sub".to_string()));
/// assert_eq!(name_from_path(Path::new("/")), None);
/// ```
pub fn name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Pick the first non-empty name and normalize it.
///
/// Used by entity name derivation: candidates are passed in priority order.
pub fn first_name<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(normalize_name)
}
