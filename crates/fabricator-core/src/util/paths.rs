//! Location handling: source-relative resolution and script acceptance.

use std::path::{Path, PathBuf};

/// Extension accepted when no explicit list is configured.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "js";

/// How a location looks before anything on disk is consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    /// Carries one of the accepted script extensions.
    Script,
    /// No extension: a directory holding an entry script.
    Bare,
    /// Some other extension (`.log`, `.md`, a trailing bare dot). Never loaded.
    Foreign,
}

impl LocationKind {
    /// Returns `true` if a location of this kind may be loaded at all.
    pub fn is_allowed(self) -> bool {
        !matches!(self, Self::Foreign)
    }
}

/// Classify a location by its extension.
///
/// Extensions are compared without a leading dot and case-sensitively.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use fabricator_core::util::paths::{classify, LocationKind};
///
/// let js = ["js".to_string()];
/// assert_eq!(classify(Path::new("a.js"), &js), LocationKind::Script);
/// assert_eq!(classify(Path::new("sub"), &js), LocationKind::Bare);
/// assert_eq!(classify(Path::new("a.log"), &js), LocationKind::Foreign);
/// ```
pub fn classify(path: &Path, extensions: &[String]) -> LocationKind {
    match path.extension().and_then(|e| e.to_str()) {
        None => LocationKind::Bare,
        Some(ext) if ext.is_empty() => LocationKind::Foreign,
        Some(ext) => {
            if extensions.iter().any(|e| e.trim_start_matches('.') == ext) {
                LocationKind::Script
            } else {
                LocationKind::Foreign
            }
        }
    }
}

/// Returns `true` if `path` passes the script-acceptance predicate.
pub fn is_allowed(path: &Path, extensions: &[String]) -> bool {
    classify(path, extensions).is_allowed()
}

/// Resolve `location` against an optional base directory.
///
/// Absolute locations are returned untouched; relative ones are joined
/// onto `source` when one is configured.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use fabricator_core::util::paths::resolve_location;
///
/// assert_eq!(
///     resolve_location(Path::new("sub"), Some(Path::new("/base"))),
///     PathBuf::from("/base/sub")
/// );
/// assert_eq!(
///     resolve_location(Path::new("/abs/sub"), Some(Path::new("/base"))),
///     PathBuf::from("/abs/sub")
/// );
/// assert_eq!(resolve_location(Path::new("sub"), None), PathBuf::from("sub"));
/// ```
pub fn resolve_location(location: &Path, source: Option<&Path>) -> PathBuf {
    match source {
        Some(base) if location.is_relative() => base.join(location),
        _ => location.to_path_buf(),
    }
}

/// Entry script path for a bare directory location (`dir/index.<ext>`).
pub fn entry_script(dir: &Path, extension: &str) -> PathBuf {
    dir.join(format!("index.{}", extension.trim_start_matches('.')))
}
