//! The input description: where to look for entities.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

/// Caller-supplied description of where entities live.
///
/// Sequences and mappings nest freely; a mapping key becomes the logical
/// name of the value it holds when that value is loaded directly.
///
/// # Example
///
/// ```
/// use fabricator::{Constructor, Stack};
///
/// let stack: Stack<Constructor> = Stack::mapping([
///     ("Status", Stack::realized(Constructor::named("Status"))),
///     ("latest", Stack::location("/plugins/constructor.js")),
/// ]);
/// assert_eq!(stack.len_hint(), 2);
/// ```
#[derive(Debug)]
pub enum Stack<C> {
    /// A file or directory path.
    Location(PathBuf),
    /// A value supplied directly.
    Realized(Arc<C>),
    /// Ordered entries, loaded without logical names.
    Sequence(Vec<Stack<C>>),
    /// Named entries, in insertion order.
    Mapping(IndexMap<String, Stack<C>>),
}

impl<C> Stack<C> {
    /// A location entry.
    pub fn location(path: impl Into<PathBuf>) -> Self {
        Self::Location(path.into())
    }

    /// A realized entry wrapping `value`.
    pub fn realized(value: C) -> Self {
        Self::Realized(Arc::new(value))
    }

    /// A sequence built from any iterator of entries.
    pub fn sequence<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Stack<C>>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// A mapping built from `(key, entry)` pairs. Later duplicates
    /// replace earlier values but keep the first key position.
    pub fn mapping<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Stack<C>>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Number of direct entries (1 for a single location or value).
    pub fn len_hint(&self) -> usize {
        match self {
            Self::Location(_) | Self::Realized(_) => 1,
            Self::Sequence(items) => items.len(),
            Self::Mapping(entries) => entries.len(),
        }
    }
}

impl<C> Clone for Stack<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Location(path) => Self::Location(path.clone()),
            Self::Realized(value) => Self::Realized(Arc::clone(value)),
            Self::Sequence(items) => Self::Sequence(items.clone()),
            Self::Mapping(entries) => Self::Mapping(entries.clone()),
        }
    }
}

impl<C> From<&str> for Stack<C> {
    fn from(path: &str) -> Self {
        Self::Location(PathBuf::from(path))
    }
}

impl<C> From<String> for Stack<C> {
    fn from(path: String) -> Self {
        Self::Location(PathBuf::from(path))
    }
}

impl<C> From<&Path> for Stack<C> {
    fn from(path: &Path) -> Self {
        Self::Location(path.to_path_buf())
    }
}

impl<C> From<PathBuf> for Stack<C> {
    fn from(path: PathBuf) -> Self {
        Self::Location(path)
    }
}

impl<C> From<Arc<C>> for Stack<C> {
    fn from(value: Arc<C>) -> Self {
        Self::Realized(value)
    }
}

impl<C> From<Vec<Stack<C>>> for Stack<C> {
    fn from(items: Vec<Stack<C>>) -> Self {
        Self::Sequence(items)
    }
}

impl<C> From<IndexMap<String, Stack<C>>> for Stack<C> {
    fn from(entries: IndexMap<String, Stack<C>>) -> Self {
        Self::Mapping(entries)
    }
}
