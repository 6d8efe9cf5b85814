//! Entity resolvers: turn a location into a loaded value.
//!
//! The traversal never loads anything itself. Callers inject an
//! [`EntityResolver`], which keeps the walk independent of whatever
//! mechanism actually produces values (a plugin host, a script engine,
//! a static table).
//!
//! Two implementations ship with the crate:
//!
//! - [`FnResolver`] adapts a closure.
//! - [`MapResolver`] serves values from an in-memory table and maps a
//!   bare directory to its `index.<ext>` entry script.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fabricator_core::util::paths::entry_script;
use fabricator_core::{Error, Result, DEFAULT_SCRIPT_EXTENSION};

use crate::candidate::Candidate;

/// Loads the value a location names.
///
/// Implementations may cache; the fabricator calls `resolve` on every
/// traversal and relies on the resolver for deduplication.
///
/// # Example
///
/// ```rust,ignore
/// struct PluginHost { /* ... */ }
///
/// impl EntityResolver for PluginHost {
///     type Entity = Plugin;
///
///     fn resolve(&self, location: &Path) -> Result<Arc<Plugin>> {
///         self.load_plugin(location)
///     }
/// }
/// ```
#[async_trait]
pub trait EntityResolver: Send + Sync + 'static {
    /// Value type produced by this resolver.
    type Entity: Candidate;

    /// Load the value at `location`.
    ///
    /// Failures should be reported as [`Error::Load`] naming the location.
    fn resolve(&self, location: &Path) -> Result<Arc<Self::Entity>>;

    /// Async variant used by the async traversal.
    ///
    /// Defaults to the blocking [`resolve`](Self::resolve).
    async fn resolve_async(&self, location: &Path) -> Result<Arc<Self::Entity>> {
        self.resolve(location)
    }
}

#[async_trait]
impl<R: EntityResolver> EntityResolver for Arc<R> {
    type Entity = R::Entity;

    fn resolve(&self, location: &Path) -> Result<Arc<Self::Entity>> {
        self.as_ref().resolve(location)
    }

    async fn resolve_async(&self, location: &Path) -> Result<Arc<Self::Entity>> {
        self.as_ref().resolve_async(location).await
    }
}

// ============================================================================
// FnResolver
// ============================================================================

/// Resolver backed by a closure.
pub struct FnResolver<C, F> {
    load: F,
    _entity: PhantomData<fn() -> C>,
}

impl<C, F> FnResolver<C, F>
where
    C: Candidate,
    F: Fn(&Path) -> Result<Arc<C>> + Send + Sync + 'static,
{
    /// Wrap `load`.
    pub fn new(load: F) -> Self {
        Self {
            load,
            _entity: PhantomData,
        }
    }
}

impl<C, F> fmt::Debug for FnResolver<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

impl<C, F> EntityResolver for FnResolver<C, F>
where
    C: Candidate,
    F: Fn(&Path) -> Result<Arc<C>> + Send + Sync + 'static,
{
    type Entity = C;

    fn resolve(&self, location: &Path) -> Result<Arc<C>> {
        (self.load)(location)
    }
}

// ============================================================================
// MapResolver
// ============================================================================

/// In-memory resolver keyed by location.
///
/// A location without an entry of its own falls back to its
/// `index.<ext>` entry script, so a bare directory resolves the way a
/// plugin host would resolve it.
#[derive(Debug)]
pub struct MapResolver<C> {
    entries: HashMap<PathBuf, Arc<C>>,
    entry_extension: String,
}

impl<C: Candidate> MapResolver<C> {
    /// Empty resolver using the default entry extension.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            entry_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
        }
    }

    /// Use `extension` for directory entry scripts.
    pub fn with_entry_extension(mut self, extension: impl Into<String>) -> Self {
        self.entry_extension = extension.into();
        self
    }

    /// Register `value` at `location`.
    pub fn with(mut self, location: impl Into<PathBuf>, value: C) -> Self {
        self.insert(location, value);
        self
    }

    /// Register `value` at `location`, replacing any previous entry.
    pub fn insert(&mut self, location: impl Into<PathBuf>, value: C) -> Option<Arc<C>> {
        self.entries.insert(location.into(), Arc::new(value))
    }

    /// Number of registered locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Candidate> Default for MapResolver<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Candidate> EntityResolver for MapResolver<C> {
    type Entity = C;

    fn resolve(&self, location: &Path) -> Result<Arc<C>> {
        if let Some(value) = self.entries.get(location) {
            return Ok(Arc::clone(value));
        }
        if location.extension().is_none() {
            let entry = entry_script(location, &self.entry_extension);
            if let Some(value) = self.entries.get(&entry) {
                return Ok(Arc::clone(value));
            }
        }
        Err(Error::load(location, "no entity registered at this location"))
    }
}
