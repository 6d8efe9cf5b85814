//! Dispatcher and collector.
//!
//! [`Fabricator`] walks a [`Stack`] and returns every constructible
//! entity it finds. The walk is available three ways:
//!
//! 1. [`Fabricator::fabricate`] blocks the calling thread.
//! 2. [`Fabricator::fabricate_async`] uses `tokio::fs` and probes
//!    directory children concurrently.
//! 3. [`Fabricator::fabricate_then`] spawns the async walk and hands the
//!    result to a callback exactly once.
//!
//! # Traversal rules
//!
//! - A location with a script extension is loaded directly.
//! - A bare location is listed one level deep (or loaded directly when
//!   `recursive` is off). Children must be regular files that pass the
//!   script predicate; everything else is dropped quietly.
//! - Sequence items carry no logical name; mapping values are named by
//!   their key.
//! - A failed directory listing fails the whole call. A failed stat on a
//!   child only drops that child.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fabricator_core::util::names::name_from_path;
use fabricator_core::util::paths::is_allowed;
use fabricator_core::{Error, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::candidate::Entity;
use crate::joiner::Joiner;
use crate::loader::{self, Plan};
use crate::options::Options;
use crate::resolver::EntityResolver;
use crate::stack::Stack;

/// Entities produced by a resolver `R`.
pub type Entities<R> = Vec<Entity<<R as EntityResolver>::Entity>>;

/// Locates constructible entities through an injected resolver.
///
/// Cheap to clone (the resolver is shared behind an `Arc`).
///
/// # Example
///
/// ```
/// use fabricator::{Constructor, Fabricator, MapResolver, Stack};
///
/// let resolver = MapResolver::new().with("/plugins/constructor.js", Constructor::anonymous());
/// let fabricator = Fabricator::new(resolver);
///
/// let stack = Stack::mapping([
///     ("Status", Stack::realized(Constructor::named("Status"))),
///     ("latest", Stack::location("/plugins/constructor.js")),
/// ]);
/// let entities = fabricator.fabricate(&stack).unwrap();
///
/// let names: Vec<_> = entities.iter().filter_map(|e| e.name()).collect();
/// assert_eq!(names, vec!["status", "latest"]);
/// ```
pub struct Fabricator<R> {
    resolver: Arc<R>,
    options: Options,
}

impl<R> Clone for Fabricator<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            options: self.options.clone(),
        }
    }
}

impl<R: EntityResolver> Fabricator<R> {
    /// Fabricator with default options.
    pub fn new(resolver: R) -> Self {
        Self::from_shared(Arc::new(resolver))
    }

    /// Fabricator over an already shared resolver.
    pub fn from_shared(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            options: Options::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The injected resolver.
    pub fn resolver(&self) -> &Arc<R> {
        &self.resolver
    }

    // ------------------------------------------------------------------------
    // Blocking walk
    // ------------------------------------------------------------------------

    /// Walk `stack` on the calling thread.
    pub fn fabricate(&self, stack: &Stack<R::Entity>) -> Result<Entities<R>> {
        log::trace!("Fabricating {} top-level entries", stack.len_hint());
        let mut out = Vec::new();
        self.collect(stack, None, &mut out)?;
        Ok(out)
    }

    fn collect(
        &self,
        stack: &Stack<R::Entity>,
        logical: Option<&str>,
        out: &mut Entities<R>,
    ) -> Result<()> {
        match stack {
            Stack::Location(location) => self.collect_location(location, logical, out),
            Stack::Realized(value) => {
                out.extend(loader::load_realized(value, logical));
                Ok(())
            }
            Stack::Sequence(items) => {
                for item in items {
                    self.collect(item, None, out)?;
                }
                Ok(())
            }
            Stack::Mapping(entries) => {
                for (key, entry) in entries {
                    self.collect(entry, Some(key.as_str()), out)?;
                }
                Ok(())
            }
        }
    }

    fn collect_location(
        &self,
        location: &Path,
        logical: Option<&str>,
        out: &mut Entities<R>,
    ) -> Result<()> {
        match loader::plan(location, &self.options) {
            Plan::Load(path) => {
                let name = loader::logical_name(&path, logical);
                out.extend(self.load(&path, name.as_deref())?);
            }
            Plan::List(dir) => {
                for child in self.list_scripts(&dir)? {
                    let name = name_from_path(&child);
                    out.extend(self.load(&child, name.as_deref())?);
                }
            }
            Plan::Skip(path) => {
                log::debug!("Ignoring non-script location {}", path.display());
            }
        }
        Ok(())
    }

    fn load(&self, path: &Path, logical: Option<&str>) -> Result<Option<Entity<R::Entity>>> {
        loader::load_path(self.resolver.as_ref(), path, logical, self.options.on_load_error)
    }

    /// Immediate children of `dir` that are regular script files, sorted.
    fn list_scripts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::read_dir(e, dir))?;

        let mut scripts = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::read_dir(e, dir))?.path();
            if !is_allowed(&path, &self.options.extensions) {
                log::debug!("Ignoring {}", path.display());
                continue;
            }
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => scripts.push(path),
                Ok(_) => log::debug!("Ignoring non-file {}", path.display()),
                Err(e) => log::debug!("Cannot stat {}: {e}", path.display()),
            }
        }
        scripts.sort();
        Ok(scripts)
    }

    // ------------------------------------------------------------------------
    // Async walk
    // ------------------------------------------------------------------------

    /// Walk `stack` without blocking. Must run inside a Tokio runtime.
    ///
    /// Returns the same entities, in the same order, as
    /// [`fabricate`](Self::fabricate).
    pub async fn fabricate_async(&self, stack: &Stack<R::Entity>) -> Result<Entities<R>> {
        log::trace!("Fabricating {} top-level entries (async)", stack.len_hint());
        self.collect_async(stack, None).await
    }

    /// Spawn the async walk and deliver its result to `callback`.
    ///
    /// The callback runs exactly once, on the runtime, unless the
    /// returned handle is aborted first. Must be called from within a
    /// Tokio runtime; outside one, spawning panics.
    pub fn fabricate_then<F>(&self, stack: Stack<R::Entity>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Entities<R>>) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.fabricate_async(&stack).await;
            callback(result);
        })
    }

    fn collect_async<'a>(
        &'a self,
        stack: &'a Stack<R::Entity>,
        logical: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Entities<R>>> {
        async move {
            match stack {
                Stack::Location(location) => self.collect_location_async(location, logical).await,
                Stack::Realized(value) => Ok(loader::load_realized(value, logical).into_iter().collect()),
                Stack::Sequence(items) => {
                    let mut out = Vec::new();
                    for item in items {
                        out.extend(self.collect_async(item, None).await?);
                    }
                    Ok(out)
                }
                Stack::Mapping(entries) => {
                    let mut out = Vec::new();
                    for (key, entry) in entries {
                        out.extend(self.collect_async(entry, Some(key.as_str())).await?);
                    }
                    Ok(out)
                }
            }
        }
        .boxed()
    }

    async fn collect_location_async(
        &self,
        location: &Path,
        logical: Option<&str>,
    ) -> Result<Entities<R>> {
        let mut out = Vec::new();
        match loader::plan(location, &self.options) {
            Plan::Load(path) => {
                let name = loader::logical_name(&path, logical);
                out.extend(self.load_async(&path, name.as_deref()).await?);
            }
            Plan::List(dir) => {
                for child in self.list_scripts_async(&dir).await? {
                    let name = name_from_path(&child);
                    out.extend(self.load_async(&child, name.as_deref()).await?);
                }
            }
            Plan::Skip(path) => {
                log::debug!("Ignoring non-script location {}", path.display());
            }
        }
        Ok(out)
    }

    async fn load_async(
        &self,
        path: &Path,
        logical: Option<&str>,
    ) -> Result<Option<Entity<R::Entity>>> {
        loader::load_path_async(self.resolver.as_ref(), path, logical, self.options.on_load_error)
            .await
    }

    /// Async listing: one stat probe per candidate child, joined.
    async fn list_scripts_async(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| Error::read_dir(e, dir))?;

        let mut joiner = Joiner::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::read_dir(e, dir))?
        {
            let path = entry.path();
            if !is_allowed(&path, &self.options.extensions) {
                log::debug!("Ignoring {}", path.display());
                continue;
            }
            joiner.spawn(probe_file(path));
        }
        log::trace!("Probing {} children of {}", joiner.fan_out(), dir.display());

        let mut scripts = joiner.join().await?;
        scripts.sort();
        Ok(scripts)
    }
}

/// Stat `path`; keep it only if it is a regular file. Stat failures are
/// logged and swallowed.
async fn probe_file(path: PathBuf) -> Result<Vec<PathBuf>> {
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Ok(vec![path]),
        Ok(_) => {
            log::debug!("Ignoring non-file {}", path.display());
            Ok(Vec::new())
        }
        Err(e) => {
            log::debug!("Cannot stat {}: {e}", path.display());
            Ok(Vec::new())
        }
    }
}

/// One-shot blocking walk with explicit options.
///
/// # Example
///
/// ```
/// use fabricator::{fabricate, Constructor, MapResolver, Options, Stack};
///
/// let stack = Stack::sequence([Stack::realized(Constructor::named("Test"))]);
/// let entities = fabricate(MapResolver::new(), &stack, Options::default()).unwrap();
/// assert_eq!(entities.len(), 1);
/// assert_eq!(entities[0].name(), Some("test"));
/// ```
pub fn fabricate<R: EntityResolver>(
    resolver: R,
    stack: &Stack<R::Entity>,
    options: Options,
) -> Result<Entities<R>> {
    Fabricator::new(resolver).with_options(options).fabricate(stack)
}
