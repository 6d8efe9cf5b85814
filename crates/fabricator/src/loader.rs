//! Loader: location or realized value in, entity (or nothing) out.
//!
//! Also decides, from the location alone, whether a location is loaded
//! directly, listed as a directory, or ignored. Both the blocking and the
//! async traversal go through [`plan`] so they agree on every path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fabricator_core::util::names::name_from_path;
use fabricator_core::util::paths::{classify, resolve_location, LocationKind};
use fabricator_core::{Error, Result};

use crate::candidate::{Candidate, Entity, Origin};
use crate::options::{LoadErrorPolicy, Options};
use crate::resolver::EntityResolver;

/// What to do with a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    /// Hand the path to the resolver.
    Load(PathBuf),
    /// List the directory's immediate children.
    List(PathBuf),
    /// Not a script; drop it.
    Skip(PathBuf),
}

/// Decide how to treat `location` under `options`.
pub(crate) fn plan(location: &Path, options: &Options) -> Plan {
    let resolved = resolve_location(location, options.source.as_deref());
    match classify(&resolved, &options.extensions) {
        LocationKind::Script => Plan::Load(resolved),
        LocationKind::Bare if !options.recursive => Plan::Load(resolved),
        LocationKind::Bare => Plan::List(resolved),
        LocationKind::Foreign => Plan::Skip(resolved),
    }
}

/// Logical name for a directly loaded location: the inherited name if
/// there is one, the file stem otherwise.
pub(crate) fn logical_name(path: &Path, inherited: Option<&str>) -> Option<String> {
    inherited.map(str::to_string).or_else(|| name_from_path(path))
}

/// Accept a realized value.
pub(crate) fn load_realized<C: Candidate>(value: &Arc<C>, logical: Option<&str>) -> Option<Entity<C>> {
    let entity = Entity::accept(Arc::clone(value), logical, Origin::Realized);
    if entity.is_none() {
        log::debug!("Dropping non-constructible realized value {logical:?}");
    }
    entity
}

/// Load `path` through the resolver.
pub(crate) fn load_path<R: EntityResolver>(
    resolver: &R,
    path: &Path,
    logical: Option<&str>,
    policy: LoadErrorPolicy,
) -> Result<Option<Entity<R::Entity>>> {
    let loaded = resolver.resolve(path);
    finish(loaded, path, logical, policy)
}

/// Async counterpart of [`load_path`].
pub(crate) async fn load_path_async<R: EntityResolver>(
    resolver: &R,
    path: &Path,
    logical: Option<&str>,
    policy: LoadErrorPolicy,
) -> Result<Option<Entity<R::Entity>>> {
    let loaded = resolver.resolve_async(path).await;
    finish(loaded, path, logical, policy)
}

fn finish<C: Candidate>(
    loaded: Result<Arc<C>>,
    path: &Path,
    logical: Option<&str>,
    policy: LoadErrorPolicy,
) -> Result<Option<Entity<C>>> {
    match loaded {
        Ok(value) => {
            let entity = Entity::accept(value, logical, Origin::Location(path.to_path_buf()));
            if entity.is_none() {
                log::debug!("Dropping non-constructible value from {}", path.display());
            }
            Ok(entity)
        }
        Err(e) => match policy {
            LoadErrorPolicy::FailFast => Err(match e {
                Error::Load { .. } => e,
                other => Error::load(path, other.to_string()),
            }),
            LoadErrorPolicy::Skip => {
                log::warn!("Skipping {}: {e}", path.display());
                Ok(None)
            }
        },
    }
}
