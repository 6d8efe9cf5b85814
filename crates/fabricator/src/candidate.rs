//! Candidate values and the entities built from them.
//!
//! A resolver hands back values implementing [`Candidate`]. Only
//! constructible candidates become [`Entity`] values; everything else is
//! dropped silently by the loader.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fabricator_core::util::names::first_name;

// ============================================================================
// Candidate
// ============================================================================

/// A value that may turn out to be a usable constructor.
pub trait Candidate: Send + Sync + 'static {
    /// Returns `true` if the value carries a prototype record and can be
    /// constructed.
    fn is_constructible(&self) -> bool;

    /// The value's own name (a function name, a type name), if any.
    fn intrinsic_name(&self) -> Option<&str> {
        None
    }

    /// Whether the prototype record has a name slot at all.
    ///
    /// Candidates without one never receive a derived name.
    fn has_name_slot(&self) -> bool {
        true
    }

    /// The name currently stored in the prototype's name slot.
    fn declared_name(&self) -> Option<&str> {
        None
    }
}

/// Derive the name an entity is exposed under.
///
/// Returns `None` when the candidate has no name slot. Otherwise picks
/// the first non-empty of the declared name, the logical name and the
/// intrinsic name, and lowercases it.
///
/// # Example
///
/// ```
/// use fabricator::{derive_name, Constructor};
///
/// let status = Constructor::named("Status");
/// assert_eq!(derive_name(&status, Some("Status")), Some("status".to_string()));
///
/// let anon = Constructor::anonymous();
/// assert_eq!(derive_name(&anon, Some("latest")), Some("latest".to_string()));
/// assert_eq!(derive_name(&anon, None), None);
/// ```
pub fn derive_name<C: Candidate + ?Sized>(candidate: &C, logical: Option<&str>) -> Option<String> {
    if !candidate.has_name_slot() {
        return None;
    }
    first_name([candidate.declared_name(), logical, candidate.intrinsic_name()])
}

// ============================================================================
// Constructor
// ============================================================================

/// In-memory [`Candidate`] for registries and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constructor {
    name: Option<String>,
    prototype: Option<Prototype>,
}

/// Prototype record of a [`Constructor`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct Prototype {
    name_slot: bool,
    name: Option<String>,
}

impl Default for Prototype {
    fn default() -> Self {
        Self {
            name_slot: true,
            name: None,
        }
    }
}

impl Constructor {
    /// A constructible value with the given intrinsic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            prototype: Some(Prototype::default()),
        }
    }

    /// A constructible value with no intrinsic name.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            prototype: Some(Prototype::default()),
        }
    }

    /// A value without a prototype record. Never accepted.
    pub fn non_constructible(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            prototype: None,
        }
    }

    /// Store a name in the prototype's name slot.
    pub fn with_declared_name(mut self, name: impl Into<String>) -> Self {
        if let Some(proto) = self.prototype.as_mut() {
            proto.name_slot = true;
            proto.name = Some(name.into());
        }
        self
    }

    /// Remove the prototype's name slot.
    pub fn without_name_slot(mut self) -> Self {
        if let Some(proto) = self.prototype.as_mut() {
            proto.name_slot = false;
            proto.name = None;
        }
        self
    }
}

impl Candidate for Constructor {
    fn is_constructible(&self) -> bool {
        self.prototype.is_some()
    }

    fn intrinsic_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn has_name_slot(&self) -> bool {
        self.prototype.as_ref().is_some_and(|p| p.name_slot)
    }

    fn declared_name(&self) -> Option<&str> {
        self.prototype.as_ref().and_then(|p| p.name.as_deref())
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Where an entity came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Supplied directly by the caller.
    Realized,
    /// Loaded by the resolver from this location.
    Location(PathBuf),
}

impl Origin {
    /// The location the entity was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Realized => None,
            Self::Location(path) => Some(path),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realized => write!(f, "<realized>"),
            Self::Location(path) => write!(f, "{}", path.display()),
        }
    }
}

/// An accepted constructor together with its derived name.
#[derive(Debug)]
pub struct Entity<C> {
    value: Arc<C>,
    name: Option<String>,
    origin: Origin,
}

impl<C: Candidate> Entity<C> {
    /// Accept `value` if it is constructible, deriving its name from
    /// `logical`. Returns `None` for non-constructible values.
    pub fn accept(value: Arc<C>, logical: Option<&str>, origin: Origin) -> Option<Self> {
        if !value.is_constructible() {
            return None;
        }
        let name = derive_name(value.as_ref(), logical);
        Some(Self {
            value,
            name,
            origin,
        })
    }
}

impl<C> Entity<C> {
    /// The loaded value.
    pub fn value(&self) -> &Arc<C> {
        &self.value
    }

    /// The derived name, if the value has a name slot.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Where the value came from.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Consume the entity, keeping only the value.
    pub fn into_value(self) -> Arc<C> {
        self.value
    }
}

impl<C> Clone for Entity<C> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            name: self.name.clone(),
            origin: self.origin.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
