//! Fabricator — discover constructible entities from paths and tables.
//!
//! Give it a [`Stack`] (a location, a realized value, a sequence, or a
//! named mapping) and an [`EntityResolver`] that knows how to load a
//! location, and it returns every constructible [`Entity`] it finds,
//! each with a lowercase name derived from its key or file stem.
//!
//! # Modules
//!
//! - [`candidate`]: Candidate trait, entities, name derivation
//! - [`stack`]: Input description
//! - [`options`]: Traversal options (TOML-loadable)
//! - [`resolver`]: Injected loaders
//! - [`joiner`]: Concurrent probe aggregation
//! - [`fabricator`](mod@fabricator): Blocking, async and callback walks

#![doc = include_str!("../README.md")]

pub mod candidate;
pub mod fabricator;
pub mod joiner;
mod loader;
pub mod options;
pub mod resolver;
pub mod stack;

pub use candidate::{derive_name, Candidate, Constructor, Entity, Origin};
pub use fabricator::{fabricate, Entities, Fabricator};
pub use joiner::Joiner;
pub use options::{LoadErrorPolicy, Options};
pub use resolver::{EntityResolver, FnResolver, MapResolver};
pub use stack::Stack;

// Re-export core types so callers need a single dependency
pub use fabricator_core::{Error, Result};
