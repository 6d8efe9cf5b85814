//! Fabricator Core — shared errors and location utilities.
//!
//! This crate provides the foundational pieces used by `fabricator`.
//! It has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Name and path utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::names::{name_from_path, normalize_name};
pub use util::paths::{classify, resolve_location, LocationKind, DEFAULT_SCRIPT_EXTENSION};
