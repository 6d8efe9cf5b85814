//! Utility modules for naming and location handling.
//!
//! # Modules
//!
//! - [`names`]: Logical name extraction and normalization
//! - [`paths`]: Source-relative resolution and script acceptance

pub mod names;
pub mod paths;
