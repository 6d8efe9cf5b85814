//! Error types for fabricator-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for fabricator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fabricating entities
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A directory could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory that was being listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure bound to a path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The resolver failed to load a location.
    #[error("Failed to load {}: {message}", location.display())]
    Load {
        /// Location handed to the resolver
        location: PathBuf,
        /// Resolver-provided failure description
        message: String,
    },

    /// Invalid or unreadable options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A spawned probe panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(String),
}

impl Error {
    /// Wrap a directory listing failure.
    pub fn read_dir(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::ReadDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap an I/O failure with the path it happened at.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a load failure for `location`.
    pub fn load(location: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Load {
            location: location.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Build a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` for failures that abort a whole traversal
    /// regardless of load policy.
    pub fn is_listing_failure(&self) -> bool {
        matches!(self, Self::ReadDir { .. })
    }
}
