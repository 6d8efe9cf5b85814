//! Traversal options.
//!
//! Options can be built in code or read from a TOML file:
//!
//! ```toml
//! source = "/srv/app/plugins"
//! recursive = true
//! extensions = ["js"]
//! on_load_error = "skip"
//! ```

use std::path::{Path, PathBuf};

use fabricator_core::{Error, Result, DEFAULT_SCRIPT_EXTENSION};
use serde::{Deserialize, Serialize};

/// What to do when the resolver fails to load a location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadErrorPolicy {
    /// Abort the whole call with the failing location.
    #[default]
    FailFast,
    /// Log and drop the entry.
    Skip,
}

/// Options governing path resolution and directory descent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Base directory for relative locations.
    pub source: Option<PathBuf>,
    /// List bare (extension-less) locations as directories. When `false`
    /// they are handed to the resolver as a single entry script.
    pub recursive: bool,
    /// Accepted script extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Behavior on resolver failures.
    pub on_load_error: LoadErrorPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: None,
            recursive: true,
            extensions: vec![DEFAULT_SCRIPT_EXTENSION.to_string()],
            on_load_error: LoadErrorPolicy::default(),
        }
    }
}

impl Options {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `source`.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Enable or disable directory listing for bare locations.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the accepted script extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the load failure policy.
    pub fn with_load_error_policy(mut self, policy: LoadErrorPolicy) -> Self {
        self.on_load_error = policy;
        self
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content).map_err(Error::config)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::parse(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let options: Self = toml::from_str(content).map_err(|e| format!("Invalid options: {e}"))?;
        if let Some(bad) = options
            .extensions
            .iter()
            .find(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(format!("Empty script extension: {bad:?}"));
        }
        Ok(options)
    }
}
