//! Error types for parameter loading, rendering and generation.
//!
//! Each stage has its own error type so callers can tell a malformed
//! configuration apart from a broken template or a failed write.
//! [`GenerateError`] wraps them with the path or theme they relate to.
//!
//! Display strings describe only their own layer; the underlying cause is
//! reachable through [`std::error::Error::source`].

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error raised while reading or parsing a parameter document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read.
    #[error("failed to read parameter document")]
    Io(#[from] io::Error),

    /// The document is not valid JSON for the parameter schema.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML for the parameter schema.
    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but violates a model invariant.
    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// Error raised while substituting placeholders into a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A `{{` with no matching `}}`.
    #[error("unclosed placeholder starting at byte {offset}")]
    Unclosed { offset: usize },

    /// A `{{}}` with nothing (or only whitespace) inside.
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },

    /// A placeholder whose key is defined by no value source.
    #[error("no value for placeholder `{{{{{0}}}}}`")]
    Unresolved(String),
}

/// Error raised while acquiring the cross-process job lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another holder kept the lock past the wait bound.
    #[error("another instance holds the generation lock for {key} (waited {waited:?})")]
    Timeout { key: PathBuf, waited: Duration },

    /// The lock file could not be opened or locked.
    #[error("failed to lock {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error type for a generation run.
///
/// Every variant is fatal: the run stops at the first error. Files written by
/// earlier targets are left in place.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The parameter document is missing, unreadable or malformed.
    #[error("failed to load parameters from {path}")]
    Parameters {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The template file could not be read.
    #[error("failed to read template {path}")]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory could not be determined or created.
    #[error("output directory {path} is not usable")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rendering the template for one target failed.
    #[error("failed to render theme {theme}")]
    Render {
        theme: String,
        #[source]
        source: RenderError,
    },

    /// Writing one output file failed.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The job lock could not be acquired.
    #[error(transparent)]
    Lock(#[from] LockError),
}
