//! Error types for vbasync-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::HostApp;

/// All errors that can arise from component snapshots, the folder store, and
/// live project sessions.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A named component was expected but absent.
    #[error("component not found: {name}")]
    NotFound { name: String },

    /// The automation session cannot be reached.
    #[error("host application unavailable: {reason}")]
    HostUnavailable { reason: String },

    /// Programmatic access to the project is not trusted/enabled.
    #[error("access to the macro project denied: {reason}")]
    PermissionDenied { reason: String },

    /// A source folder violates the on-disk component layout.
    #[error("malformed source at {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    /// Two components in one snapshot share a (case-insensitive) name.
    #[error("duplicate component name: {name}")]
    DuplicateName { name: String },

    /// The document path does not match the host's supported extensions.
    #[error("{path} is not a supported {app} document (expected {expected})")]
    UnsupportedDocument {
        path: PathBuf,
        app: HostApp,
        expected: String,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ProjectError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProjectError {
    ProjectError::Io {
        path: path.into(),
        source,
    }
}
