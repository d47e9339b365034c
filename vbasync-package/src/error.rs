//! Error types for vbasync-package.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from container part extraction and patching.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The container is not a readable zip archive.
    #[error("malformed container {path}: {reason}")]
    MalformedContainer { path: PathBuf, reason: String },

    /// The named part is absent from the container.
    #[error("part not found in container: {part}")]
    PartNotFound { part: String },

    /// Neither well-known ribbon part exists in the container.
    #[error(
        "no ribbon XML found; expected customUI/customUI14.xml or customUI/customUI.xml in the package"
    )]
    RibbonNotFound,

    /// The requested ribbon target is not one of the well-known names.
    #[error("invalid ribbon target '{target}'; expected customUI14.xml or customUI.xml")]
    InvalidRibbonTarget { target: String },

    /// The rewritten archive failed its structural check; the original file
    /// was left untouched.
    #[error("rewritten container {path} failed validation: {reason}")]
    ValidationFailed { path: PathBuf, reason: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`PackageError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PackageError {
    PackageError::Io {
        path: path.into(),
        source,
    }
}
