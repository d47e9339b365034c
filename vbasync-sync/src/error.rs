//! Error types for vbasync-sync.

use thiserror::Error;

use vbasync_core::ProjectError;

/// All errors that can arise from planning or applying a sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A snapshot could not be taken or a side could not be accessed.
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    /// Applying one action failed; the remaining plan was aborted.
    ///
    /// Carries the action verb and component name so the failure is
    /// actionable without re-running under a debugger.
    #[error("failed to {action} component '{name}': {source}")]
    Apply {
        action: &'static str,
        name: String,
        #[source]
        source: ProjectError,
    },
}

/// Annotate a [`ProjectError`] with the action and component it broke on.
pub(crate) fn apply_err(action: &'static str, name: &str, source: ProjectError) -> SyncError {
    SyncError::Apply {
        action,
        name: name.to_string(),
        source,
    }
}
