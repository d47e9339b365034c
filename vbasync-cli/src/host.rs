//! Host session acquisition.
//!
//! The live project is only reachable through a host automation session, an
//! external collaborator this tool talks to exclusively via the
//! [`ProjectSession`] trait. Acquisition is funneled through
//! [`open_session`] so a platform automation bridge has exactly one seam to
//! plug into; without one, the failure is reported as
//! [`ProjectError::HostUnavailable`] rather than guessed around.

use std::path::Path;

use vbasync_core::{HostApp, ProjectError, ProjectSession};

/// Open an automation session on the document's macro project.
///
/// Validates the document path against the host's supported extensions
/// before any session is attempted, so a typo fails fast with a clear
/// message instead of a host error.
pub fn open_session(
    app: HostApp,
    document: &Path,
) -> Result<Box<dyn ProjectSession>, ProjectError> {
    app.validate_document_path(document)?;
    if !document.exists() {
        return Err(ProjectError::Io {
            path: document.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "document not found"),
        });
    }

    Err(ProjectError::HostUnavailable {
        reason: format!(
            "no {app} automation bridge is available on this platform; \
             programmatic access to the live project requires a host session"
        ),
    })
}
