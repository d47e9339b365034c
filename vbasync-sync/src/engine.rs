//! Sync orchestration.
//!
//! [`pull`] treats the live project as the source of truth and the folder as
//! destination; [`push`] is the reverse. Snapshots are taken fresh on every
//! run; nothing is carried over between invocations.

use std::path::Path;

use vbasync_core::{folder, ComponentCollection, ProjectSession};

use crate::apply::{apply_to_folder, apply_to_session, ApplyStats};
use crate::diff::{plan, SyncAction};
use crate::error::SyncError;
use crate::preview::{preview, ComponentDiff};

/// Which side is the source of truth for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    /// Live project → folder.
    Pull,
    /// Folder → live project.
    Push,
}

/// Caller-selected sync behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Also remove destination components absent from the source.
    pub clean: bool,
    /// Plan and preview only; apply nothing.
    pub dry_run: bool,
}

/// Outcome of one sync run.
#[derive(Debug)]
pub struct SyncReport {
    pub direction: SyncDirection,
    /// The computed plan, in application order.
    pub plan: Vec<SyncAction>,
    /// What was applied. `None` for a dry run.
    pub stats: Option<ApplyStats>,
    /// Unified diffs of pending content changes. Populated on dry runs.
    pub previews: Vec<ComponentDiff>,
}

/// Sync the live project into `dir`.
///
/// A missing folder is an empty destination; it is created on first write.
pub fn pull(
    session: &mut dyn ProjectSession,
    dir: &Path,
    opts: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let source = session.list_components()?;
    let destination = if dir.exists() {
        folder::list_components(dir)?
    } else {
        ComponentCollection::default()
    };

    let actions = plan(&source, &destination, opts.clean);
    tracing::debug!("pull plan: {} action(s)", actions.len());

    if opts.dry_run {
        let previews = preview(&actions, &destination);
        return Ok(SyncReport {
            direction: SyncDirection::Pull,
            plan: actions,
            stats: None,
            previews,
        });
    }

    let stats = apply_to_folder(&actions, dir)?;
    if opts.clean && dir.exists() {
        folder::cleanup_orphaned_frx(dir, &source.syncable())?;
    }

    Ok(SyncReport {
        direction: SyncDirection::Pull,
        plan: actions,
        stats: Some(stats),
        previews: Vec::new(),
    })
}

/// Sync the folder `dir` into the live project.
///
/// Unlike [`pull`], a missing source folder is an error — pushing an empty
/// snapshot by accident with `clean` set would wipe the project.
pub fn push(
    dir: &Path,
    session: &mut dyn ProjectSession,
    opts: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let source = folder::list_components(dir)?;
    let destination = session.list_components()?;

    let actions = plan(&source, &destination, opts.clean);
    tracing::debug!("push plan: {} action(s)", actions.len());

    if opts.dry_run {
        let previews = preview(&actions, &destination);
        return Ok(SyncReport {
            direction: SyncDirection::Push,
            plan: actions,
            stats: None,
            previews,
        });
    }

    let stats = apply_to_session(&actions, session)?;

    Ok(SyncReport {
        direction: SyncDirection::Push,
        plan: actions,
        stats: Some(stats),
        previews: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use vbasync_core::{Component, ComponentKind, MemoryProject, ProjectError};

    use super::*;

    #[test]
    fn pull_into_missing_folder_creates_it() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("vba");
        let mut session = MemoryProject::with_components([Component::new(
            "ModA",
            ComponentKind::Standard,
            "Sub A()\nEnd Sub\n",
        )]);

        let report = pull(&mut session, &dir, SyncOptions::default()).unwrap();
        assert_eq!(report.stats.unwrap().added, 1);
        assert!(dir.join("ModA.bas").exists());
    }

    #[test]
    fn push_from_missing_folder_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut session = MemoryProject::new();
        let err = push(&tmp.path().join("nope"), &mut session, SyncOptions::default())
            .expect_err("missing source dir");
        assert!(matches!(err, SyncError::Project(ProjectError::Io { .. })));
    }

    #[test]
    fn dry_run_applies_nothing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("vba");
        let mut session = MemoryProject::with_components([Component::new(
            "ModA",
            ComponentKind::Standard,
            "Sub A()\nEnd Sub\n",
        )]);

        let opts = SyncOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = pull(&mut session, &dir, opts).unwrap();

        assert!(report.stats.is_none());
        assert_eq!(report.plan.len(), 1);
        assert_eq!(report.previews.len(), 1);
        assert!(!dir.exists(), "dry run must not create the folder");
    }

    #[test]
    fn pull_clean_prunes_orphaned_frx() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Gone.frx"), [1]).unwrap();
        let mut session = MemoryProject::with_components([Component::new(
            "ModA",
            ComponentKind::Standard,
            "",
        )]);

        let opts = SyncOptions {
            clean: true,
            ..Default::default()
        };
        pull(&mut session, tmp.path(), opts).unwrap();
        assert!(!tmp.path().join("Gone.frx").exists());
    }
}
