//! Plan application against the two destination kinds.
//!
//! Failure semantics: the first action that fails aborts the remaining plan.
//! Partial application is visible and reported, never rolled back: the two
//! sides are plain files and a live document, and neither supports an atomic
//! multi-entity commit.

use std::path::Path;

use serde::Serialize;

use vbasync_core::{folder, ProjectError, ProjectSession};

use crate::diff::SyncAction;
use crate::error::{apply_err, SyncError};

/// Counts of what a plan application actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Remove targets that were already absent (logged, counted, not an
    /// error — keeps clean sync idempotent).
    pub already_absent: usize,
}

impl ApplyStats {
    pub fn total(&self) -> usize {
        self.added + self.updated + self.removed
    }
}

/// Apply `actions` to a folder destination.
///
/// Updates are plain overwrites; the filesystem has no remove-then-add
/// requirement.
pub fn apply_to_folder(actions: &[SyncAction], dir: &Path) -> Result<ApplyStats, SyncError> {
    let mut stats = ApplyStats::default();
    for action in actions {
        match action {
            SyncAction::Add(component) => {
                folder::write_component(dir, component)
                    .map_err(|e| apply_err("add", component.name.as_str(), e))?;
                stats.added += 1;
            }
            SyncAction::Update(component) => {
                folder::write_component(dir, component)
                    .map_err(|e| apply_err("update", component.name.as_str(), e))?;
                stats.updated += 1;
            }
            SyncAction::Remove(name) => match folder::remove_component(dir, name) {
                Ok(()) => stats.removed += 1,
                Err(ProjectError::NotFound { .. }) => {
                    tracing::warn!("remove '{name}': already absent, skipping");
                    stats.already_absent += 1;
                }
                Err(e) => return Err(apply_err("remove", name.as_str(), e)),
            },
        }
    }
    Ok(stats)
}

/// Apply `actions` to a live project destination.
///
/// An Update is remove-if-exists then add: in-place text replacement is not
/// guaranteed atomic in the host object model, so namesakes are dropped
/// before the new body is written.
pub fn apply_to_session(
    actions: &[SyncAction],
    session: &mut dyn ProjectSession,
) -> Result<ApplyStats, SyncError> {
    let mut stats = ApplyStats::default();
    for action in actions {
        match action {
            SyncAction::Add(component) => {
                session
                    .write_component(component)
                    .map_err(|e| apply_err("add", component.name.as_str(), e))?;
                stats.added += 1;
            }
            SyncAction::Update(component) => {
                match session.remove_component(&component.name) {
                    Ok(()) | Err(ProjectError::NotFound { .. }) => {}
                    Err(e) => return Err(apply_err("update", component.name.as_str(), e)),
                }
                session
                    .write_component(component)
                    .map_err(|e| apply_err("update", component.name.as_str(), e))?;
                stats.updated += 1;
            }
            SyncAction::Remove(name) => match session.remove_component(name) {
                Ok(()) => stats.removed += 1,
                Err(ProjectError::NotFound { .. }) => {
                    tracing::warn!("remove '{name}': already absent, skipping");
                    stats.already_absent += 1;
                }
                Err(e) => return Err(apply_err("remove", name.as_str(), e)),
            },
        }
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use vbasync_core::{
        Component, ComponentCollection, ComponentKind, ComponentName, MemoryProject,
    };

    use super::*;

    /// Session wrapper that rejects writes to one component name, for
    /// abort-on-first-failure coverage.
    #[derive(Debug)]
    struct RejectingSession {
        inner: MemoryProject,
        reject: ComponentName,
    }

    impl ProjectSession for RejectingSession {
        fn list_components(&mut self) -> Result<ComponentCollection, ProjectError> {
            self.inner.list_components()
        }

        fn read_component(&mut self, name: &ComponentName) -> Result<Component, ProjectError> {
            self.inner.read_component(name)
        }

        fn write_component(&mut self, component: &Component) -> Result<(), ProjectError> {
            if component.name == self.reject {
                return Err(ProjectError::PermissionDenied {
                    reason: "host rejected the write".to_string(),
                });
            }
            self.inner.write_component(component)
        }

        fn remove_component(&mut self, name: &ComponentName) -> Result<(), ProjectError> {
            self.inner.remove_component(name)
        }
    }

    fn add(name: &str, text: &str) -> SyncAction {
        SyncAction::Add(Component::new(name, ComponentKind::Standard, text))
    }

    #[test]
    fn folder_apply_counts_adds_updates_removes() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Old.bas"), "' old\n").unwrap();
        std::fs::write(tmp.path().join("Both.bas"), "' v1\n").unwrap();

        let actions = vec![
            add("Fresh", "' fresh\n"),
            SyncAction::Update(Component::new("Both", ComponentKind::Standard, "' v2\n")),
            SyncAction::Remove(ComponentName::from("Old")),
        ];
        let stats = apply_to_folder(&actions, tmp.path()).unwrap();

        assert_eq!(
            stats,
            ApplyStats {
                added: 1,
                updated: 1,
                removed: 1,
                already_absent: 0
            }
        );
        assert!(tmp.path().join("Fresh.bas").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("Both.bas")).unwrap(),
            "' v2\n"
        );
        assert!(!tmp.path().join("Old.bas").exists());
    }

    #[test]
    fn folder_remove_of_absent_target_is_skipped_not_failed() {
        let tmp = TempDir::new().unwrap();
        let actions = vec![SyncAction::Remove(ComponentName::from("Ghost"))];
        let stats = apply_to_folder(&actions, tmp.path()).unwrap();
        assert_eq!(stats.already_absent, 1);
        assert_eq!(stats.removed, 0);
    }

    #[test]
    fn session_update_replaces_existing_namesake() {
        let mut session = MemoryProject::with_components([Component::new(
            "ModA",
            ComponentKind::Standard,
            "' v1\n",
        )]);
        let actions = vec![SyncAction::Update(Component::new(
            "MODA",
            ComponentKind::Standard,
            "' v2\n",
        ))];
        let stats = apply_to_session(&actions, &mut session).unwrap();

        assert_eq!(stats.updated, 1);
        assert_eq!(session.len(), 1);
        assert_eq!(
            session.get(&ComponentName::from("moda")).unwrap().text,
            "' v2\n"
        );
    }

    #[test]
    fn session_update_of_absent_namesake_still_writes() {
        // Update against a side that lost the component between snapshot and
        // apply behaves like an add, not an error.
        let mut session = MemoryProject::new();
        let actions = vec![SyncAction::Update(Component::new(
            "ModA",
            ComponentKind::Standard,
            "' v2\n",
        ))];
        let stats = apply_to_session(&actions, &mut session).unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn first_failure_aborts_remaining_plan() {
        let mut session = RejectingSession {
            inner: MemoryProject::new(),
            reject: ComponentName::from("Bad"),
        };
        let actions = vec![
            add("Apple", "' a\n"),
            add("Bad", "' b\n"),
            add("Cherry", "' c\n"),
        ];

        let err = apply_to_session(&actions, &mut session).expect_err("must abort");
        match &err {
            SyncError::Apply { action, name, .. } => {
                assert_eq!(*action, "add");
                assert_eq!(name, "Bad");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Apple applied, Cherry never attempted.
        assert!(session.inner.get(&ComponentName::from("Apple")).is_some());
        assert!(session.inner.get(&ComponentName::from("Cherry")).is_none());
    }
}
