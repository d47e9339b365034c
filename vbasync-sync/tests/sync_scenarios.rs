//! End-to-end sync scenarios over a temp folder and an in-memory project.

use tempfile::TempDir;

use vbasync_core::{folder, Component, ComponentKind, ComponentName, MemoryProject};
use vbasync_sync::{pull, push, SyncAction, SyncOptions};

fn live_project() -> MemoryProject {
    MemoryProject::with_components([
        Component::new("ModA", ComponentKind::Standard, "Sub X()\nEnd Sub\n"),
        Component::new("Helper", ComponentKind::Class, "' helper class\n"),
        Component::new("ThisWorkbook", ComponentKind::Document, "' doc module\n"),
    ])
}

#[test]
fn pull_then_push_roundtrip_plans_only_updates() {
    let dir = TempDir::new().expect("dir");
    let mut session = live_project();

    // Export: empty folder, live project has ModA + Helper.
    let report = pull(&mut session, dir.path(), SyncOptions::default()).expect("pull");
    let stats = report.stats.unwrap();
    assert_eq!(stats.added, 2);
    assert_eq!(stats.removed, 0);
    let exported = std::fs::read_to_string(dir.path().join("ModA.bas")).expect("ModA.bas");
    assert_eq!(exported, "Sub X()\nEnd Sub\n");

    // Import with clean against the unmodified project: every action is an
    // Update, nothing added or removed, content unchanged afterwards.
    let opts = SyncOptions {
        clean: true,
        ..Default::default()
    };
    let report = push(dir.path(), &mut session, opts).expect("push");
    assert!(report
        .plan
        .iter()
        .all(|a| matches!(a, SyncAction::Update(_))));
    let stats = report.stats.unwrap();
    assert_eq!(stats.added, 0);
    assert_eq!(stats.updated, 2);
    assert_eq!(stats.removed, 0);

    let read = session
        .get(&ComponentName::from("ModA"))
        .expect("ModA survives");
    assert_eq!(read.text, "Sub X()\nEnd Sub\n");
    assert!(
        session.get(&ComponentName::from("ThisWorkbook")).is_some(),
        "document module untouched"
    );
}

#[test]
fn second_identical_pull_is_idempotent() {
    let dir = TempDir::new().expect("dir");
    let mut session = live_project();

    pull(&mut session, dir.path(), SyncOptions::default()).expect("first pull");
    let before: Vec<_> = folder::list_components(dir.path())
        .expect("snapshot")
        .into_iter()
        .map(|c| (c.name.to_string(), c.text))
        .collect();

    let report = pull(&mut session, dir.path(), SyncOptions::default()).expect("second pull");
    assert!(report
        .plan
        .iter()
        .all(|a| matches!(a, SyncAction::Update(_))));

    let after: Vec<_> = folder::list_components(dir.path())
        .expect("snapshot")
        .into_iter()
        .map(|c| (c.name.to_string(), c.text))
        .collect();
    assert_eq!(before, after, "second pull must not change disk content");
}

#[test]
fn clean_push_removes_exactly_the_folder_absent_names() {
    let dir = TempDir::new().expect("dir");
    std::fs::write(dir.path().join("ModA.bas"), "Sub X()\nEnd Sub\n").expect("write");
    let mut session = live_project(); // also holds Helper + ThisWorkbook

    let opts = SyncOptions {
        clean: true,
        ..Default::default()
    };
    let report = push(dir.path(), &mut session, opts).expect("push");
    let stats = report.stats.unwrap();
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.removed, 1, "only Helper is folder-absent");

    assert!(session.get(&ComponentName::from("ModA")).is_some());
    assert!(session.get(&ComponentName::from("Helper")).is_none());
    assert!(
        session.get(&ComponentName::from("ThisWorkbook")).is_some(),
        "clean never touches document modules"
    );
}

#[test]
fn push_without_clean_leaves_extra_live_components_alone() {
    let dir = TempDir::new().expect("dir");
    std::fs::write(dir.path().join("ModA.bas"), "Sub X()\nEnd Sub\n").expect("write");
    let mut session = live_project();

    push(dir.path(), &mut session, SyncOptions::default()).expect("push");

    assert!(
        session.get(&ComponentName::from("Helper")).is_some(),
        "extra destination component must survive a non-clean sync"
    );
}

#[test]
fn form_auxiliary_travels_both_directions() {
    let dir = TempDir::new().expect("dir");
    let mut session = MemoryProject::with_components([Component::new(
        "MainForm",
        ComponentKind::Form,
        "VERSION 5.00\n",
    )
    .with_auxiliary(vec![0xDE, 0xAD])]);

    pull(&mut session, dir.path(), SyncOptions::default()).expect("pull");
    assert_eq!(
        std::fs::read(dir.path().join("MainForm.frx")).expect("frx"),
        [0xDE, 0xAD]
    );

    // Edit the binary resource on disk, push it back.
    std::fs::write(dir.path().join("MainForm.frx"), [0xBE, 0xEF]).expect("edit frx");
    push(dir.path(), &mut session, SyncOptions::default()).expect("push");
    let form = session.get(&ComponentName::from("MainForm")).expect("form");
    assert_eq!(form.auxiliary.as_deref(), Some(&[0xBE, 0xEF][..]));
}
