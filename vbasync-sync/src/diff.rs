//! Plan computation — set-difference between two component snapshots.
//!
//! The engine never compares component bodies: a name present on both sides
//! is always an [`SyncAction::Update`], because text equality across the two
//! sides is unreliable under line-ending and encoding normalization.
//! Destination-only names become [`SyncAction::Remove`] only when the caller
//! requests a clean sync.

use serde::Serialize;

use vbasync_core::{Component, ComponentCollection, ComponentKind, ComponentName};

/// One step of a sync plan, applied against the destination side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Create a component that exists only in the source.
    Add(Component),
    /// Rewrite a component present on both sides with the source's content.
    Update(Component),
    /// Delete a destination component absent from the source (clean only).
    Remove(ComponentName),
}

impl SyncAction {
    /// The component this action targets.
    pub fn name(&self) -> &ComponentName {
        match self {
            SyncAction::Add(c) | SyncAction::Update(c) => &c.name,
            SyncAction::Remove(name) => name,
        }
    }

    /// Lowercase verb for logs and plan output.
    pub fn verb(&self) -> &'static str {
        match self {
            SyncAction::Add(_) => "add",
            SyncAction::Update(_) => "update",
            SyncAction::Remove(_) => "remove",
        }
    }

    /// Machine-readable summary of this action (component bodies omitted).
    pub fn summarize(&self) -> PlanEntry {
        PlanEntry {
            action: self.verb(),
            name: self.name().to_string(),
            kind: match self {
                SyncAction::Add(c) | SyncAction::Update(c) => Some(c.kind),
                SyncAction::Remove(_) => None,
            },
        }
    }
}

/// One plan step reduced to what reports and `--json` output need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub action: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ComponentKind>,
}

/// Compute the ordered plan turning `destination` into `source`.
///
/// Ordering guarantees:
/// - Add/Update actions come first, in name order; Remove actions follow,
///   in name order. A multi-step replacement never passes through a state
///   where a role has zero components.
/// - Deterministic for identical inputs, so plans are testable and logs
///   are predictable.
///
/// Document modules are stripped from both snapshots before diffing; their
/// host-side definitions cannot be replaced by name alone.
pub fn plan(
    source: &ComponentCollection,
    destination: &ComponentCollection,
    clean: bool,
) -> Vec<SyncAction> {
    let source = source.syncable();
    let destination = destination.syncable();

    let mut actions = Vec::new();
    for component in source.iter() {
        if destination.contains(&component.name) {
            actions.push(SyncAction::Update(component.clone()));
        } else {
            actions.push(SyncAction::Add(component.clone()));
        }
    }

    if clean {
        for name in destination.names() {
            if !source.contains(name) {
                actions.push(SyncAction::Remove(name.clone()));
            }
        }
    }

    actions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
