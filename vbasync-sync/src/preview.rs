//! Dry-run unified diff support.
//!
//! Previews what a plan would change without touching either side. Because
//! Updates are planned unconditionally, the preview filters out namesakes
//! whose text is identical after line-ending normalization; those would be
//! pure noise in a dry run.

use similar::TextDiff;

use vbasync_core::{ComponentCollection, ComponentKind};

use crate::diff::SyncAction;

/// A single rendered component diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDiff {
    pub name: String,
    pub unified_diff: String,
}

/// Render unified diffs for the Add/Update actions of `plan` against the
/// destination snapshot the plan was computed from.
pub fn preview(plan: &[SyncAction], destination: &ComponentCollection) -> Vec<ComponentDiff> {
    let mut diffs = Vec::new();
    for action in plan {
        let component = match action {
            SyncAction::Add(c) | SyncAction::Update(c) => c,
            SyncAction::Remove(_) => continue,
        };

        let new_text = normalize_line_endings(&component.text);
        let old_text = destination
            .get(&component.name)
            .map(|existing| normalize_line_endings(&existing.text))
            .unwrap_or_default();
        if old_text == new_text {
            continue;
        }

        let file_name = display_file_name(component.name.as_str(), component.kind);
        let old_header = format!("a/{file_name}");
        let new_header = format!("b/{file_name}");
        let unified = TextDiff::from_lines(&old_text, &new_text)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(ComponentDiff {
            name: component.name.to_string(),
            unified_diff: unified,
        });
    }
    diffs
}

fn display_file_name(name: &str, kind: ComponentKind) -> String {
    match kind.file_extension() {
        Some(ext) => format!("{name}.{ext}"),
        None => name.to_string(),
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
