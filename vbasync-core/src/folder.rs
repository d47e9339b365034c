//! On-disk component store.
//!
//! A folder holds one file per component, kind encoded by extension
//! (`.bas`/`.cls`/`.frm`), with a `.frx` sibling carrying a form's binary
//! resource. Listing is deterministic (sorted by file name) so snapshots and
//! the plans computed from them are reproducible.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{io_err, ProjectError};
use crate::types::{Component, ComponentCollection, ComponentKind, ComponentName};

/// Snapshot the components materialized in `dir`.
///
/// Unrelated files are ignored. A stem carrying two component extensions
/// (`Foo.bas` next to `Foo.cls`) is a [`ProjectError::MalformedSource`]:
/// the kind for one logical name would be ambiguous.
pub fn list_components(dir: &Path) -> Result<ComponentCollection, ProjectError> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            files.push(entry.path());
        }
    }
    files.sort();

    // First pass: collect .frx payloads by normalized stem.
    let mut auxiliaries: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in &files {
        if extension_of(path).is_some_and(|e| e.eq_ignore_ascii_case("frx")) {
            if let Some(stem) = stem_of(path) {
                auxiliaries.insert(stem.to_ascii_lowercase(), path.clone());
            }
        }
    }

    // Second pass: build components, rejecting stem collisions.
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut components = Vec::new();
    for path in &files {
        let Some(kind) = extension_of(path).and_then(ComponentKind::from_file_extension) else {
            continue;
        };
        let Some(stem) = stem_of(path) else {
            continue;
        };
        if let Some(previous) = seen.insert(stem.to_ascii_lowercase(), path.clone()) {
            return Err(ProjectError::MalformedSource {
                path: dir.to_path_buf(),
                reason: format!(
                    "conflicting files for component '{}': {} and {}",
                    stem,
                    previous.display(),
                    path.display()
                ),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let mut component = Component::new(stem.clone(), kind, text);
        if kind == ComponentKind::Form {
            if let Some(frx) = auxiliaries.get(&stem.to_ascii_lowercase()) {
                let bytes = std::fs::read(frx).map_err(|e| io_err(frx, e))?;
                component = component.with_auxiliary(bytes);
            }
        }
        components.push(component);
    }

    ComponentCollection::from_components(components)
}

/// Materialize `component` as `<name>.<ext>` in `dir`, creating the folder
/// if needed. Forms also write (or clear) the `.frx` sibling.
pub fn write_component(dir: &Path, component: &Component) -> Result<PathBuf, ProjectError> {
    let Some(ext) = component.kind.file_extension() else {
        return Err(ProjectError::MalformedSource {
            path: dir.join(component.name.as_str()),
            reason: "document modules have no on-disk representation".to_string(),
        });
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let path = dir.join(format!("{}.{ext}", component.name.as_str()));
    std::fs::write(&path, &component.text).map_err(|e| io_err(&path, e))?;
    tracing::info!("wrote: {}", path.display());

    if component.kind == ComponentKind::Form {
        let frx = dir.join(format!("{}.frx", component.name.as_str()));
        match &component.auxiliary {
            Some(bytes) => {
                std::fs::write(&frx, bytes).map_err(|e| io_err(&frx, e))?;
                tracing::debug!("wrote auxiliary: {}", frx.display());
            }
            None => {
                if frx.exists() {
                    std::fs::remove_file(&frx).map_err(|e| io_err(&frx, e))?;
                    tracing::debug!("removed stale auxiliary: {}", frx.display());
                }
            }
        }
    }

    Ok(path)
}

/// Delete the file(s) materializing `name`, including any `.frx` sibling.
///
/// Matching is case-insensitive on the stem. [`ProjectError::NotFound`]
/// when nothing matched.
pub fn remove_component(dir: &Path, name: &ComponentName) -> Result<(), ProjectError> {
    let mut removed = false;
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let is_component_file = extension_of(&path).is_some_and(|e| {
            ComponentKind::from_file_extension(e).is_some() || e.eq_ignore_ascii_case("frx")
        });
        if !is_component_file {
            continue;
        }
        if stem_of(&path).is_some_and(|s| s.eq_ignore_ascii_case(name.as_str())) {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            tracing::info!("removed: {}", path.display());
            removed = true;
        }
    }

    if removed {
        Ok(())
    } else {
        Err(ProjectError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Delete `.frx` files whose stem matches no component in `keep`.
///
/// Forms removed on the live side leave their binary resource behind on
/// disk; this prunes those leftovers after a sync.
pub fn cleanup_orphaned_frx(
    dir: &Path,
    keep: &ComponentCollection,
) -> Result<Vec<PathBuf>, ProjectError> {
    let mut removed = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !extension_of(&path).is_some_and(|e| e.eq_ignore_ascii_case("frx")) {
            continue;
        }
        let orphaned = stem_of(&path)
            .map(|stem| !keep.contains(&ComponentName::from(stem.as_str())))
            .unwrap_or(true);
        if orphaned {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            tracing::debug!("removed orphaned auxiliary: {}", path.display());
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

fn stem_of(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn list_only_returns_component_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "ModA.bas", "Sub A()\nEnd Sub\n");
        write(tmp.path(), "Helper.cls", "' class\n");
        write(tmp.path(), "MainForm.frm", "VERSION 5.00\n");
        write(tmp.path(), "notes.txt", "ignored");
        write(tmp.path(), "README.md", "ignored");

        let collection = list_components(tmp.path()).unwrap();
        assert_eq!(collection.len(), 3);
        let kinds: Vec<_> = collection.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [ComponentKind::Class, ComponentKind::Form, ComponentKind::Standard]
        );
    }

    #[test]
    fn form_picks_up_frx_sibling() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "MainForm.frm", "VERSION 5.00\n");
        std::fs::write(tmp.path().join("MainForm.frx"), [0xCA, 0xFE]).unwrap();

        let collection = list_components(tmp.path()).unwrap();
        let form = collection.get(&ComponentName::from("MainForm")).unwrap();
        assert_eq!(form.auxiliary.as_deref(), Some(&[0xCA, 0xFE][..]));
    }

    #[test]
    fn conflicting_extensions_for_one_stem_is_malformed_source() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Foo.bas", "");
        write(tmp.path(), "Foo.cls", "");

        let err = list_components(tmp.path()).expect_err("stem conflict must fail");
        assert!(matches!(err, ProjectError::MalformedSource { .. }));
        assert!(err.to_string().contains("Foo"));
    }

    #[test]
    fn write_creates_directory_and_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("src").join("vba");
        let component = Component::new("ModA", ComponentKind::Standard, "Sub A()\nEnd Sub\n");

        let path = write_component(&dir, &component).unwrap();
        assert_eq!(path, dir.join("ModA.bas"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Sub A()\nEnd Sub\n");
    }

    #[test]
    fn write_form_with_auxiliary_creates_frx() {
        let tmp = TempDir::new().unwrap();
        let component =
            Component::new("MainForm", ComponentKind::Form, "VERSION 5.00\n").with_auxiliary(vec![1, 2, 3]);

        write_component(tmp.path(), &component).unwrap();
        assert_eq!(std::fs::read(tmp.path().join("MainForm.frx")).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn write_form_without_auxiliary_clears_stale_frx() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("MainForm.frx"), [9]).unwrap();
        let component = Component::new("MainForm", ComponentKind::Form, "VERSION 5.00\n");

        write_component(tmp.path(), &component).unwrap();
        assert!(!tmp.path().join("MainForm.frx").exists());
    }

    #[test]
    fn write_document_module_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let component = Component::new("ThisWorkbook", ComponentKind::Document, "");
        let err = write_component(tmp.path(), &component).expect_err("must reject");
        assert!(matches!(err, ProjectError::MalformedSource { .. }));
    }

    #[test]
    fn remove_deletes_component_and_frx_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "MainForm.frm", "");
        std::fs::write(tmp.path().join("MainForm.frx"), [1]).unwrap();

        remove_component(tmp.path(), &ComponentName::from("mainform")).unwrap();
        assert!(!tmp.path().join("MainForm.frm").exists());
        assert!(!tmp.path().join("MainForm.frx").exists());
    }

    #[test]
    fn remove_missing_component_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = remove_component(tmp.path(), &ComponentName::from("Nope")).expect_err("absent");
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn cleanup_removes_only_unmatched_frx() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("MainForm.frx"), [1]).unwrap();
        std::fs::write(tmp.path().join("OldForm.frx"), [2]).unwrap();
        let keep = ComponentCollection::from_components([Component::new(
            "MainForm",
            ComponentKind::Form,
            "",
        )])
        .unwrap();

        let removed = cleanup_orphaned_frx(tmp.path(), &keep).unwrap();
        assert_eq!(removed, vec![tmp.path().join("OldForm.frx")]);
        assert!(tmp.path().join("MainForm.frx").exists());
    }
}
