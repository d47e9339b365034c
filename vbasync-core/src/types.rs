//! Domain types for macro components.
//!
//! Component identity is case-insensitive because the host environment does
//! not distinguish `ModA` from `moda`. [`ComponentName`] preserves the
//! original spelling for display while comparing, ordering, and hashing on a
//! case-folded form.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::ProjectError;

// ---------------------------------------------------------------------------
// Host type tags (VBIDE component type constants)
// ---------------------------------------------------------------------------

/// Host tag for a standard module (`vbext_ct_StdModule`).
pub const HOST_TYPE_STANDARD: u32 = 1;
/// Host tag for a class module (`vbext_ct_ClassModule`).
pub const HOST_TYPE_CLASS: u32 = 2;
/// Host tag for a form (`vbext_ct_MSForm`).
pub const HOST_TYPE_FORM: u32 = 3;
/// Host tag for a document module (`vbext_ct_Document`).
pub const HOST_TYPE_DOCUMENT: u32 = 100;

// ---------------------------------------------------------------------------
// ComponentName
// ---------------------------------------------------------------------------

/// A component identifier, compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentName(String);

impl ComponentName {
    /// The name exactly as the source side spelled it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for identity, ordering, and hashing.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ComponentName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for ComponentName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ComponentName {}

impl PartialOrd for ComponentName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl Hash for ComponentName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

/// Whether `name` is a built-in document-module identifier.
///
/// Document modules (`ThisWorkbook`, `ThisDocument`, `Sheet1`, ...) are tied
/// to host objects and cannot be created or destroyed by name, so the sync
/// engine must never produce an action for them.
pub fn is_document_module_name(name: &str) -> bool {
    let folded = name.to_ascii_lowercase();
    if folded == "thisworkbook" || folded == "thisdocument" {
        return true;
    }
    match folded.strip_prefix("sheet") {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// The kind of macro component contained in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A standard module (`.bas`).
    Standard,
    /// A class module (`.cls`).
    Class,
    /// A form (`.frm`, with an optional `.frx` binary sibling).
    Form,
    /// A document module (`ThisWorkbook`, sheet modules). Never synced.
    Document,
}

impl ComponentKind {
    /// File extension (without dot) used to materialize this kind on disk.
    ///
    /// `Document` has no disk representation.
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            ComponentKind::Standard => Some("bas"),
            ComponentKind::Class => Some("cls"),
            ComponentKind::Form => Some("frm"),
            ComponentKind::Document => None,
        }
    }

    /// Kind encoded by a file extension (case-insensitive, without dot).
    pub fn from_file_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("bas") {
            Some(ComponentKind::Standard)
        } else if ext.eq_ignore_ascii_case("cls") {
            Some(ComponentKind::Class)
        } else if ext.eq_ignore_ascii_case("frm") {
            Some(ComponentKind::Form)
        } else {
            None
        }
    }

    /// Native component-type tag used by the host object model.
    pub fn host_type_tag(&self) -> u32 {
        match self {
            ComponentKind::Standard => HOST_TYPE_STANDARD,
            ComponentKind::Class => HOST_TYPE_CLASS,
            ComponentKind::Form => HOST_TYPE_FORM,
            ComponentKind::Document => HOST_TYPE_DOCUMENT,
        }
    }

    /// Kind for a host component-type tag; `None` for tags this tool does
    /// not handle (e.g. ActiveX designers).
    pub fn from_host_type_tag(tag: u32) -> Option<Self> {
        match tag {
            HOST_TYPE_STANDARD => Some(ComponentKind::Standard),
            HOST_TYPE_CLASS => Some(ComponentKind::Class),
            HOST_TYPE_FORM => Some(ComponentKind::Form),
            HOST_TYPE_DOCUMENT => Some(ComponentKind::Document),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Standard => write!(f, "module"),
            ComponentKind::Class => write!(f, "class"),
            ComponentKind::Form => write!(f, "form"),
            ComponentKind::Document => write!(f, "document"),
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One exported macro unit: name, kind, opaque text body, and the optional
/// binary resource that accompanies forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: ComponentName,
    pub kind: ComponentKind,
    /// Opaque source text. Never parsed, only moved between sides.
    pub text: String,
    /// Form binary resource (`.frx` payload). `Some` only for `Form`.
    pub auxiliary: Option<Vec<u8>>,
}

impl Component {
    pub fn new(name: impl Into<ComponentName>, kind: ComponentKind, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            text: text.into(),
            auxiliary: None,
        }
    }

    pub fn with_auxiliary(mut self, bytes: Vec<u8>) -> Self {
        self.auxiliary = Some(bytes);
        self
    }

    /// True when the sync engine may act on this component.
    ///
    /// Document modules are excluded both by kind and by built-in name, so a
    /// stray `ThisWorkbook.cls` on disk is just as untouchable as the real
    /// document module in a live project.
    pub fn is_syncable(&self) -> bool {
        self.kind != ComponentKind::Document && !is_document_module_name(self.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComponentCollection
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of one side's components, ordered by name.
///
/// Immutable once produced; a sync pass always re-snapshots both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentCollection {
    components: BTreeMap<String, Component>,
}

impl ComponentCollection {
    /// Build a snapshot, rejecting duplicate (case-insensitive) names.
    pub fn from_components(
        components: impl IntoIterator<Item = Component>,
    ) -> Result<Self, ProjectError> {
        let mut map = BTreeMap::new();
        for component in components {
            let key = component.name.normalized();
            if map.insert(key, component.clone()).is_some() {
                return Err(ProjectError::DuplicateName {
                    name: component.name.to_string(),
                });
            }
        }
        Ok(Self { components: map })
    }

    pub fn get(&self, name: &ComponentName) -> Option<&Component> {
        self.components.get(&name.normalized())
    }

    pub fn contains(&self, name: &ComponentName) -> bool {
        self.components.contains_key(&name.normalized())
    }

    /// Components in normalized-name order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &ComponentName> {
        self.components.values().map(|c| &c.name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The subset the sync engine is allowed to act on (document modules
    /// stripped).
    pub fn syncable(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .filter(|(_, c)| c.is_syncable())
                .map(|(k, c)| (k.clone(), c.clone()))
                .collect(),
        }
    }
}

impl IntoIterator for ComponentCollection {
    type Item = Component;
    type IntoIter = std::collections::btree_map::IntoValues<String, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_values()
    }
}

// ---------------------------------------------------------------------------
// HostApp
// ---------------------------------------------------------------------------

/// The document-editing application hosting the live project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostApp {
    #[default]
    Excel,
    Word,
}

impl HostApp {
    /// Document extensions (lowercase, without dot) this host can open.
    pub fn document_extensions(&self) -> &'static [&'static str] {
        match self {
            HostApp::Excel => &["xlsm", "xlsb", "xlam", "xls"],
            HostApp::Word => &["docm", "dotm", "doc"],
        }
    }

    /// Validate that `path` names a document this host can open.
    pub fn validate_document_path(&self, path: &std::path::Path) -> Result<(), ProjectError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if self.document_extensions().contains(&ext.as_str()) {
            Ok(())
        } else {
            Err(ProjectError::UnsupportedDocument {
                path: path.to_path_buf(),
                app: *self,
                expected: self.document_extensions().join("/"),
            })
        }
    }
}

impl fmt::Display for HostApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostApp::Excel => write!(f, "excel"),
            HostApp::Word => write!(f, "word"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
