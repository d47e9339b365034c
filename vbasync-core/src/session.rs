//! Live project adapter boundary.
//!
//! The host application's automation session is the one ambient resource in
//! this system. It is modeled as a value implementing [`ProjectSession`],
//! acquired for exactly one document and released on drop, never as global
//! state. The sync engine is testable against [`MemoryProject`], and a
//! platform automation bridge only has to implement four operations.

use std::collections::BTreeMap;

use crate::error::ProjectError;
use crate::types::{Component, ComponentCollection, ComponentName};

/// Narrow contract the sync engine uses to talk to a live macro project.
///
/// All operations are fallible: a host may become unreachable mid-session
/// ([`ProjectError::HostUnavailable`]) or refuse programmatic project access
/// ([`ProjectError::PermissionDenied`]).
pub trait ProjectSession: std::fmt::Debug {
    /// Point-in-time snapshot of every component in the project, document
    /// modules included.
    fn list_components(&mut self) -> Result<ComponentCollection, ProjectError>;

    /// Read one component by name. [`ProjectError::NotFound`] if absent.
    fn read_component(&mut self, name: &ComponentName) -> Result<Component, ProjectError>;

    /// Create or replace a component.
    fn write_component(&mut self, component: &Component) -> Result<(), ProjectError>;

    /// Remove a component by name. [`ProjectError::NotFound`] if absent.
    fn remove_component(&mut self, name: &ComponentName) -> Result<(), ProjectError>;
}

/// In-memory [`ProjectSession`], the substitute adapter for tests and
/// embedders without a host application.
#[derive(Debug, Clone, Default)]
pub struct MemoryProject {
    components: BTreeMap<String, Component>,
}

impl MemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the project with `components` (last write wins on name clashes,
    /// matching host behavior when a project is built up incrementally).
    pub fn with_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut project = Self::new();
        for component in components {
            project.insert(component);
        }
        project
    }

    pub fn insert(&mut self, component: Component) {
        self.components
            .insert(component.name.normalized(), component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, name: &ComponentName) -> Option<&Component> {
        self.components.get(&name.normalized())
    }
}

impl ProjectSession for MemoryProject {
    fn list_components(&mut self) -> Result<ComponentCollection, ProjectError> {
        ComponentCollection::from_components(self.components.values().cloned())
    }

    fn read_component(&mut self, name: &ComponentName) -> Result<Component, ProjectError> {
        self.components
            .get(&name.normalized())
            .cloned()
            .ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })
    }

    fn write_component(&mut self, component: &Component) -> Result<(), ProjectError> {
        tracing::debug!("write component '{}'", component.name);
        self.insert(component.clone());
        Ok(())
    }

    fn remove_component(&mut self, name: &ComponentName) -> Result<(), ProjectError> {
        match self.components.remove(&name.normalized()) {
            Some(_) => {
                tracing::debug!("removed component '{name}'");
                Ok(())
            }
            None => Err(ProjectError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
