//! vbasync core library — component model, folder store, session boundary.
//!
//! Public API surface:
//! - [`types`] — [`Component`], [`ComponentKind`], [`ComponentCollection`],
//!   [`HostApp`] and the case-insensitive [`ComponentName`]
//! - [`folder`] — list / write / remove components against a directory
//! - [`session`] — the [`ProjectSession`] adapter trait and the
//!   [`MemoryProject`] fake
//! - [`error`] — [`ProjectError`]

pub mod error;
pub mod folder;
pub mod session;
pub mod types;

pub use error::ProjectError;
pub use session::{MemoryProject, ProjectSession};
pub use types::{
    is_document_module_name, Component, ComponentCollection, ComponentKind, ComponentName,
    HostApp,
};
