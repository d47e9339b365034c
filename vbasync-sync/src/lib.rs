//! # vbasync-sync
//!
//! Plan-based synchronization between a folder of component files and a live
//! macro project.
//!
//! Call [`pull`] to materialize the live project on disk, or [`push`] to
//! write the folder's components into the project. Both snapshot the two
//! sides, compute an ordered [`SyncAction`] plan with [`diff::plan`], and
//! apply it; with [`SyncOptions::dry_run`] they render unified diff
//! previews instead.

pub mod apply;
pub mod diff;
pub mod engine;
pub mod error;
pub mod preview;

pub use apply::ApplyStats;
pub use diff::{PlanEntry, SyncAction};
pub use engine::{pull, push, SyncDirection, SyncOptions, SyncReport};
pub use error::SyncError;
pub use preview::ComponentDiff;
