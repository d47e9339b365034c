//! # vbasync-package
//!
//! Byte-safe single-part patching of zip-based Office document containers,
//! and the ribbon customization layer built on it.
//!
//! [`extract_part`] and [`replace_part`] treat the container as a sequence
//! of opaque entries: replacing one part raw-copies every other entry, so
//! the rest of the package (including the embedded macro project stream)
//! survives bit-for-bit. [`pull_ribbon`] / [`push_ribbon`] apply this to the
//! well-known ribbon XML part paths.

pub mod error;
pub mod patcher;
pub mod ribbon;

pub use error::PackageError;
pub use patcher::{extract_part, list_parts, replace_part};
pub use ribbon::{
    find_ribbon_part, pull_ribbon, push_ribbon, RIBBON_PART_CANDIDATES, RIBBON_TARGET_NAMES,
};
