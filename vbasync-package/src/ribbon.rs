//! Ribbon customization XML round-trip.
//!
//! OOXML packages store ribbon extensions under one of two well-known part
//! paths; newer documents use `customUI/customUI14.xml`, older ones
//! `customUI/customUI.xml`. Pull probes the candidates in that order; push
//! targets the existing part, or the explicit `--target` override, or falls
//! back to the newer name for packages that had no ribbon yet.

use std::path::{Path, PathBuf};

use crate::error::{io_err, PackageError};
use crate::patcher::{extract_part, list_parts, replace_part};

/// Well-known ribbon part paths, probed in order.
pub const RIBBON_PART_CANDIDATES: [&str; 2] =
    ["customUI/customUI14.xml", "customUI/customUI.xml"];

/// File names accepted as an explicit push target.
pub const RIBBON_TARGET_NAMES: [&str; 2] = ["customUI14.xml", "customUI.xml"];

/// The ribbon part present in `container`, if any, spelled exactly as the
/// archive stores it.
pub fn find_ribbon_part(container: &Path) -> Result<Option<String>, PackageError> {
    let parts = list_parts(container)?;
    for candidate in RIBBON_PART_CANDIDATES {
        if let Some(found) = parts
            .iter()
            .find(|p| p.trim_start_matches('/') == candidate)
        {
            return Ok(Some(found.clone()));
        }
    }
    Ok(None)
}

/// Extract the ribbon XML from `container` into `out_xml`.
pub fn pull_ribbon(container: &Path, out_xml: &Path) -> Result<PathBuf, PackageError> {
    let part = find_ribbon_part(container)?.ok_or(PackageError::RibbonNotFound)?;
    let bytes = extract_part(container, &part)?;

    if let Some(parent) = out_xml.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }
    std::fs::write(out_xml, bytes).map_err(|e| io_err(out_xml, e))?;
    tracing::info!("extracted '{part}' to {}", out_xml.display());
    Ok(out_xml.to_path_buf())
}

/// Inject the XML file `xml` as the ribbon part of `container`.
///
/// Writes to `out_container` when given, otherwise updates `container` in
/// place. Every other part of the package passes through unmodified.
pub fn push_ribbon(
    container: &Path,
    xml: &Path,
    out_container: Option<&Path>,
    target: Option<&str>,
) -> Result<PathBuf, PackageError> {
    let bytes = std::fs::read(xml).map_err(|e| io_err(xml, e))?;

    let part = match target {
        Some(name) if RIBBON_TARGET_NAMES.contains(&name) => format!("customUI/{name}"),
        Some(name) => {
            return Err(PackageError::InvalidRibbonTarget {
                target: name.to_string(),
            })
        }
        None => find_ribbon_part(container)?
            .unwrap_or_else(|| RIBBON_PART_CANDIDATES[0].to_string()),
    };

    let output = out_container.unwrap_or(container);
    replace_part(container, &part, &bytes, output)?;
    Ok(output.to_path_buf())
}
