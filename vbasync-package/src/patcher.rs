//! Single-part surgery on zip-based document containers.
//!
//! The container also holds payload this tool must never disturb (the macro
//! project stream among it), so a part is never patched in place: the whole
//! archive is rebuilt entry by entry, every non-target entry raw-copied with
//! its original compression and metadata, and an in-place replacement only
//! reaches the original path through a validated temporary file and an
//! atomic rename.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{io_err, PackageError};

/// Read one named part out of `container`, decompressed.
pub fn extract_part(container: &Path, part: &str) -> Result<Vec<u8>, PackageError> {
    let file = File::open(container).map_err(|e| io_err(container, e))?;
    let mut archive = open_archive(file, container)?;

    let mut entry = archive.by_name(part).map_err(|e| match e {
        ZipError::FileNotFound => PackageError::PartNotFound {
            part: part.to_string(),
        },
        ZipError::Io(io) => io_err(container, io),
        other => malformed(container, other.to_string()),
    })?;

    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .map_err(|e| io_err(container, e))?;
    Ok(buf)
}

/// Entry names of `container`, in original archive order.
pub fn list_parts(container: &Path) -> Result<Vec<String>, PackageError> {
    let file = File::open(container).map_err(|e| io_err(container, e))?;
    let mut archive = open_archive(file, container)?;

    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| malformed(container, e.to_string()))?;
        names.push(entry.name().to_string());
    }
    Ok(names)
}

/// Rewrite `container` into `output` with `part` replaced by `new_bytes`.
///
/// Every other entry is copied raw, in its original order, with its original
/// compression. A `part` absent from the source is appended as a new entry.
/// `output` may equal `container`: the rewrite goes through a sibling
/// temporary file that must pass [`validate_archive`] before it renames over
/// the original, so an interrupted run never leaves a truncated container.
pub fn replace_part(
    container: &Path,
    part: &str,
    new_bytes: &[u8],
    output: &Path,
) -> Result<(), PackageError> {
    let source = File::open(container).map_err(|e| io_err(container, e))?;
    let mut archive = open_archive(source, container)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let tmp = PathBuf::from(format!("{}.vbasync.tmp", output.display()));
    let entry_count = write_patched(&mut archive, part, new_bytes, &tmp, container)?;

    if let Err(reason) = validate_archive(&tmp, part, entry_count) {
        let _ = std::fs::remove_file(&tmp);
        return Err(PackageError::ValidationFailed {
            path: output.to_path_buf(),
            reason,
        });
    }

    if let Err(e) = std::fs::rename(&tmp, output) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(output, e));
    }

    tracing::info!("patched '{part}' into {}", output.display());
    Ok(())
}

/// Stream the patched archive to `tmp`; returns the entry count written.
/// The half-written temporary is removed on failure.
fn write_patched(
    archive: &mut ZipArchive<File>,
    part: &str,
    new_bytes: &[u8],
    tmp: &Path,
    container: &Path,
) -> Result<usize, PackageError> {
    let out = File::create(tmp).map_err(|e| io_err(tmp, e))?;
    let result = stream_entries(archive, part, new_bytes, out, tmp, container);
    if result.is_err() {
        let _ = std::fs::remove_file(tmp);
    }
    result
}

fn stream_entries(
    archive: &mut ZipArchive<File>,
    part: &str,
    new_bytes: &[u8],
    out: File,
    tmp: &Path,
    container: &Path,
) -> Result<usize, PackageError> {
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut replaced = false;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| malformed(container, e.to_string()))?;
        if !replaced && canonical(entry.name()) == canonical(part) {
            // Rewrite the target at its original position.
            drop(entry);
            writer
                .start_file(part, options)
                .map_err(|e| malformed(container, e.to_string()))?;
            writer.write_all(new_bytes).map_err(|e| io_err(tmp, e))?;
            replaced = true;
        } else {
            writer
                .raw_copy_file(entry)
                .map_err(|e| malformed(container, e.to_string()))?;
        }
    }

    if !replaced {
        tracing::debug!("'{part}' absent from source container, appending");
        writer
            .start_file(part, options)
            .map_err(|e| malformed(container, e.to_string()))?;
        writer.write_all(new_bytes).map_err(|e| io_err(tmp, e))?;
    }

    writer.finish().map_err(|e| match e {
        ZipError::Io(io) => io_err(tmp, io),
        other => malformed(container, other.to_string()),
    })?;
    Ok(archive.len() + usize::from(!replaced))
}

/// Structural check on the freshly written archive before it may replace
/// anything: re-openable, expected entry count, target part decompresses to
/// the bytes just written.
fn validate_archive(path: &Path, part: &str, expected_entries: usize) -> Result<(), String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut archive = ZipArchive::new(file).map_err(|e| e.to_string())?;
    if archive.len() != expected_entries {
        return Err(format!(
            "entry count {} does not match expected {expected_entries}",
            archive.len()
        ));
    }
    let mut entry = archive
        .by_name(part)
        .map_err(|e| format!("target part unreadable: {e}"))?;
    let mut buf = Vec::new();
    entry
        .read_to_end(&mut buf)
        .map_err(|e| format!("target part does not decompress: {e}"))?;
    Ok(())
}

fn open_archive(file: File, container: &Path) -> Result<ZipArchive<File>, PackageError> {
    ZipArchive::new(file).map_err(|e| match e {
        ZipError::Io(io) => io_err(container, io),
        other => malformed(container, other.to_string()),
    })
}

fn malformed(container: &Path, reason: String) -> PackageError {
    PackageError::MalformedContainer {
        path: container.to_path_buf(),
        reason,
    }
}

/// Entry paths occasionally carry a leading slash; compare without it.
fn canonical(name: &str) -> &str {
    name.trim_start_matches('/')
}
