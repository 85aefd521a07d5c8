//! Directory walking and per-file fingerprinting

use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::hasher::hash_reader;
use crate::core::error::{InventoryError, Result};
use crate::core::fingerprint::FileFingerprint;

/// Fingerprint a single regular file
///
/// The file is opened once; its modification time and content hash both come
/// from that handle.
///
/// # Errors
/// `NotFound` if `path` is not an existing regular file, `Io` if it cannot be
/// read.
pub fn fingerprint_file(path: &Path) -> Result<FileFingerprint> {
    if !path.is_file() {
        return Err(InventoryError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
    let modified = file
        .metadata()
        .and_then(|m| m.modified())
        .map_err(|e| InventoryError::io(path, e))?;
    let hash = hash_reader(&mut file).map_err(|e| InventoryError::io(path, e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let fingerprint = FileFingerprint::new(
        DateTime::<Local>::from(modified),
        name,
        path.to_path_buf(),
        hash,
    );
    debug!(path = %path.display(), hash = fingerprint.hash(), "fingerprinted file");
    Ok(fingerprint)
}

/// Fingerprint every regular file under a directory
///
/// # Arguments
/// * `root` - Directory to scan, recursively
///
/// # Returns
/// One fingerprint per regular file. The first error aborts the whole scan
/// and no partial result is returned.
pub fn scan_directory(root: &Path) -> Result<Vec<FileFingerprint>> {
    scan_directory_with(root, |_| {})
}

/// Same as [`scan_directory`], calling `on_file` as each fingerprint is made
///
/// Within a directory, files are visited before subdirectories, each group in
/// file-name order. Symbolic links are followed; a link cycle is reported as
/// an error and aborts the scan like any other failure.
pub fn scan_directory_with<F>(root: &Path, mut on_file: F) -> Result<Vec<FileFingerprint>>
where
    F: FnMut(&FileFingerprint),
{
    let metadata = fs::metadata(root).map_err(|e| map_io_error(root, e))?;
    if !metadata.is_dir() {
        return Err(InventoryError::io(root, io::Error::other("not a directory")));
    }

    let mut fingerprints = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by(files_first) {
        let entry = entry.map_err(|e| map_walk_error(root, e))?;
        if entry.file_type().is_file() {
            let fingerprint = fingerprint_file(entry.path())?;
            on_file(&fingerprint);
            fingerprints.push(fingerprint);
        }
    }

    info!(root = %root.display(), files = fingerprints.len(), "scan complete");
    Ok(fingerprints)
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn map_io_error(path: &Path, err: io::Error) -> InventoryError {
    if err.kind() == io::ErrorKind::NotFound {
        InventoryError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        InventoryError::io(path, err)
    }
}

fn map_walk_error(root: &Path, err: walkdir::Error) -> InventoryError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(source) => map_io_error(&path, source),
        None => InventoryError::Io {
            path,
            source: io::Error::other("filesystem loop detected"),
        },
    }
}
