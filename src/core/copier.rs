//! Copying fingerprinted files into a destination folder

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::{InventoryError, Result};
use super::fingerprint::FileFingerprint;

/// Copy a fingerprinted file into `destination`, keeping its file name
///
/// Never overwrites: if `destination/name` already exists the copy fails with
/// `Collision` and the existing file is left alone. The destination directory
/// must already exist.
///
/// # Returns
/// Path of the newly created file
pub fn copy_to(fingerprint: &FileFingerprint, destination: &Path) -> Result<PathBuf> {
    let source_path = fingerprint.path();
    // Exact name bytes; `name()` is lossy
    let file_name = source_path.file_name().ok_or_else(|| InventoryError::NotFound {
        path: source_path.to_path_buf(),
    })?;
    let target = destination.join(file_name);

    let mut source = File::open(source_path).map_err(|e| InventoryError::io(source_path, e))?;
    let permissions = source
        .metadata()
        .map_err(|e| InventoryError::io(source_path, e))?
        .permissions();

    // create_new makes the existence check and the creation one step
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(InventoryError::Collision { path: target });
        }
        Err(e) => return Err(InventoryError::io(&target, e)),
    };

    let copied = io::copy(&mut source, &mut dest).and_then(|bytes| {
        dest.set_permissions(permissions)?;
        Ok(bytes)
    });

    match copied {
        Ok(bytes) => {
            debug!(from = %source_path.display(), to = %target.display(), bytes, "copied file");
            Ok(target)
        }
        Err(e) => {
            drop(dest);
            // Remove the truncated copy
            if let Err(cleanup) = fs::remove_file(&target) {
                warn!(path = %target.display(), error = %cleanup, "failed to remove partial copy");
            } else {
                warn!(path = %target.display(), "removed partial copy");
            }
            Err(InventoryError::io(&target, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::file_scanner::fingerprint_file;
    use tempfile::TempDir;

    #[test]
    fn test_copy_preserves_name_and_content() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        fs::write(&src, "hello").unwrap();

        let fp = fingerprint_file(&src).unwrap();
        let copied = copy_to(&fp, dest_dir.path()).unwrap();

        assert_eq!(copied, dest_dir.path().join("a.txt"));
        assert_eq!(fs::read(&copied).unwrap(), b"hello");
    }

    #[test]
    fn test_collision_leaves_existing_file() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        fs::write(&src, "new content").unwrap();
        let existing = dest_dir.path().join("a.txt");
        fs::write(&existing, "old content").unwrap();

        let fp = fingerprint_file(&src).unwrap();
        match copy_to(&fp, dest_dir.path()) {
            Err(InventoryError::Collision { path }) => assert_eq!(path, existing),
            other => panic!("expected Collision, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&existing).unwrap(), "old content");
    }

    #[test]
    fn test_missing_destination_dir_is_io_error() {
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        fs::write(&src, "hello").unwrap();
        let missing = src_dir.path().join("no_such_dir");

        let fp = fingerprint_file(&src).unwrap();
        assert!(matches!(
            copy_to(&fp, &missing),
            Err(InventoryError::Io { .. })
        ));
        assert!(!missing.exists());
    }

    #[test]
    fn test_source_removed_after_scan_is_io_error() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("gone.jpg");
        fs::write(&src, "bytes").unwrap();

        let fp = fingerprint_file(&src).unwrap();
        fs::remove_file(&src).unwrap();

        match copy_to(&fp, dest_dir.path()) {
            Err(InventoryError::Io { path, .. }) => assert_eq!(path, src),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(!dest_dir.path().join("gone.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let first = OsStr::from_bytes(b"IMG_\xff.jpg");
        let second = OsStr::from_bytes(b"IMG_\xfe.jpg");
        // Some filesystems reject names that are not valid UTF-8
        if fs::write(src_dir.path().join(first), "first").is_err() {
            return;
        }
        fs::write(src_dir.path().join(second), "second").unwrap();

        let fp_first = fingerprint_file(&src_dir.path().join(first)).unwrap();
        let fp_second = fingerprint_file(&src_dir.path().join(second)).unwrap();
        // Both display as the same lossy name
        assert_eq!(fp_first.name(), fp_second.name());

        let copied = copy_to(&fp_first, dest_dir.path()).unwrap();
        assert_eq!(copied, dest_dir.path().join(first));
        copy_to(&fp_second, dest_dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dest_dir.path().join(first)).unwrap(), "first");
        assert_eq!(fs::read_to_string(dest_dir.path().join(second)).unwrap(), "second");
    }
}
