//! Error type shared by the scanner and the copier

use std::io;
use std::path::{Path, PathBuf};

/// Failures raised while fingerprinting or copying files.
///
/// Nothing in the library recovers from these: the operation that hit one
/// stops and hands it back unchanged.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// A referenced path did not exist when it was accessed.
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The filesystem refused a read or write.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The copy destination is already occupied.
    #[error("destination already exists: {}", path.display())]
    Collision { path: PathBuf },
}

impl InventoryError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        InventoryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            InventoryError::NotFound { path }
            | InventoryError::Io { path, .. }
            | InventoryError::Collision { path } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
