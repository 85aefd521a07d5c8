//! Fingerprint record for a single scanned file

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot of one file taken at scan time.
///
/// The record is value data: it does not hold the file open and says nothing
/// about the file once it changes on disk. Only the scanner builds these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFingerprint {
    created: DateTime<Local>,
    name: String,
    path: PathBuf,
    hash: String,
}

impl FileFingerprint {
    pub(crate) fn new(created: DateTime<Local>, name: String, path: PathBuf, hash: String) -> Self {
        Self {
            created,
            name,
            path,
            hash,
        }
    }

    /// Last-modification time of the file when it was fingerprinted
    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    /// Base file name, without directory components
    ///
    /// Lossy for names that are not valid UTF-8; the exact name is the last
    /// component of [`path`](Self::path).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase hex MD5 digest of the content
    pub fn hash(&self) -> &str {
        &self.hash
    }
}
