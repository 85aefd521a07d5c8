//! Image Inventory Library
//!
//! Walks a directory tree, fingerprints every file with an MD5 content hash
//! and copies fingerprinted files into a target folder without overwriting.

pub mod core;
pub mod scanner;
pub mod reporting;

pub use crate::core::{copier, error, fingerprint};
pub use scanner::file_scanner;
pub use reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::copier::copy_to;
    pub use crate::core::error::InventoryError;
    pub use crate::core::fingerprint::FileFingerprint;
    pub use crate::scanner::file_scanner::{fingerprint_file, scan_directory, scan_directory_with};
    pub use crate::scanner::hasher::compute_file_hash;
    pub use crate::reporting::report_writer::{write_json_report, write_report};
}
