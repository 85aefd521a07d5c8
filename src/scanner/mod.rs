//! Directory scanning and content hashing

pub mod file_scanner;
pub mod hasher;

pub use file_scanner::{fingerprint_file, scan_directory, scan_directory_with};
pub use hasher::compute_file_hash;
