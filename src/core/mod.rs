//! Fingerprint record, error type and file copier

pub mod copier;
pub mod error;
pub mod fingerprint;

pub use copier::copy_to;
pub use error::InventoryError;
pub use fingerprint::FileFingerprint;
