//! Inventory report writing

use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::path::Path;

use crate::core::fingerprint::FileFingerprint;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write a plain-text inventory report
///
/// # Arguments
/// * `out` - Destination for the report
/// * `root` - Directory that was scanned
/// * `fingerprints` - Scan results
pub fn write_report<W: Write>(
    out: &mut W,
    root: &Path,
    fingerprints: &[FileFingerprint],
) -> Result<()> {
    writeln!(out, "Image Inventory Report")?;
    writeln!(out, "======================")?;
    writeln!(out, "Generated: {}", Local::now().format(TIME_FORMAT))?;
    writeln!(out, "Root: {}", root.display())?;
    writeln!(out)?;

    writeln!(out, "Summary:")?;
    writeln!(out, "--------")?;
    writeln!(out, "  Total files: {}", fingerprints.len())?;
    writeln!(out)?;

    if fingerprints.is_empty() {
        writeln!(out, "No files found.")?;
        return Ok(());
    }

    writeln!(out, "Files:")?;
    writeln!(out, "------")?;
    for fp in fingerprints {
        writeln!(
            out,
            "  {}  {}  {}",
            fp.hash(),
            fp.created().format(TIME_FORMAT),
            fp.path().display()
        )?;
    }

    Ok(())
}

/// Write fingerprints as a pretty-printed JSON array
pub fn write_json_report<W: Write>(out: &mut W, fingerprints: &[FileFingerprint]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, fingerprints)?;
    writeln!(out)?;
    Ok(())
}
