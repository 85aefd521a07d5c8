//! Content hashing using MD5

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::core::error::{InventoryError, Result};

const BUFFER_SIZE: usize = 8192;

/// Compute the MD5 digest of a file
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// Lowercase hex-encoded digest, 32 characters, no separators
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| InventoryError::io(path, e))?;
    hash_reader(&mut file).map_err(|e| InventoryError::io(path, e))
}

/// Stream a reader to EOF through MD5
pub(crate) fn hash_reader<R: Read>(reader: &mut R) -> std::io::Result<String> {
    let mut hasher = Md5::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_compute_file_hash() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"hello").unwrap();

        let hash = compute_file_hash(temp_file.path()).unwrap();
        // MD5 of "hello"
        assert_eq!(hash, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_empty_file_hash() {
        let temp_file = NamedTempFile::new().unwrap();
        let hash = compute_file_hash(temp_file.path()).unwrap();
        assert_eq!(hash, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_content_larger_than_buffer() {
        // Forces several reads through the loop
        let data = b"The quick brown fox jumps over the lazy dog".repeat(1000);
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&data).unwrap();

        let expected = format!("{:x}", Md5::digest(&data));
        assert_eq!(compute_file_hash(temp_file.path()).unwrap(), expected);
    }

    /// Fails every other read with `Interrupted`
    struct FlakyReader<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for FlakyReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let mut reader = FlakyReader {
            data: b"hello",
            interrupt: false,
        };
        assert_eq!(
            hash_reader(&mut reader).unwrap(),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.jpg");

        match compute_file_hash(&missing) {
            Err(InventoryError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
