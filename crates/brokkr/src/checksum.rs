//! Streaming SHA-256 verification of downloaded archives

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Read buffer for digest computation
const CHECKSUM_CHUNK_SIZE: usize = 1024 * 1024;

/// Compute the SHA-256 digest of a file as lowercase hex
pub fn compute_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify a file against its declared digest.
///
/// Comparison is exact: manifests carry lowercase hex, and so does
/// [`compute_checksum`].
pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let actual = compute_checksum(path)?;
    debug!(expected, actual, "comparing archive checksum");

    if actual != expected {
        return Err(UpdateError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}
