//! Builder pattern for test manifest construction
//!
//! Provides a fluent API for constructing VersionManifest values with
//! sensible defaults for testing.

use brokkr::VersionManifest;

use super::constants::*;

/// Builder for constructing VersionManifest values with test defaults
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    version: String,
    checksum: String,
    path: String,
    datetime: String,
    size: u64,
    binary: Option<String>,
}

impl ManifestBuilder {
    /// Create a builder describing a valid 2.0.0 release
    pub fn new() -> Self {
        Self {
            version: VERSION_2_0_0.to_string(),
            checksum: "a".repeat(64),
            path: ARCHIVE_PATH.to_string(),
            datetime: TEST_DATETIME.to_string(),
            size: 1024,
            binary: None,
        }
    }

    /// Set the version
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set the checksum
    pub fn checksum(mut self, checksum: &str) -> Self {
        self.checksum = checksum.to_string();
        self
    }

    /// Set the archive path
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Set the publication datetime
    pub fn datetime(mut self, datetime: &str) -> Self {
        self.datetime = datetime.to_string();
        self
    }

    /// Set the declared archive size
    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set size and checksum from archive bytes
    pub fn for_archive(mut self, archive: &[u8]) -> Self {
        self.size = archive.len() as u64;
        self.checksum = super::fixtures::sha256_hex(archive);
        self
    }

    /// Name the archive entry to install
    pub fn binary(mut self, binary: &str) -> Self {
        self.binary = Some(binary.to_string());
        self
    }

    /// Build the VersionManifest
    pub fn build(self) -> VersionManifest {
        VersionManifest {
            version: self.version,
            checksum: self.checksum,
            path: self.path,
            datetime: self.datetime,
            size: self.size,
            binary: self.binary,
        }
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
