//! Version manifest published alongside each release archive

use std::fmt;

use semver::Version;
use serde::Deserialize;

use crate::error::{Result, UpdateError};

/// Length of a hex-encoded SHA-256 digest
const CHECKSUM_HEX_LEN: usize = 64;

/// Published description of one downloadable build.
///
/// Deserialized from `version_{os}_{arch}.json`. Every field defaults to its
/// zero value so a document with missing keys still parses; such a manifest
/// is rejected by [`is_valid`](Self::is_valid) rather than by serde.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionManifest {
    /// Version of the published build (semver, optional leading `v`)
    pub version: String,
    /// Lowercase hex SHA-256 digest of the archive
    pub checksum: String,
    /// Archive URL path relative to the distribution base URL
    pub path: String,
    /// Publication timestamp, informational only
    pub datetime: String,
    /// Archive size in bytes
    pub size: u64,
    /// Archive-relative path of the executable to install.
    /// When absent the first extracted file is installed.
    pub binary: Option<String>,
}

impl VersionManifest {
    /// Parse the manifest version as semver, tolerating a leading `v`
    pub fn semver(&self) -> Result<Version> {
        let cleaned = self.version.trim_start_matches('v');
        Version::parse(cleaned)
            .map_err(|e| UpdateError::parse(format!("invalid version '{}': {}", self.version, e)))
    }

    /// Whether this manifest describes an installable build.
    ///
    /// Requires a parseable version, a 64-char checksum, a non-empty archive
    /// path and datetime, and a positive size.
    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.checksum.len() == CHECKSUM_HEX_LEN
            && !self.path.is_empty()
            && !self.datetime.is_empty()
            && self.size > 0
            && self.semver().is_ok()
    }
}

impl fmt::Display for VersionManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version {} ({} bytes, published {})",
            self.version, self.size, self.datetime
        )
    }
}
