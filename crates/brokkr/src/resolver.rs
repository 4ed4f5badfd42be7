//! Remote version resolution
//!
//! Fetches the platform-specific version manifest from the distribution base
//! URL and decides whether the published build is newer than the running one.

use semver::Version;
use tracing::{debug, info};

use crate::error::{Result, UpdateError};
use crate::manifest::VersionManifest;
use crate::urls;

/// Resolves the published manifest for one platform
pub struct VersionResolver {
    /// HTTP client
    client: reqwest::Client,

    /// Distribution base URL
    base_url: String,
}

impl VersionResolver {
    /// Create a resolver for a distribution base URL
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Check for an update targeting the running platform
    pub async fn resolve(&self, current: &Version) -> Result<Option<VersionManifest>> {
        self.resolve_for(current, std::env::consts::OS, std::env::consts::ARCH)
            .await
    }

    /// Check for an update targeting an explicit platform.
    ///
    /// Fetches `{base}/version_{os}_{arch}.json` in a single round trip and
    /// returns the manifest only when its version is strictly greater than
    /// `current`.
    pub async fn resolve_for(
        &self,
        current: &Version,
        os: &str,
        arch: &str,
    ) -> Result<Option<VersionManifest>> {
        let manifest_url = urls::join_url(&self.base_url, &format!("version_{os}_{arch}.json"))?;
        debug!("Fetching version manifest from: {}", manifest_url);

        let response = self.client.get(&manifest_url).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(UpdateError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        let body = response.text().await?;
        let manifest: VersionManifest = serde_json::from_str(&body)
            .map_err(|e| UpdateError::parse(format!("malformed version manifest: {e}")))?;

        let remote = manifest.semver()?;

        if remote > *current {
            info!("Update available: {} -> {}", current, remote);
            Ok(Some(manifest))
        } else {
            debug!("Already on latest version: {}", current);
            Ok(None)
        }
    }
}
