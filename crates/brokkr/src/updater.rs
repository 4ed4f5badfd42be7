//! Update orchestration
//!
//! `AutoUpdater` runs the pipeline end to end: resolve the published
//! manifest, then download, verify, extract, and install strictly in that
//! order. Each operation also has a spawned variant returning an
//! [`UpdateTask`] handle that can be cancelled cooperatively.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::ProgressBar;
use semver::Version;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::checksum;
use crate::download::UpdateDownloader;
use crate::error::{Result, UpdateError};
use crate::extract;
use crate::install;
use crate::manifest::VersionManifest;
use crate::resolver::VersionResolver;

/// Default User-Agent for manifest and archive requests
pub const DEFAULT_USER_AGENT: &str = concat!("brokkr/", env!("CARGO_PKG_VERSION"));

/// Default whole-request timeout for HTTP calls
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Caller-supplied configuration for the update pipeline
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Distribution base URL; manifests and archives live under it
    pub base_url: String,

    /// Version the caller is currently running
    pub current_version: String,

    /// Executable to replace on install
    pub target_path: PathBuf,

    /// User-Agent header for all requests
    pub user_agent: String,

    /// Whole-request timeout for HTTP calls
    pub download_timeout: Duration,
}

impl UpdateOptions {
    /// Create options with default user agent and timeout
    pub fn new(
        base_url: impl Into<String>,
        current_version: impl Into<String>,
        target_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            current_version: current_version.into(),
            target_path: target_path.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the HTTP timeout
    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }
}

/// Handle to one spawned background operation.
///
/// Delivers exactly one terminal result through [`join`](Self::join).
pub struct UpdateTask<T> {
    handle: JoinHandle<Result<T>>,
    cancel: CancellationToken,
}

impl<T> UpdateTask<T> {
    /// Request cooperative cancellation.
    ///
    /// The task resolves to [`UpdateError::Cancelled`] at its next
    /// suspension point or stage boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the task's terminal result
    pub async fn join(self) -> Result<T> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(UpdateError::task(format!(
                "background update task failed: {e}"
            ))),
        }
    }
}

/// Orchestrates the self-update pipeline
#[derive(Clone)]
pub struct AutoUpdater {
    /// Pipeline configuration
    options: UpdateOptions,

    /// HTTP client shared by resolver and downloader
    client: reqwest::Client,
}

impl AutoUpdater {
    /// Create an updater with a configured HTTP client
    pub fn new(options: UpdateOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&options.user_agent)
            .timeout(options.download_timeout)
            .build()?;
        Ok(Self { options, client })
    }

    /// Get the pipeline configuration
    pub fn options(&self) -> &UpdateOptions {
        &self.options
    }

    /// Check whether a newer build is published for this platform.
    ///
    /// Returns `Ok(Some(manifest))` when the remote version is strictly
    /// greater than the configured current version, `Ok(None)` otherwise.
    pub async fn check_for_update(&self) -> Result<Option<VersionManifest>> {
        let cleaned = self.options.current_version.trim_start_matches('v');
        let current = Version::parse(cleaned).map_err(|e| {
            UpdateError::parse(format!(
                "invalid current version '{}': {}",
                self.options.current_version, e
            ))
        })?;

        let resolver = VersionResolver::new(self.client.clone(), &self.options.base_url);
        resolver.resolve(&current).await
    }

    /// Download, verify, extract, and install the build a manifest describes.
    ///
    /// The manifest is validated before any network traffic. The progress
    /// bar, if supplied, is finished on every exit path.
    pub async fn install_update(
        &self,
        manifest: &VersionManifest,
        progress: Option<ProgressBar>,
    ) -> Result<()> {
        let cancel = CancellationToken::new();
        self.install_with_cancel(manifest, progress, &cancel).await
    }

    /// Spawn a background version check
    pub fn spawn_check(&self) -> UpdateTask<Option<VersionManifest>> {
        let updater = self.clone();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => Err(UpdateError::Cancelled),
                result = updater.check_for_update() => result,
            }
        });
        UpdateTask { handle, cancel }
    }

    /// Spawn a background install of the given manifest
    pub fn spawn_install(
        &self,
        manifest: VersionManifest,
        progress: Option<ProgressBar>,
    ) -> UpdateTask<()> {
        let updater = self.clone();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            updater
                .install_with_cancel(&manifest, progress, &task_cancel)
                .await
        });
        UpdateTask { handle, cancel }
    }

    async fn install_with_cancel(
        &self,
        manifest: &VersionManifest,
        progress: Option<ProgressBar>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        // Gate before any network traffic
        if !manifest.is_valid() {
            return Err(UpdateError::InvalidManifest);
        }

        let result = self
            .install_pipeline(manifest, progress.as_ref(), cancel)
            .await;

        if let Some(pb) = &progress {
            pb.finish();
        }

        result
    }

    async fn install_pipeline(
        &self,
        manifest: &VersionManifest,
        progress: Option<&ProgressBar>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        info!("[1/4] downloading update {}", manifest);
        let downloader = UpdateDownloader::new(self.client.clone())?;
        let archive = downloader
            .download(&self.options.base_url, manifest, progress, cancel)
            .await?;

        ensure_not_cancelled(cancel)?;
        info!("[2/4] verifying checksum");
        checksum::verify_checksum(&archive, &manifest.checksum)?;

        ensure_not_cancelled(cancel)?;
        info!("[3/4] extracting update");
        let extract_dir = downloader.temp_dir().join(&manifest.checksum);
        let files = extract::extract_archive(&archive, &extract_dir)?;
        let payload = select_payload(manifest, &extract_dir, &files)?;

        ensure_not_cancelled(cancel)?;
        info!(
            "[4/4] writing update to {}",
            self.options.target_path.display()
        );
        install::install_binary(&payload, &self.options.target_path)?;

        Ok(())
    }
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(UpdateError::Cancelled);
    }
    Ok(())
}

/// Pick the extracted file to install.
///
/// A manifest naming its binary wins; otherwise the first extracted file is
/// taken. Either way the path must exist as a regular file.
fn select_payload(
    manifest: &VersionManifest,
    extract_dir: &Path,
    files: &[PathBuf],
) -> Result<PathBuf> {
    let chosen = match &manifest.binary {
        Some(name) => extract_dir.join(name),
        None => files
            .first()
            .cloned()
            .ok_or_else(|| UpdateError::archive("no files extracted"))?,
    };

    if !chosen.is_file() {
        return Err(UpdateError::missing_file(chosen));
    }

    Ok(chosen)
}
