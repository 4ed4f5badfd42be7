//! Archive download with progress tracking
//!
//! Streams the published archive into a per-downloader temporary directory,
//! feeding an optional progress bar and enforcing the manifest's declared
//! size. The temporary directory is removed when the downloader is dropped.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::ProgressBar;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{Result, UpdateError};
use crate::manifest::VersionManifest;
use crate::urls;

/// Fallback file name when the manifest path has no final component
const DEFAULT_ARCHIVE_NAME: &str = "update.tar.gz";

/// Downloads update archives into an owned temporary directory
pub struct UpdateDownloader {
    /// HTTP client
    client: reqwest::Client,

    /// Temporary directory for downloads
    temp_dir: TempDir,
}

impl UpdateDownloader {
    /// Create a downloader with its own scratch directory
    pub fn new(client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            client,
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the temporary directory path
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Download the archive a manifest describes.
    ///
    /// The bar, if supplied, has its length set to the declared size before
    /// the first byte arrives and is incremented per chunk. After EOF the
    /// byte count must equal `manifest.size` exactly. Both the request send
    /// and every chunk read are raced against the cancellation token.
    pub async fn download(
        &self,
        base_url: &str,
        manifest: &VersionManifest,
        progress: Option<&ProgressBar>,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        let archive_url = urls::join_url(base_url, &manifest.path)?;
        info!(
            "Downloading {} ({})",
            archive_url,
            human_readable_size(manifest.size)
        );

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(UpdateError::Cancelled),
            result = self.client.get(&archive_url).send() => result?,
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(UpdateError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        if let Some(pb) = progress {
            pb.set_length(manifest.size);
        }

        let file_name = Path::new(&manifest.path)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));
        let file_path = self.temp_dir.path().join(file_name);
        let mut file = File::create(&file_path)?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Err(UpdateError::Cancelled),
                chunk = stream.next() => chunk,
            };
            let Some(chunk_result) = next else {
                break;
            };
            let chunk: bytes::Bytes = chunk_result?;
            file.write_all(&chunk)?;

            downloaded += chunk.len() as u64;

            if let Some(pb) = progress {
                pb.inc(chunk.len() as u64);
            }
        }

        if downloaded != manifest.size {
            return Err(UpdateError::SizeMismatch {
                expected: manifest.size,
                actual: downloaded,
            });
        }

        Ok(file_path)
    }
}

/// Convert bytes to human-readable size
fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
