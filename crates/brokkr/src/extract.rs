//! Gzip+tar extraction of update archives

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Prefix marking macOS resource-fork remnants (`._name` AppleDouble files)
const METADATA_PREFIX: &str = "._";

/// Fixed mode for directories created during extraction
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Extract a gzip-compressed tarball into `dest`, reproducing its structure.
///
/// Returns the extracted regular-file paths in archive stream order.
/// Entries whose file name starts with `._` are written to disk but left out
/// of the returned list. An archive yielding zero files is an error.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tar = Archive::new(decoder);

    let mut extracted = Vec::new();

    let entries = tar
        .entries()
        .map_err(|e| UpdateError::archive(format!("failed to read archive: {e}")))?;

    for entry_result in entries {
        let mut entry =
            entry_result.map_err(|e| UpdateError::archive(format!("corrupt archive entry: {e}")))?;
        let relative = entry
            .path()
            .map_err(|e| UpdateError::archive(format!("invalid entry path: {e}")))?
            .into_owned();
        let target = dest.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&target)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(&target, fs::Permissions::from_mode(DIR_MODE))?;
                }
            }
            EntryType::Regular => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&target)?;
                io::copy(&mut entry, &mut out)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let mode = entry.header().mode()?;
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode))?;
                }
                if is_platform_metadata(&relative) {
                    debug!(path = %relative.display(), "skipping platform metadata entry");
                } else {
                    extracted.push(target);
                }
            }
            other => {
                debug!(path = %relative.display(), ?other, "skipping unsupported entry type");
            }
        }
    }

    if extracted.is_empty() {
        return Err(UpdateError::archive("no files extracted"));
    }

    Ok(extracted)
}

/// Whether an entry's file name marks it as platform metadata.
///
/// The final path component is tested so `bin/._app` is excluded the same
/// way a top-level `._app` is.
fn is_platform_metadata(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(METADATA_PREFIX))
}
