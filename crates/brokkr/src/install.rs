//! Atomic replacement of the installed executable

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Replace `dest` with the contents of `src`.
///
/// The new payload is staged into a temp file next to the destination (same
/// volume, so the final rename is atomic), given the destination's current
/// permission bits, and renamed over it. The destination must already exist.
///
/// An exclusive advisory lock on `{dest}.lock` serializes concurrent installs
/// to the same destination.
pub fn install_binary(src: &Path, dest: &Path) -> Result<()> {
    let _lock = InstallLock::acquire(dest)?;

    let metadata = fs::metadata(dest)?;
    let parent = dest.parent().ok_or_else(|| {
        UpdateError::Filesystem(io::Error::new(
            io::ErrorKind::InvalidInput,
            "destination has no parent directory",
        ))
    })?;

    let mut staged = NamedTempFile::new_in(parent)?;
    let mut payload = File::open(src)?;
    io::copy(&mut payload, staged.as_file_mut())?;

    fs::set_permissions(staged.path(), metadata.permissions())?;

    debug!(dest = %dest.display(), "renaming staged update over destination");
    staged
        .persist(dest)
        .map_err(|e| UpdateError::Filesystem(e.error))?;

    Ok(())
}

/// Exclusive advisory lock scoped to one install destination.
///
/// The lock file sits next to the destination and is left in place after the
/// install; only the lock itself is released on drop.
struct InstallLock {
    file: File,
    path: PathBuf,
}

impl InstallLock {
    fn acquire(dest: &Path) -> Result<Self> {
        let mut name = dest.as_os_str().to_os_string();
        name.push(".lock");
        let path = PathBuf::from(name);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        debug!(lock = %path.display(), "acquired install lock");
        Ok(Self { file, path })
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(lock = %self.path.display(), error = %e, "failed to release install lock");
        }
    }
}
