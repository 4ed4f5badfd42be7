//! Self-update pipeline for distributed binaries
//!
//! Provides:
//! - Version checking against a published platform manifest
//! - Streaming archive download with progress tracking
//! - SHA-256 checksum verification
//! - Gzip+tar extraction
//! - Atomic executable replacement with permission preservation
//! - Cancellable background check and install tasks

pub mod checksum;
pub mod download;
pub mod error;
pub mod extract;
pub mod install;
pub mod manifest;
pub mod resolver;
pub mod updater;
pub mod urls;

pub use download::UpdateDownloader;
pub use error::{Result, UpdateError};
pub use manifest::VersionManifest;
pub use resolver::VersionResolver;
pub use updater::{AutoUpdater, UpdateOptions, UpdateTask};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
