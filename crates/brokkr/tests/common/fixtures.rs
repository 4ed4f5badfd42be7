//! Archive and digest fixtures
//!
//! Synthesizes gzip-compressed tarballs in memory so extraction and
//! end-to-end tests can serve realistic update payloads.

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use tar::{EntryType, Header};

/// One entry of a synthesized archive, in stream order
pub enum TarEntry<'a> {
    /// Directory entry
    Dir { name: &'a str },
    /// Regular file entry with an explicit mode
    File {
        name: &'a str,
        content: &'a [u8],
        mode: u32,
    },
}

/// Build a gzip+tar archive from the given entries
pub fn build_archive(entries: &[TarEntry]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in entries {
        match entry {
            TarEntry::Dir { name } => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap();
            }
            TarEntry::File {
                name,
                content,
                mode,
            } => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Regular);
                header.set_size(content.len() as u64);
                header.set_mode(*mode);
                header.set_cksum();
                builder.append_data(&mut header, name, *content).unwrap();
            }
        }
    }

    let encoder = builder.into_inner().unwrap();
    encoder.finish().unwrap()
}

/// Build an archive holding a single executable file
pub fn single_file_archive(name: &str, content: &[u8]) -> Vec<u8> {
    build_archive(&[TarEntry::File {
        name,
        content,
        mode: 0o755,
    }])
}

/// Lowercase hex SHA-256 of a byte slice
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
