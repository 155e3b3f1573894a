//! BLAKE3 hashing utilities for comparing vendored trees

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::common::fs::ExcludeSet;
use crate::error::{Result, SyncError};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 hash of a directory tree's contents.
///
/// Entries are visited sorted by path. Each entry contributes its relative
/// path, its kind and a fixed-width record of its content: the BLAKE3 digest
/// of a file, or the length-prefixed target of a symlink. No file content
/// can therefore imitate the framing of another entry, and two trees hash
/// equal only when they are byte-for-byte identical (excluded entries aside).
pub fn hash_directory(path: &Path, exclude: &ExcludeSet) -> Result<String> {
    if !path.is_dir() {
        return Err(SyncError::SourceMissing {
            path: path.display().to_string(),
        });
    }

    let mut hasher = Hasher::new();

    for item in exclude.walk(path) {
        let (relative, entry) = item?;
        let file_type = entry.file_type();

        let relative = relative.to_string_lossy().replace('\\', "/");
        hasher.update(relative.as_bytes());
        hasher.update(b"\0");

        if file_type.is_dir() {
            hasher.update(b"d");
        } else if file_type.is_symlink() {
            let target = fs::read_link(entry.path()).map_err(|e| read_failed(entry.path(), &e))?;
            let target = target.to_string_lossy();
            hasher.update(b"l");
            hasher.update(&(target.len() as u64).to_le_bytes());
            hasher.update(target.as_bytes());
        } else {
            hasher.update(b"f");
            hasher.update(hash_file(entry.path())?.as_bytes());
        }
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// BLAKE3 digest of a single file's contents
fn hash_file(path: &Path) -> Result<blake3::Hash> {
    let mut hasher = Hasher::new();
    let file = File::open(path).map_err(|e| read_failed(path, &e))?;
    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| read_failed(path, &e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

fn read_failed(path: &Path, err: &std::io::Error) -> SyncError {
    SyncError::IoError {
        message: format!("Failed to read {}: {}", path.display(), err),
    }
}
