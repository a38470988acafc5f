//! Content digests for staged files.
//!
//! Maven repositories expect an MD5 and a SHA-1 side-file next to every
//! uploaded object. Both are computed over raw bytes, never over decoded text.

use md5::Md5;
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::Path;

/// The pair of hex digests published next to every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    /// 128-bit MD5, lowercase hex.
    pub md5: String,
    /// 160-bit SHA-1, lowercase hex.
    pub sha1: String,
}

impl Digests {
    /// Compute both digests of a byte slice.
    pub fn of(data: &[u8]) -> Self {
        Self {
            md5: md5_bytes(data),
            sha1: sha1_bytes(data),
        }
    }

    /// Compute both digests of a file in a single streaming pass.
    pub fn of_file(path: &Path) -> std::io::Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut md5 = Md5::new();
        let mut sha1 = Sha1::new();
        let mut buffer = [0u8; 8192];
        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            md5.update(&buffer[..n]);
            sha1.update(&buffer[..n]);
        }
        Ok(Self {
            md5: format!("{:x}", md5.finalize()),
            sha1: format!("{:x}", sha1.finalize()),
        })
    }
}

/// Compute the MD5 hash of a byte slice, returning a lowercase hex string.
pub fn md5_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-1 hash of a byte slice, returning a lowercase hex string.
pub fn sha1_bytes(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
