//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They identify
//! both blobs and commits in the content store.
//!
//! ## Storage
//!
//! Objects are stored in `.vcs/<collection>/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Object identifier
///
/// Always holds a validated, lowercase, 40-character hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case digits are accepted and normalized to lower case.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("Invalid object ID length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid object ID characters: {}", id);
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Digest of the exact given bytes
    pub fn hash(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OBJECT_ID_LENGTH].to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
