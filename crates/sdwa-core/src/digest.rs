//! # Content Digest
//!
//! SHA-256 over the compact JSON serialization of a value. Every map in
//! the report types is a `BTreeMap` and every list is in a defined order,
//! so equal values always serialize to equal bytes and therefore to equal
//! digests. Two runs over the same inputs can be compared by digest alone.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::SdwaError;

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    bytes: [u8; 32],
}

impl ContentDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hash raw bytes.
pub fn sha256_bytes(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::from_bytes(bytes)
}

/// Digest the compact JSON form of `value`.
///
/// # Errors
///
/// Returns [`SdwaError::Serialization`] if `value` cannot be serialized
/// (e.g. a map with non-string keys).
pub fn content_digest<T: Serialize + ?Sized>(value: &T) -> Result<ContentDigest, SdwaError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(sha256_bytes(&bytes))
}
