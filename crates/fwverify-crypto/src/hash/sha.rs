//! SHA-1, SHA-2 and SHA-3 digests
//!
//! Every digest the verifier accepts in a digest expectation or a claimed
//! method is enumerated here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_384, Sha3_512};

use crate::error::{Error, Result};

// ============================================================================
// Hash Algorithm Selection
// ============================================================================

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    /// SHA-1 (20-byte output), accepted for legacy digest lists only
    Sha1,
    /// SHA-224 (28-byte output)
    Sha224,
    /// SHA-256 (32-byte output)
    #[default]
    Sha256,
    /// SHA-384 (48-byte output)
    Sha384,
    /// SHA-512 (64-byte output)
    Sha512,
    /// SHA3-256 (32-byte output)
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// SHA3-384 (48-byte output)
    #[serde(rename = "sha3-384")]
    Sha3_384,
    /// SHA3-512 (64-byte output)
    #[serde(rename = "sha3-512")]
    Sha3_512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 8] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
    ];

    /// Resolve a user supplied algorithm name
    ///
    /// Matching ignores case, `-`, `_` and whitespace, so `SHA-256`,
    /// `sha256` and `Sha_256` all resolve to [`HashAlgorithm::Sha256`].
    ///
    /// # Returns
    /// `None` when the name is not a supported digest
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_name(name);
        Self::ALL
            .into_iter()
            .find(|algorithm| normalize_name(algorithm.name()) == normalized)
    }

    /// Canonical lowercase name, also the `openssl dgst` flag without the dash
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
        }
    }

    /// Digest length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Lowercase and drop separators: `SHA3-256` and `sha3_256` compare equal
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Generic Hash Functions
// ============================================================================

/// Compute hash of data using specified algorithm
///
/// # Arguments
/// * `data` - Data to hash, hashed as an exact byte stream
/// * `algorithm` - Hash algorithm to use
///
/// # Returns
/// Digest bytes, `algorithm.output_len()` long
///
/// # Example
/// ```
/// use fwverify_crypto::hash::{hash, HashAlgorithm};
///
/// let digest = hash(b"hello", HashAlgorithm::Sha384);
/// assert_eq!(digest.len(), 48);
/// ```
pub fn hash(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        HashAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        HashAlgorithm::Sha3_384 => Sha3_384::digest(data).to_vec(),
        HashAlgorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
    }
}

/// Compute hash and return as lowercase hex string
pub fn hash_hex(data: &[u8], algorithm: HashAlgorithm) -> String {
    hex::encode(hash(data, algorithm))
}
