//! Public key algorithm detection
//!
//! The detected family is authoritative: it comes from the key material and
//! never from the caller's claim.

use fwverify_crypto::{EdwardsCurve, KeyMetadata};
use thiserror::Error;
use tracing::{debug, warn};

use crate::algorithm::{EcCurve, SignFamily};
use crate::backend::CryptoBackend;

/// 密钥检测失败
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionError {
    /// The bytes are not a readable public key
    #[error("public key could not be parsed")]
    WrongPublicKey,
    /// A key, but not an RSA, EC or EdDSA one
    #[error("public key type is not supported")]
    UnsupportedKeyType,
}

/// Classify key markers: Edwards first, then EC, then the RSA modulus and
/// exponent pair
///
/// The RSA check is structural, so a key carrying EC markers next to a
/// modulus and exponent is still classified as EC.
pub fn classify(metadata: &KeyMetadata) -> Option<SignFamily> {
    if let Some(edwards) = metadata.edwards {
        return Some(match edwards {
            EdwardsCurve::Ed25519 => SignFamily::Ed25519,
            EdwardsCurve::Ed448 => SignFamily::Ed448,
        });
    }

    if metadata.ec_public_key {
        let curve = match metadata.curve.as_deref() {
            Some("prime256v1") => EcCurve::P256,
            Some("secp384r1") => EcCurve::P384,
            Some("secp521r1") => EcCurve::P521,
            _ => EcCurve::Other,
        };
        return Some(SignFamily::Ecdsa(curve));
    }

    if metadata.has_modulus && metadata.has_exponent {
        return Some(SignFamily::Rsa {
            bits: metadata.key_bits,
        });
    }

    None
}

/// Detects the sign family of a public key through a backend
pub struct KeyAlgorithmDetector<'a> {
    backend: &'a dyn CryptoBackend,
}

impl<'a> KeyAlgorithmDetector<'a> {
    pub fn new(backend: &'a dyn CryptoBackend) -> Self {
        Self { backend }
    }

    pub fn detect(&self, public_key: &[u8]) -> Result<SignFamily, DetectionError> {
        let metadata = self.backend.inspect_key(public_key).map_err(|error| {
            warn!(backend = self.backend.name(), %error, "public key is unreadable");
            DetectionError::WrongPublicKey
        })?;

        match classify(&metadata) {
            Some(family) => {
                debug!(%family, "detected key algorithm");
                Ok(family)
            }
            None => {
                warn!(algorithm = ?metadata.algorithm, "unsupported public key type");
                Err(DetectionError::UnsupportedKeyType)
            }
        }
    }
}
