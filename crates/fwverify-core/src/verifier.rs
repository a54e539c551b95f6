//! Signature verification dispatch

use fwverify_crypto::HashAlgorithm;
use tracing::{debug, warn};

use crate::algorithm::SignFamily;
use crate::backend::CryptoBackend;

/// Verifies a detached signature for a detected sign family
///
/// EdDSA signs the raw payload and ignores the hash. RSA and ECDSA hash the
/// payload bytes first and need a hash algorithm.
pub struct SignatureVerifier<'a> {
    backend: &'a dyn CryptoBackend,
}

impl<'a> SignatureVerifier<'a> {
    pub fn new(backend: &'a dyn CryptoBackend) -> Self {
        Self { backend }
    }

    /// Returns `false` for a bad signature and for any backend failure
    pub fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        public_key: &[u8],
        family: &SignFamily,
        hash: Option<HashAlgorithm>,
    ) -> bool {
        let outcome = match (family, hash) {
            (SignFamily::Ed25519 | SignFamily::Ed448, _) => {
                self.backend
                    .verify_message(public_key, family, payload, signature)
            }
            (SignFamily::Rsa { .. } | SignFamily::Ecdsa(_), Some(hash)) => {
                self.backend
                    .verify_digest(public_key, family, hash, payload, signature)
            }
            (SignFamily::Rsa { .. } | SignFamily::Ecdsa(_), None) => {
                warn!(%family, "no supported hash algorithm for hash-then-verify family");
                return false;
            }
            (SignFamily::Unknown(_), _) => {
                warn!(%family, "cannot verify with unknown sign family");
                return false;
            }
        };

        match outcome {
            Ok(valid) => {
                debug!(%family, ?hash, valid, "signature checked");
                valid
            }
            Err(error) => {
                warn!(
                    backend = self.backend.name(),
                    %family,
                    %error,
                    "signature verification failed"
                );
                false
            }
        }
    }
}
