//! RustCrypto backend

use fwverify_crypto::{
    asymmetric::{ecdsa, ed25519, rsa, Curve},
    decode_public_key, hash_hex, inspect, HashAlgorithm, KeyMetadata, PublicKeyDer,
};
use tracing::debug;

use super::{BackendError, BackendResult, CryptoBackend};
use crate::algorithm::{EcCurve, SignFamily};

const NAME: &str = "native";

/// In-process backend, needs no external tools or staging
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(what: impl Into<String>) -> BackendError {
        BackendError::Unsupported {
            backend: NAME,
            what: what.into(),
        }
    }

    fn spki(key: &PublicKeyDer) -> BackendResult<&[u8]> {
        match key {
            PublicKeyDer::Spki(der) => Ok(der.as_slice()),
            PublicKeyDer::Pkcs1(_) => Err(Self::unsupported("PKCS#1 keys for non-RSA families")),
        }
    }
}

impl CryptoBackend for NativeBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn inspect_key(&self, key: &[u8]) -> BackendResult<KeyMetadata> {
        let decoded = decode_public_key(key)?;
        let metadata = inspect(&decoded)?;
        debug!(?metadata, "inspected public key");
        Ok(metadata)
    }

    fn verify_message(
        &self,
        key: &[u8],
        family: &SignFamily,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        let key = decode_public_key(key)?;
        match family {
            SignFamily::Ed25519 => Ok(ed25519::verify_with_spki_der(
                Self::spki(&key)?,
                message,
                signature,
            )?),
            other => Err(Self::unsupported(format!("raw-message verification for {other}"))),
        }
    }

    fn verify_digest(
        &self,
        key: &[u8],
        family: &SignFamily,
        hash: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        let key = decode_public_key(key)?;
        match family {
            SignFamily::Rsa { .. } => Ok(rsa::verify(&key, hash, message, signature)?),
            SignFamily::Ecdsa(curve) => {
                let spki = Self::spki(&key)?;
                let curve = match curve {
                    EcCurve::P256 => Curve::P256,
                    EcCurve::P384 => Curve::P384,
                    EcCurve::P521 => Curve::P521,
                    EcCurve::Other => return Err(Self::unsupported("ECDSA on unnamed curves")),
                };
                Ok(ecdsa::verify(curve, spki, hash, message, signature)?)
            }
            other => Err(Self::unsupported(format!("digest verification for {other}"))),
        }
    }

    fn digest_hex(&self, hash: HashAlgorithm, data: &[u8]) -> BackendResult<String> {
        Ok(hash_hex(data, hash))
    }
}
