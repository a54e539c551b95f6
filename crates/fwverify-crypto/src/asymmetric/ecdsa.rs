//! ECDSA verification over the NIST prime curves
//!
//! Signatures are accepted ASN.1 DER encoded (the OpenSSL default) or as
//! fixed-width `r || s`.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use pkcs8::DecodePublicKey;

use crate::{
    error::Result,
    hash::{hash, HashAlgorithm},
};

/// NIST curves with a native verifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

/// Verify an ECDSA signature over an already computed digest
///
/// # Arguments
/// * `curve` - Curve the key is expected on
/// * `spki_der` - SubjectPublicKeyInfo DER of the key
/// * `digest` - Message digest, truncated to the field size by the verifier
/// * `signature` - DER or fixed-width signature
///
/// # Returns
/// `Ok(false)` when the signature does not verify; `Err` when the key or the
/// signature encoding cannot be parsed
pub fn verify_prehashed(
    curve: Curve,
    spki_der: &[u8],
    digest: &[u8],
    signature: &[u8],
) -> Result<bool> {
    match curve {
        Curve::P256 => {
            let public_key = p256::PublicKey::from_public_key_der(spki_der)?;
            let verifying_key = p256::ecdsa::VerifyingKey::from(&public_key);
            let signature = p256::ecdsa::Signature::from_der(signature)
                .or_else(|_| p256::ecdsa::Signature::from_slice(signature))?;
            Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
        }
        Curve::P384 => {
            let public_key = p384::PublicKey::from_public_key_der(spki_der)?;
            let verifying_key = p384::ecdsa::VerifyingKey::from(&public_key);
            let signature = p384::ecdsa::Signature::from_der(signature)
                .or_else(|_| p384::ecdsa::Signature::from_slice(signature))?;
            Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
        }
        Curve::P521 => {
            let public_key = p521::PublicKey::from_public_key_der(spki_der)?;
            let verifying_key = p521::ecdsa::VerifyingKey::from_affine(*public_key.as_affine())?;
            let signature = p521::ecdsa::Signature::from_der(signature)
                .or_else(|_| p521::ecdsa::Signature::from_slice(signature))?;
            Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
        }
    }
}

/// Hash the message with `algorithm`, then verify
pub fn verify(
    curve: Curve,
    spki_der: &[u8],
    algorithm: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    verify_prehashed(curve, spki_der, &hash(message, algorithm), signature)
}
