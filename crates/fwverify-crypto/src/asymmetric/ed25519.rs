use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use pkcs8::DecodePublicKey;

use crate::error::Result;

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<VerifyingKey> {
    Ok(VerifyingKey::from_public_key_der(der)?)
}

/// Verify an Ed25519 signature over the raw message (no pre-hash)
pub fn verify_with_spki_der(spki_der: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let verifying_key = public_key_from_spki_der(spki_der)?;
    let signature = Signature::from_slice(signature)?;
    Ok(verifying_key.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_public_key;

    const PAYLOAD: &[u8] = include_bytes!("../../../fwverify-core/tests/fixtures/payload.bin");
    const KEY_PEM: &[u8] = include_bytes!("../../../fwverify-core/tests/fixtures/ed25519.pub.pem");
    const SIG: &[u8] = include_bytes!("../../../fwverify-core/tests/fixtures/ed25519.sig");

    #[test]
    fn test_verify() {
        let der = decode_public_key(KEY_PEM).unwrap();
        assert!(verify_with_spki_der(der.as_bytes(), PAYLOAD, SIG).unwrap());
        assert!(!verify_with_spki_der(der.as_bytes(), b"hello\n", SIG).unwrap());
    }

    #[test]
    fn test_bad_signature_length() {
        let der = decode_public_key(KEY_PEM).unwrap();
        assert!(verify_with_spki_der(der.as_bytes(), PAYLOAD, &SIG[..63]).is_err());
    }
}
