use pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::{pkcs1, BigUint, Pkcs1v15Sign, RsaPublicKey};

use crate::{
    encoding::PublicKeyDer,
    error::Result,
    hash::{hash, HashAlgorithm},
};

/// Largest modulus accepted for verification
pub const MAX_MODULUS_BITS: usize = 16384;

/// Import an RSA public key from SPKI or PKCS#1 DER
///
/// SPKI keys are read structurally: any algorithm identifier whose subject
/// public key is a PKCS#1 `RSAPublicKey` is accepted, which covers
/// `rsaEncryption` as well as RSASSA-PSS labelled keys.
pub fn public_key_from_der(key: &PublicKeyDer) -> Result<RsaPublicKey> {
    match key {
        PublicKeyDer::Pkcs1(der) => public_key_from_pkcs1_der(der),
        PublicKeyDer::Spki(der) => public_key_from_spki_der(der),
    }
}

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<RsaPublicKey> {
    let spki = SubjectPublicKeyInfoRef::try_from(der)?;
    public_key_from_pkcs1_der(spki.subject_public_key.raw_bytes())
}

/// Import public key from PKCS#1 DER format
pub fn public_key_from_pkcs1_der(der: &[u8]) -> Result<RsaPublicKey> {
    let key = pkcs1::RsaPublicKey::try_from(der)?;
    let n = BigUint::from_bytes_be(key.modulus.as_bytes());
    let e = BigUint::from_bytes_be(key.public_exponent.as_bytes());
    Ok(RsaPublicKey::new_with_max_size(n, e, MAX_MODULUS_BITS)?)
}

/// PKCS#1 v1.5 signature scheme bound to the digest OID
fn pkcs1v15_scheme(algorithm: HashAlgorithm) -> Pkcs1v15Sign {
    match algorithm {
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<sha1::Sha1>(),
        HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<sha2::Sha224>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<sha2::Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<sha2::Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<sha2::Sha512>(),
        HashAlgorithm::Sha3_256 => Pkcs1v15Sign::new::<sha3::Sha3_256>(),
        HashAlgorithm::Sha3_384 => Pkcs1v15Sign::new::<sha3::Sha3_384>(),
        HashAlgorithm::Sha3_512 => Pkcs1v15Sign::new::<sha3::Sha3_512>(),
    }
}

/// Verify a PKCS#1 v1.5 signature over an already computed digest
///
/// # Returns
/// `Ok(false)` for a signature that does not verify, `Err` only when the
/// key cannot be imported
pub fn verify_prehashed(
    key: &PublicKeyDer,
    algorithm: HashAlgorithm,
    digest: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let public_key = public_key_from_der(key)?;
    Ok(public_key
        .verify(pkcs1v15_scheme(algorithm), digest, signature)
        .is_ok())
}

/// Hash the message with `algorithm`, then verify
pub fn verify(
    key: &PublicKeyDer,
    algorithm: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    verify_prehashed(key, algorithm, &hash(message, algorithm), signature)
}
