//! Public key decoding and structural inspection
//!
//! Keys arrive as PEM (`PUBLIC KEY` or `RSA PUBLIC KEY`) or raw DER. The
//! inspector reports the markers the algorithm detector classifies on: the
//! Edwards key type, the EC public key flag with its named curve, and
//! whether an RSA modulus and exponent are present.

use const_oid::{
    db::{rfc5912, rfc8410},
    ObjectIdentifier,
};
use pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs1;
use serde::Serialize;

use crate::error::{Error, Result};

const PEM_LABEL_SPKI: &str = "PUBLIC KEY";
const PEM_LABEL_PKCS1: &str = "RSA PUBLIC KEY";

/// secp256k1, absent from the const-oid database
const SECP_256_K_1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// DER public key together with its container format
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKeyDer {
    /// X.509 SubjectPublicKeyInfo
    Spki(Vec<u8>),
    /// Bare PKCS#1 `RSAPublicKey`
    Pkcs1(Vec<u8>),
}

impl PublicKeyDer {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKeyDer::Spki(der) | PublicKeyDer::Pkcs1(der) => der,
        }
    }
}

/// Edwards curve key types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdwardsCurve {
    Ed25519,
    Ed448,
}

/// Structural markers found in a public key
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetadata {
    /// Set for Ed25519 / Ed448 keys
    pub edwards: Option<EdwardsCurve>,
    /// The key declares itself an elliptic-curve public key
    pub ec_public_key: bool,
    /// Named curve, OpenSSL spelling (`prime256v1`, `secp384r1`, ...) or the dotted OID
    pub curve: Option<String>,
    pub has_modulus: bool,
    pub has_exponent: bool,
    /// Key size in bits, when the key format carries one
    pub key_bits: Option<usize>,
    /// Algorithm identifier as a dotted OID, or a backend specific label
    pub algorithm: Option<String>,
}

/// 解析公钥 (PEM 或 DER)
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKeyDer> {
    if crate::utils::looks_like_pem(bytes) {
        let pem = pem::parse(bytes)?;
        return match pem.tag() {
            PEM_LABEL_SPKI => Ok(PublicKeyDer::Spki(pem.contents().to_vec())),
            PEM_LABEL_PKCS1 => Ok(PublicKeyDer::Pkcs1(pem.contents().to_vec())),
            other => Err(Error::UnsupportedPemLabel(other.to_string())),
        };
    }

    if SubjectPublicKeyInfoRef::try_from(bytes).is_ok() {
        return Ok(PublicKeyDer::Spki(bytes.to_vec()));
    }
    pkcs1::RsaPublicKey::try_from(bytes)?;
    Ok(PublicKeyDer::Pkcs1(bytes.to_vec()))
}

/// Inspect a decoded key and report its structural markers
pub fn inspect(key: &PublicKeyDer) -> Result<KeyMetadata> {
    match key {
        PublicKeyDer::Pkcs1(der) => {
            let mut metadata = KeyMetadata {
                algorithm: Some(rfc5912::RSA_ENCRYPTION.to_string()),
                ..Default::default()
            };
            apply_rsa_markers(&mut metadata, der)?;
            Ok(metadata)
        }
        PublicKeyDer::Spki(der) => inspect_spki(der),
    }
}

fn inspect_spki(der: &[u8]) -> Result<KeyMetadata> {
    let spki = SubjectPublicKeyInfoRef::try_from(der)?;
    let oid = spki.algorithm.oid;
    let mut metadata = KeyMetadata {
        algorithm: Some(oid.to_string()),
        ..Default::default()
    };

    match oid {
        rfc8410::ID_ED_25519 => metadata.edwards = Some(EdwardsCurve::Ed25519),
        rfc8410::ID_ED_448 => metadata.edwards = Some(EdwardsCurve::Ed448),
        rfc5912::ID_EC_PUBLIC_KEY => {
            metadata.ec_public_key = true;
            metadata.curve = spki.algorithm.parameters_oid().ok().map(curve_name);
        }
        _ => {}
    }

    // RSA keys are recognised by structure, not by their algorithm label
    let _ = apply_rsa_markers(&mut metadata, spki.subject_public_key.raw_bytes());
    Ok(metadata)
}

fn apply_rsa_markers(metadata: &mut KeyMetadata, pkcs1_der: &[u8]) -> Result<()> {
    let key = pkcs1::RsaPublicKey::try_from(pkcs1_der)?;
    metadata.has_modulus = !key.modulus.as_bytes().is_empty();
    metadata.has_exponent = !key.public_exponent.as_bytes().is_empty();
    metadata.key_bits = Some(bit_length(key.modulus.as_bytes()));
    Ok(())
}

/// OpenSSL short name for the curves the verifier knows, dotted OID otherwise
pub fn curve_name(oid: ObjectIdentifier) -> String {
    match oid {
        rfc5912::SECP_256_R_1 => "prime256v1".to_string(),
        rfc5912::SECP_384_R_1 => "secp384r1".to_string(),
        rfc5912::SECP_521_R_1 => "secp521r1".to_string(),
        SECP_256_K_1 => "secp256k1".to_string(),
        other => other.to_string(),
    }
}

/// Bit length of a big-endian unsigned integer
fn bit_length(bytes: &[u8]) -> usize {
    let bytes = match bytes.iter().position(|b| *b != 0) {
        Some(start) => &bytes[start..],
        None => return 0,
    };
    (bytes.len() - 1) * 8 + (8 - bytes[0].leading_zeros() as usize)
}
