//! Claimed method parsing and the sign family vocabulary
//!
//! A claimed method looks like `RSA4096-SHA512` or `ED25519`. The text before
//! the first `-` names the sign family, the rest names the hash. The claim
//! side and the key detector spell families differently (`ECC256` versus
//! `prime256v1`), so both are mapped onto [`SignFamily`] through
//! [`CLAIM_ALIASES`] and compared as values.

use std::fmt;

use fwverify_crypto::HashAlgorithm;
use serde::Serialize;

/// Named curve of an ECDSA key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EcCurve {
    P256,
    P384,
    P521,
    /// An EC key on a curve without a dedicated token
    Other,
}

/// Signature scheme family together with its size or curve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SignFamily {
    /// `bits` is `None` when the size is unknown or unspecified
    Rsa { bits: Option<usize> },
    Ecdsa(EcCurve),
    Ed25519,
    Ed448,
    /// Unrecognised claim token, lowercased
    Unknown(String),
}

/// Claim-side spellings of the EC families, each with the detector token it
/// is equivalent to
pub const CLAIM_ALIASES: &[(&str, SignFamily)] = &[
    ("prime256v1", SignFamily::Ecdsa(EcCurve::P256)),
    ("secp256r1", SignFamily::Ecdsa(EcCurve::P256)),
    ("p256", SignFamily::Ecdsa(EcCurve::P256)),
    ("nistp256", SignFamily::Ecdsa(EcCurve::P256)),
    ("ecc256", SignFamily::Ecdsa(EcCurve::P256)),
    ("ecdsa256", SignFamily::Ecdsa(EcCurve::P256)),
    ("ec256", SignFamily::Ecdsa(EcCurve::P256)),
    ("secp384r1", SignFamily::Ecdsa(EcCurve::P384)),
    ("p384", SignFamily::Ecdsa(EcCurve::P384)),
    ("nistp384", SignFamily::Ecdsa(EcCurve::P384)),
    ("ecc384", SignFamily::Ecdsa(EcCurve::P384)),
    ("ecdsa384", SignFamily::Ecdsa(EcCurve::P384)),
    ("ec384", SignFamily::Ecdsa(EcCurve::P384)),
    ("secp521r1", SignFamily::Ecdsa(EcCurve::P521)),
    ("p521", SignFamily::Ecdsa(EcCurve::P521)),
    ("nistp521", SignFamily::Ecdsa(EcCurve::P521)),
    ("ecc521", SignFamily::Ecdsa(EcCurve::P521)),
    ("ecdsa521", SignFamily::Ecdsa(EcCurve::P521)),
    ("ec521", SignFamily::Ecdsa(EcCurve::P521)),
    ("ec", SignFamily::Ecdsa(EcCurve::Other)),
    ("ecc", SignFamily::Ecdsa(EcCurve::Other)),
    ("ecdsa", SignFamily::Ecdsa(EcCurve::Other)),
    ("ed25519", SignFamily::Ed25519),
    ("ed448", SignFamily::Ed448),
];

impl SignFamily {
    pub fn is_eddsa(&self) -> bool {
        matches!(self, SignFamily::Ed25519 | SignFamily::Ed448)
    }

    /// Token in the detector vocabulary: `rsa4096`, `prime256v1`, `ec`, `ed25519`...
    pub fn token(&self) -> String {
        match self {
            SignFamily::Rsa { bits: Some(bits) } => format!("rsa{bits}"),
            SignFamily::Rsa { bits: None } => "rsa".to_string(),
            SignFamily::Ecdsa(EcCurve::P256) => "prime256v1".to_string(),
            SignFamily::Ecdsa(EcCurve::P384) => "secp384r1".to_string(),
            SignFamily::Ecdsa(EcCurve::P521) => "secp521r1".to_string(),
            SignFamily::Ecdsa(EcCurve::Other) => "ec".to_string(),
            SignFamily::Ed25519 => "ed25519".to_string(),
            SignFamily::Ed448 => "ed448".to_string(),
            SignFamily::Unknown(token) => token.clone(),
        }
    }

    /// Map a claim-side family token; never fails
    pub fn from_claim_token(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        if let Some((_, family)) = CLAIM_ALIASES.iter().find(|(alias, _)| *alias == token) {
            return family.clone();
        }
        if token == "rsa" {
            return SignFamily::Rsa { bits: None };
        }
        if let Some(bits) = token
            .strip_prefix("rsa")
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
        {
            return SignFamily::Rsa { bits: Some(bits) };
        }
        SignFamily::Unknown(token)
    }
}

impl fmt::Display for SignFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Parsed claimed method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmSpec {
    pub family: SignFamily,
    /// Sign family segment as typed
    pub family_token: String,
    /// Everything after the first `-`, as typed
    pub hash_segment: Option<String>,
}

impl AlgorithmSpec {
    /// Parse `<SIGNFAMILY>[-<HASHALGO>]`
    ///
    /// Never fails: an empty or unrecognised family becomes
    /// [`SignFamily::Unknown`] and the disagreement surfaces later, when the
    /// claim is reconciled with the key.
    pub fn parse(method: &str) -> Self {
        let method = method.trim();
        let (family_token, hash_segment) = match method.split_once('-') {
            Some((family, hash)) => (family, Some(hash.trim())),
            None => (method, None),
        };
        let family_token = family_token.trim().to_string();
        Self {
            family: SignFamily::from_claim_token(&family_token),
            family_token,
            hash_segment: hash_segment.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// Hash algorithm for the hash-then-verify families
    ///
    /// Always `None` for EdDSA, which signs the raw message. For other
    /// families `None` means the method named no hash or an unsupported one.
    pub fn hash(&self) -> Option<HashAlgorithm> {
        if self.family.is_eddsa() {
            return None;
        }
        self.segment_hash()
    }

    /// Hash named by the method, whatever the claimed family
    ///
    /// Signature checks run with the detected family, which may hash even
    /// when the claim names an EdDSA scheme.
    pub fn segment_hash(&self) -> Option<HashAlgorithm> {
        self.hash_segment.as_deref().and_then(HashAlgorithm::from_name)
    }

    /// Method string the caller should have supplied for a key of `detected` family
    ///
    /// The detected token is upper-cased and the claimed hash segment is kept
    /// verbatim, except for EdDSA keys which take no hash suffix.
    pub fn corrected_method(&self, detected: &SignFamily) -> String {
        let family = detected.token().to_uppercase();
        match &self.hash_segment {
            Some(hash) if !detected.is_eddsa() => format!("{family}-{hash}"),
            _ => family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rsa_with_hash() {
        let spec = AlgorithmSpec::parse("RSA4096-SHA512");
        assert_eq!(spec.family, SignFamily::Rsa { bits: Some(4096) });
        assert_eq!(spec.family.token(), "rsa4096");
        assert_eq!(spec.hash(), Some(HashAlgorithm::Sha512));
        assert_eq!(spec.family_token, "RSA4096");
        assert_eq!(spec.hash_segment.as_deref(), Some("SHA512"));
    }

    #[test]
    fn test_parse_eddsa_without_hash() {
        let spec = AlgorithmSpec::parse("ED25519");
        assert_eq!(spec.family, SignFamily::Ed25519);
        assert_eq!(spec.hash(), None);
        assert_eq!(spec.hash_segment, None);
    }

    #[test]
    fn test_parse_eddsa_ignores_hash() {
        let spec = AlgorithmSpec::parse("Ed448-SHA512");
        assert_eq!(spec.family, SignFamily::Ed448);
        assert_eq!(spec.hash(), None);
        assert_eq!(spec.segment_hash(), Some(HashAlgorithm::Sha512));
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        let spec = AlgorithmSpec::parse("RSA3072-SHA3-256");
        assert_eq!(spec.family, SignFamily::Rsa { bits: Some(3072) });
        assert_eq!(spec.hash_segment.as_deref(), Some("SHA3-256"));
        assert_eq!(spec.hash(), Some(HashAlgorithm::Sha3_256));
    }

    #[test]
    fn test_parse_never_fails() {
        for input in ["", "-", "-SHA256", "   ", "DSA-SHA1", "rsa-", "RSAxyz-SHA256"] {
            let spec = AlgorithmSpec::parse(input);
            assert!(matches!(spec.family, SignFamily::Unknown(_) | SignFamily::Rsa { .. }));
        }
        assert_eq!(AlgorithmSpec::parse("").family, SignFamily::Unknown(String::new()));
        assert_eq!(
            AlgorithmSpec::parse("RSAxyz-SHA256").family,
            SignFamily::Unknown("rsaxyz".to_string())
        );
        assert_eq!(AlgorithmSpec::parse("rsa-").hash_segment, None);
    }

    #[test]
    fn test_unsupported_hash_resolves_to_none() {
        let spec = AlgorithmSpec::parse("RSA2048-MD5");
        assert_eq!(spec.hash_segment.as_deref(), Some("MD5"));
        assert_eq!(spec.hash(), None);
    }

    #[test]
    fn test_claim_aliases_map_to_detector_tokens() {
        let expected = [
            ("prime256v1", "prime256v1"),
            ("secp256r1", "prime256v1"),
            ("p256", "prime256v1"),
            ("nistp256", "prime256v1"),
            ("ecc256", "prime256v1"),
            ("ecdsa256", "prime256v1"),
            ("ec256", "prime256v1"),
            ("secp384r1", "secp384r1"),
            ("p384", "secp384r1"),
            ("nistp384", "secp384r1"),
            ("ecc384", "secp384r1"),
            ("ecdsa384", "secp384r1"),
            ("ec384", "secp384r1"),
            ("secp521r1", "secp521r1"),
            ("p521", "secp521r1"),
            ("nistp521", "secp521r1"),
            ("ecc521", "secp521r1"),
            ("ecdsa521", "secp521r1"),
            ("ec521", "secp521r1"),
            ("ec", "ec"),
            ("ecc", "ec"),
            ("ecdsa", "ec"),
            ("ed25519", "ed25519"),
            ("ed448", "ed448"),
        ];
        assert_eq!(expected.len(), CLAIM_ALIASES.len());
        for (claim, token) in expected {
            assert_eq!(SignFamily::from_claim_token(claim).token(), token, "{claim}");
            assert_eq!(
                SignFamily::from_claim_token(&claim.to_uppercase()).token(),
                token,
                "{claim}"
            );
        }
    }

    #[test]
    fn test_detector_tokens_round_trip_through_claims() {
        let families = [
            SignFamily::Rsa { bits: Some(2048) },
            SignFamily::Rsa { bits: Some(3072) },
            SignFamily::Rsa { bits: Some(4096) },
            SignFamily::Rsa { bits: Some(1024) },
            SignFamily::Rsa { bits: None },
            SignFamily::Ecdsa(EcCurve::P256),
            SignFamily::Ecdsa(EcCurve::P384),
            SignFamily::Ecdsa(EcCurve::P521),
            SignFamily::Ecdsa(EcCurve::Other),
            SignFamily::Ed25519,
            SignFamily::Ed448,
        ];
        for family in families {
            assert_eq!(SignFamily::from_claim_token(&family.token()), family);
        }
    }

    #[test]
    fn test_corrected_method() {
        let spec = AlgorithmSpec::parse("RSA2048-SHA512");
        assert_eq!(
            spec.corrected_method(&SignFamily::Rsa { bits: Some(4096) }),
            "RSA4096-SHA512"
        );

        let spec = AlgorithmSpec::parse("RSA2048-sha256");
        assert_eq!(
            spec.corrected_method(&SignFamily::Ecdsa(EcCurve::P256)),
            "PRIME256V1-sha256"
        );
        assert_eq!(spec.corrected_method(&SignFamily::Ed25519), "ED25519");

        let spec = AlgorithmSpec::parse("ED25519");
        assert_eq!(
            spec.corrected_method(&SignFamily::Ecdsa(EcCurve::P384)),
            "SECP384R1"
        );
    }
}
