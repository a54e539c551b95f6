//! Payload digest checks

use std::fmt;
use std::str::FromStr;

use fwverify_crypto::{hash::normalize_name, utils::normalize_hex, HashAlgorithm};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::CryptoBackend;
use crate::error::CoreError;

/// A declared digest the payload must match
///
/// Both fields are stored normalised: the algorithm lowercased without
/// separators (`SHA-256` -> `sha256`), the hex lowercased without whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDigestExpectation")]
pub struct DigestExpectation {
    algorithm: String,
    expected_hex: String,
}

/// Wire shape before normalisation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDigestExpectation {
    #[serde(alias = "HashAlgorithm")]
    algorithm: String,
    #[serde(alias = "HashValue")]
    expected_hex: String,
}

impl From<RawDigestExpectation> for DigestExpectation {
    fn from(raw: RawDigestExpectation) -> Self {
        Self::new(&raw.algorithm, &raw.expected_hex)
    }
}

impl DigestExpectation {
    pub fn new(algorithm: &str, expected_hex: &str) -> Self {
        Self {
            algorithm: normalize_name(algorithm),
            expected_hex: normalize_hex(expected_hex),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn expected_hex(&self) -> &str {
        &self.expected_hex
    }

    /// `None` for algorithms the verifier cannot compute
    pub fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        HashAlgorithm::from_name(&self.algorithm)
    }
}

impl fmt::Display for DigestExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.expected_hex)
    }
}

/// Parses `ALGORITHM:HEX`
impl FromStr for DigestExpectation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((algorithm, hex)) if !algorithm.trim().is_empty() => {
                Ok(Self::new(algorithm, hex))
            }
            _ => Err(CoreError::Other(format!(
                "digest must look like ALGORITHM:HEX, got {s:?}"
            ))),
        }
    }
}

/// Recomputes payload digests and compares them with the expectations
pub struct DigestIntegrityChecker<'a> {
    backend: &'a dyn CryptoBackend,
}

impl<'a> DigestIntegrityChecker<'a> {
    pub fn new(backend: &'a dyn CryptoBackend) -> Self {
        Self { backend }
    }

    /// Check expectations in order, stopping at the first one that fails
    ///
    /// An unknown algorithm or a backend failure counts as a mismatch. Only
    /// the first failure is found; later entries are not evaluated. An empty
    /// list passes.
    pub fn check_all(&self, payload: &[u8], expectations: &[DigestExpectation]) -> bool {
        for (index, expectation) in expectations.iter().enumerate() {
            let Some(algorithm) = expectation.hash_algorithm() else {
                warn!(index, algorithm = expectation.algorithm(), "unsupported digest algorithm");
                return false;
            };

            match self.backend.digest_hex(algorithm, payload) {
                Ok(actual) if actual == expectation.expected_hex => {
                    debug!(index, %algorithm, "digest matches");
                }
                Ok(actual) => {
                    debug!(
                        index,
                        %algorithm,
                        expected = expectation.expected_hex(),
                        %actual,
                        "digest mismatch"
                    );
                    return false;
                }
                Err(error) => {
                    warn!(index, %algorithm, %error, "digest computation failed");
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectation_normalisation() {
        let expectation = DigestExpectation::new("SHA-256", " 2CF2 4DBA\n");
        assert_eq!(expectation.algorithm(), "sha256");
        assert_eq!(expectation.expected_hex(), "2cf24dba");
        assert_eq!(expectation.hash_algorithm(), Some(HashAlgorithm::Sha256));

        let expectation = DigestExpectation::new("SHA3-512", "AA");
        assert_eq!(expectation.algorithm(), "sha3512");
        assert_eq!(expectation.hash_algorithm(), Some(HashAlgorithm::Sha3_512));

        assert_eq!(DigestExpectation::new("crc32", "00").hash_algorithm(), None);
    }

    #[test]
    fn test_expectation_from_str() {
        let expectation: DigestExpectation = "SHA-512:ABCD".parse().unwrap();
        assert_eq!(expectation.to_string(), "sha512:abcd");
        assert!("sha256".parse::<DigestExpectation>().is_err());
        assert!(":abcd".parse::<DigestExpectation>().is_err());
    }

    #[test]
    fn test_expectation_deserialize_normalises() {
        let json = serde_json::json!({
            "algorithm": "SHA-256",
            "expectedHex": "2CF24DBA5FB0A30E 26E83B2AC5B9E29E\n1B161E5C1FA7425E73043362938B9824",
        });
        let expectation: DigestExpectation = serde_json::from_value(json).unwrap();
        assert_eq!(
            expectation,
            DigestExpectation::new(
                "sha256",
                "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
            )
        );

        let backend = crate::backend::NativeBackend::new();
        let checker = DigestIntegrityChecker::new(&backend);
        assert!(checker.check_all(b"hello", &[expectation]));
    }

    #[test]
    fn test_expectation_deserialize_aliases() {
        let json = r#"{"HashAlgorithm":"SHA-512","HashValue":"AB CD"}"#;
        let expectation: DigestExpectation = serde_json::from_str(json).unwrap();
        assert_eq!(expectation.algorithm(), "sha512");
        assert_eq!(expectation.expected_hex(), "abcd");
    }
}
