//! End-to-end verification
//!
//! One call runs: key detection, signature check with the detected family,
//! digest checks, then reconciliation of the claimed method with the key.

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::algorithm::{AlgorithmSpec, SignFamily};
use crate::backend::{BackendKind, CryptoBackend, NativeBackend, OpensslCliBackend};
use crate::blob;
use crate::detect::{DetectionError, KeyAlgorithmDetector};
use crate::error::Result;
use crate::integrity::{DigestExpectation, DigestIntegrityChecker};
use crate::result::VerificationResult;
use crate::settings::Settings;
use crate::verifier::SignatureVerifier;

/// Files and claims for one verification
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub payload_path: PathBuf,
    pub signature_path: PathBuf,
    pub public_key_path: PathBuf,
    /// `<SIGNFAMILY>[-<HASHALGO>]`, e.g. `RSA4096-SHA512` or `ED25519`
    pub claimed_method: String,
    /// Checked in order, first failure wins
    pub digests: Vec<DigestExpectation>,
}

/// In-memory form of a [`VerificationRequest`]
#[derive(Debug, Clone, Copy)]
pub struct VerificationInputs<'a> {
    pub payload: &'a [u8],
    pub signature: &'a [u8],
    pub public_key: &'a [u8],
    pub claimed_method: &'a str,
    pub digests: &'a [DigestExpectation],
}

pub struct VerificationEngine {
    backend: Box<dyn CryptoBackend>,
}

impl Default for VerificationEngine {
    fn default() -> Self {
        Self::new(Box::new(NativeBackend::new()))
    }
}

impl VerificationEngine {
    pub fn new(backend: Box<dyn CryptoBackend>) -> Self {
        Self { backend }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        match settings.backend.kind {
            BackendKind::Native => Self::default(),
            BackendKind::Openssl => Self::new(Box::new(OpensslCliBackend::new(
                settings.backend.openssl_path.clone(),
            ))),
        }
    }

    pub fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    pub fn detect_key(&self, public_key: &[u8]) -> std::result::Result<SignFamily, DetectionError> {
        KeyAlgorithmDetector::new(self.backend()).detect(public_key)
    }

    /// Lowercase SHA-256 hex of an in-memory blob
    pub fn digest_blob(&self, blob: &[u8]) -> Result<String> {
        blob::digest_blob(self.backend(), blob)
    }

    /// Read the request's files and verify them
    ///
    /// Only unreadable files are errors; every verification outcome is a
    /// [`VerificationResult`].
    pub fn verify_files(&self, request: &VerificationRequest) -> Result<VerificationResult> {
        let payload = fs::read(&request.payload_path)?;
        let signature = fs::read(&request.signature_path)?;
        let public_key = fs::read(&request.public_key_path)?;

        Ok(self.verify_bytes(&VerificationInputs {
            payload: &payload,
            signature: &signature,
            public_key: &public_key,
            claimed_method: &request.claimed_method,
            digests: &request.digests,
        }))
    }

    #[instrument(
        skip_all,
        fields(backend = self.backend.name(), claimed = inputs.claimed_method)
    )]
    pub fn verify_bytes(&self, inputs: &VerificationInputs<'_>) -> VerificationResult {
        let detected = match self.detect_key(inputs.public_key) {
            Ok(family) => family,
            Err(error) => {
                info!(%error, "key detection failed, nothing verified");
                return VerificationResult::detection_failed(error);
            }
        };

        let claimed = AlgorithmSpec::parse(inputs.claimed_method);

        let signature_valid = SignatureVerifier::new(self.backend()).verify(
            inputs.payload,
            inputs.signature,
            inputs.public_key,
            &detected,
            claimed.segment_hash(),
        );
        let integrity_valid =
            DigestIntegrityChecker::new(self.backend()).check_all(inputs.payload, inputs.digests);

        if !signature_valid {
            info!(%detected, integrity_valid, "signature invalid");
            return VerificationResult::signature_failed(integrity_valid);
        }

        if claimed.family != detected {
            let corrected = claimed.corrected_method(&detected);
            info!(
                %detected,
                claimed = %claimed.family,
                %corrected,
                "claimed algorithm does not match key"
            );
            return VerificationResult::algorithm_mismatch(integrity_valid, corrected);
        }

        info!(%detected, integrity_valid, "signature verified");
        VerificationResult::verified(integrity_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BackendCfg;

    #[test]
    fn test_from_settings_selects_backend() {
        assert_eq!(
            VerificationEngine::from_settings(&Settings::default())
                .backend()
                .name(),
            "native"
        );

        let settings = Settings {
            backend: BackendCfg {
                kind: BackendKind::Openssl,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(VerificationEngine::from_settings(&settings).backend().name(), "openssl");
    }
}
