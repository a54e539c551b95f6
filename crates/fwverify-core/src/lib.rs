//! Firmware verification engine
//!
//! Checks a detached signature over a firmware payload against a public key,
//! recomputes the payload's declared digests and reconciles the signing
//! algorithm the caller claims with the one the key actually uses.
//!
//! ```no_run
//! use fwverify_core::{DigestExpectation, VerificationEngine, VerificationRequest};
//!
//! let engine = VerificationEngine::default();
//! let result = engine.verify_files(&VerificationRequest {
//!     payload_path: "firmware.bin".into(),
//!     signature_path: "firmware.sig".into(),
//!     public_key_path: "vendor.pub.pem".into(),
//!     claimed_method: "RSA4096-SHA512".to_string(),
//!     digests: vec![DigestExpectation::new("SHA-256", "2cf24dba...")],
//! })?;
//! assert!(result.is_accepted());
//! # Ok::<(), fwverify_core::CoreError>(())
//! ```

pub mod algorithm;
pub mod backend;
pub mod blob;
pub mod detect;
pub mod error;
pub mod integrity;
pub mod orchestrator;
pub mod result;
pub mod settings;
pub mod staging;
pub mod verifier;

// Re-export commonly used types
pub use algorithm::{AlgorithmSpec, EcCurve, SignFamily};
pub use backend::{BackendKind, CryptoBackend, NativeBackend, OpensslCliBackend};
pub use detect::{DetectionError, KeyAlgorithmDetector};
pub use error::{CoreError, Result};
pub use integrity::{DigestExpectation, DigestIntegrityChecker};
pub use orchestrator::{VerificationEngine, VerificationInputs, VerificationRequest};
pub use result::{CheckStatus, ErrorType, LegacyReport, VerificationResult};
pub use settings::Settings;
pub use verifier::SignatureVerifier;
