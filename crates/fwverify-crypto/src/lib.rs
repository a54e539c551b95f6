//! fwverify cryptography library
//!
//! Verification-side primitives for the firmware verifier: digests, public
//! key decoding and inspection, and RSA / ECDSA / Ed25519 signature checks.

pub mod error;
pub mod utils;

pub mod asymmetric;
pub mod encoding;
pub mod hash;

// Re-export commonly used types for convenience
pub use asymmetric::Curve;
pub use encoding::{decode_public_key, inspect, EdwardsCurve, KeyMetadata, PublicKeyDer};
pub use error::{Error, Result};
pub use hash::{hash, hash_hex, HashAlgorithm};
