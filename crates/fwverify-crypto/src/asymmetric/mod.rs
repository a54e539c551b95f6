//! Signature verification primitives
//!
//! RSA PKCS#1 v1.5, ECDSA over P-256 / P-384 / P-521 and Ed25519. Only the
//! public half of each scheme lives here.

pub mod ecdsa;
pub mod ed25519;
pub mod rsa;

pub use self::ecdsa::Curve;
