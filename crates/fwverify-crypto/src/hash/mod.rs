//! Cryptographic hash functions
//!
//! Digests used for payload integrity expectations and for the
//! hash-then-verify signature schemes.

pub mod sha;

pub use sha::HashAlgorithm;
pub use sha::{hash, hash_hex, normalize_name};
