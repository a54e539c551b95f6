//! Cryptographic backends
//!
//! The engine talks to cryptography only through [`CryptoBackend`]. The
//! native backend runs on RustCrypto; the OpenSSL backend shells out to an
//! `openssl` executable. The engine never reads backend error text: a failed
//! [`CryptoBackend::inspect_key`] means the key is unreadable, a failed
//! verification means the signature did not verify.

pub mod native;
pub mod openssl;

use fwverify_crypto::{HashAlgorithm, KeyMetadata};
use serde::Deserialize;
use thiserror::Error;

use crate::algorithm::SignFamily;

pub use native::NativeBackend;
pub use openssl::OpensslCliBackend;

/// 后端错误
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Crypto error: {0}")]
    Crypto(#[from] fwverify_crypto::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 外部命令执行失败
    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    /// 后端不支持该操作
    #[error("{backend} backend does not support {what}")]
    Unsupported { backend: &'static str, what: String },

    #[error("Unexpected output: {0}")]
    UnexpectedOutput(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Capability set the verification engine needs from a crypto provider
pub trait CryptoBackend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Parse a public key and report its structural markers
    fn inspect_key(&self, key: &[u8]) -> BackendResult<KeyMetadata>;

    /// Verify a signature over the raw message (EdDSA)
    fn verify_message(
        &self,
        key: &[u8],
        family: &SignFamily,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool>;

    /// Hash the message with `hash`, then verify the signature over the digest
    fn verify_digest(
        &self,
        key: &[u8],
        family: &SignFamily,
        hash: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool>;

    /// Lowercase hex digest of `data`
    fn digest_hex(&self, hash: HashAlgorithm, data: &[u8]) -> BackendResult<String>;
}

/// Backend selection in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Native,
    Openssl,
}
