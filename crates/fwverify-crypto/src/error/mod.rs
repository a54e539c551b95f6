use thiserror::Error;

/// Crypto模块的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("PEM error: {0}")]
    PemError(#[from] pem::PemError),

    #[error("SPKI error: {0}")]
    SpkiError(#[from] pkcs8::spki::Error),

    #[error("PKCS1 error: {0}")]
    Pkcs1Error(#[from] rsa::pkcs1::Error),

    #[error("DER error: {0}")]
    DerError(#[from] pkcs8::der::Error),

    #[error("RSA error: {0}")]
    RsaError(#[from] rsa::Error),

    /// Ed25519 and ECDSA share the `signature` crate error type
    #[error("Signature error: {0}")]
    SignatureError(#[from] ed25519_dalek::ed25519::Error),

    /// 不支持的 PEM 标签
    #[error("Unsupported PEM label: {0}")]
    UnsupportedPemLabel(String),

    /// 不支持的算法
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;
