//! 核心错误类型定义

use thiserror::Error;

/// 核心错误类型
#[derive(Error, Debug)]
pub enum CoreError {
    /// 读取输入文件失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 加密错误
    #[error("Crypto error: {0}")]
    Crypto(#[from] fwverify_crypto::Error),

    /// 后端错误
    #[error("Backend error: {0}")]
    Backend(#[from] crate::backend::BackendError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 核心操作结果类型
pub type Result<T> = std::result::Result<T, CoreError>;
