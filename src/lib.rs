//! # fwverify - 固件验证
//!
//! 固件分发包的签名、摘要与算法一致性校验
//!
//! ## 模块
//!
//! - `fwverify_crypto` - 验证用加密原语
//! - `fwverify_core` - 验证引擎
//! - `fwverify-cli` - 命令行工具

// Re-export all sub-crates
pub use fwverify_core;
pub use fwverify_crypto;
