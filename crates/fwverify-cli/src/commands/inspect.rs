use colored::Colorize;
use fwverify_core::VerificationEngine;

use crate::commands::read_existing;
use crate::error::CliResult;

/// 返回 true 表示公钥类型可识别
pub fn handle(engine: &VerificationEngine, key: String) -> CliResult<bool> {
    let data = read_existing(&key)?;
    println!("{}", format!("检测公钥算法: {}", key).cyan());

    match engine.detect_key(&data) {
        Ok(family) => {
            println!("{} {}", "算法:".green().bold(), family.token().to_uppercase());
            if let Ok(metadata) = engine.backend().inspect_key(&data) {
                if let Some(algorithm) = metadata.algorithm {
                    println!("  标识: {}", algorithm);
                }
                if let Some(curve) = metadata.curve {
                    println!("  曲线: {}", curve);
                }
                if let Some(bits) = metadata.key_bits {
                    println!("  长度: {} 位", bits);
                }
            }
            Ok(true)
        }
        Err(error) => {
            println!("{} {}", "✗".red(), error.to_string().red().bold());
            Ok(false)
        }
    }
}
