use std::path::Path;

use colored::Colorize;
use fwverify_core::{
    CheckStatus, DigestExpectation, ErrorType, VerificationEngine, VerificationRequest,
    VerificationResult,
};

use crate::error::{CliError, CliResult};

pub struct VerifyArgs {
    pub payload: String,
    pub signature: String,
    pub public_key: String,
    pub method: String,
    pub digests: Vec<String>,
    pub json: bool,
    pub legacy: bool,
}

/// 返回 true 表示固件通过全部校验
pub fn handle(engine: &VerificationEngine, args: VerifyArgs) -> CliResult<bool> {
    // 检查文件是否存在
    for path in [&args.payload, &args.signature, &args.public_key] {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.clone()));
        }
    }
    if args.method.trim().is_empty() {
        return Err(CliError::InvalidInput("签名算法 (--method) 不能为空".to_string()));
    }

    let request = VerificationRequest {
        payload_path: args.payload.clone().into(),
        signature_path: args.signature.clone().into(),
        public_key_path: args.public_key.clone().into(),
        claimed_method: args.method.clone(),
        digests: parse_digests(&args.digests)?,
    };

    if !args.json {
        println!("{}", format!("验证固件: {}", args.payload).cyan());
        println!("  签名文件: {}", args.signature);
        println!("  公钥文件: {}", args.public_key);
        println!("  声明算法: {}", args.method);
        println!("  摘要数量: {}", request.digests.len());
    }

    let result = engine.verify_files(&request)?;

    if args.json {
        let output = if args.legacy {
            serde_json::to_string_pretty(&result.to_legacy())?
        } else {
            serde_json::to_string_pretty(&result)?
        };
        println!("{}", output);
    } else {
        print_report(&result);
    }

    Ok(result.is_accepted())
}

/// 解析 `ALGORITHM:HEX` 形式的摘要参数，保持命令行顺序
pub fn parse_digests(raw: &[String]) -> CliResult<Vec<DigestExpectation>> {
    raw.iter()
        .map(|digest| {
            digest
                .parse::<DigestExpectation>()
                .map_err(|e| CliError::InvalidInput(e.to_string()))
        })
        .collect()
}

fn status_line(label: &str, status: CheckStatus) {
    match status {
        CheckStatus::Passed => println!("{} {}", "✓".green(), format!("{label}通过").green()),
        CheckStatus::Failed => {
            println!("{} {}", "✗".red(), format!("{label}失败").red().bold())
        }
        CheckStatus::NotEvaluated => {
            println!("{} {}", "-".yellow(), format!("{label}未执行").yellow())
        }
    }
}

fn print_report(result: &VerificationResult) {
    println!();
    status_line("签名验证", result.signature);
    status_line("完整性校验", result.integrity);

    match result.error_type {
        Some(ErrorType::WrongPublicKey) => {
            println!("{} {}", "✗".red(), "无法解析公钥，请检查公钥文件".red().bold());
        }
        Some(ErrorType::UnsupportedKeyType) => {
            println!("{} {}", "✗".red(), "不支持的公钥类型".red().bold());
        }
        Some(ErrorType::AlgoMismatch) => {
            println!("{} {}", "⚠".yellow(), "声明的签名算法与公钥不一致".yellow().bold());
            if let Some(ref corrected) = result.corrected_method {
                println!("  正确的算法: {}", corrected.bold());
            }
        }
        None => {}
    }

    println!();
    if result.is_accepted() {
        println!("{}", "固件验证通过！".green().bold());
    } else {
        println!("{}", "固件验证未通过".red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digests_keeps_order() {
        let raw = vec!["SHA-512:AA".to_string(), "sha256:bb".to_string()];
        let digests = parse_digests(&raw).unwrap();
        assert_eq!(digests[0].algorithm(), "sha512");
        assert_eq!(digests[0].expected_hex(), "aa");
        assert_eq!(digests[1].algorithm(), "sha256");
    }

    #[test]
    fn test_parse_digests_rejects_missing_separator() {
        let raw = vec!["sha256".to_string()];
        assert!(matches!(parse_digests(&raw), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file() {
        let args = VerifyArgs {
            payload: "/nonexistent/firmware.bin".to_string(),
            signature: "/nonexistent/firmware.sig".to_string(),
            public_key: "/nonexistent/key.pem".to_string(),
            method: "RSA4096-SHA512".to_string(),
            digests: vec![],
            json: true,
            legacy: false,
        };
        assert!(matches!(
            handle(&VerificationEngine::default(), args),
            Err(CliError::FileNotFound(_))
        ));
    }
}
