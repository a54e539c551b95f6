use colored::Colorize;
use fwverify_core::{blob::BLOB_DIGEST, VerificationEngine};

use crate::commands::read_existing;
use crate::error::CliResult;

pub fn handle(engine: &VerificationEngine, file: String, json: bool) -> CliResult<()> {
    let data = read_existing(&file)?;
    let digest = engine.digest_blob(&data)?;

    if json {
        let output = serde_json::json!({
            "file": file,
            "algorithm": BLOB_DIGEST.name(),
            "digest": digest,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", format!("计算文件哈希: {}", file).cyan());
    println!("  文件大小: {} 字节", data.len());
    println!("  算法: {}", BLOB_DIGEST.name().to_uppercase());
    println!();
    println!("{} {}", "哈希值:".green().bold(), digest);

    Ok(())
}
