//! fwverify 固件验证命令行工具

mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use error::CliResult;
use fwverify_core::{Settings, VerificationEngine};

#[derive(Parser)]
#[command(name = "fwverify")]
#[command(about = "fwverify 固件验证工具 - 签名、摘要与算法一致性校验")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 验证固件签名与摘要
    Verify {
        /// 固件文件路径
        #[arg(short, long)]
        payload: String,

        /// 分离签名文件路径
        #[arg(short, long)]
        signature: String,

        /// PEM 公钥文件路径
        #[arg(short = 'k', long)]
        public_key: String,

        /// 声明的签名算法，例如 RSA4096-SHA512 或 ED25519
        #[arg(short, long)]
        method: String,

        /// 期望摘要 ALGORITHM:HEX，可重复，按顺序校验
        #[arg(short, long = "digest")]
        digests: Vec<String>,

        /// 以 JSON 输出结果
        #[arg(long)]
        json: bool,

        /// 输出旧版布尔结构 (signatureValid / integrityValid)
        #[arg(long, requires = "json")]
        legacy: bool,
    },

    /// 计算文件 SHA-256 哈希
    Hash {
        /// 要计算哈希的文件
        #[arg(short, long)]
        file: String,

        /// 以 JSON 输出结果
        #[arg(long)]
        json: bool,
    },

    /// 检测公钥算法
    Inspect {
        /// 公钥文件路径
        #[arg(short, long)]
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "错误:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> CliResult<bool> {
    let settings = match cli.config.as_deref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    logging::init(&settings.logging.level);
    tracing::debug!(?settings, "loaded settings");

    let engine = VerificationEngine::from_settings(&settings);

    match cli.command {
        Commands::Verify {
            payload,
            signature,
            public_key,
            method,
            digests,
            json,
            legacy,
        } => commands::verify::handle(
            &engine,
            commands::verify::VerifyArgs {
                payload,
                signature,
                public_key,
                method,
                digests,
                json,
                legacy,
            },
        ),
        Commands::Hash { file, json } => {
            commands::hash::handle(&engine, file, json)?;
            Ok(true)
        }
        Commands::Inspect { key } => commands::inspect::handle(&engine, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_digests() {
        let cli = Cli::try_parse_from([
            "fwverify",
            "verify",
            "-p",
            "fw.bin",
            "-s",
            "fw.sig",
            "-k",
            "vendor.pem",
            "-m",
            "RSA4096-SHA512",
            "-d",
            "sha256:aa",
            "--digest",
            "sha512:bb",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify { digests, .. } => assert_eq!(digests, vec!["sha256:aa", "sha512:bb"]),
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn test_legacy_requires_json() {
        let parsed = Cli::try_parse_from([
            "fwverify", "verify", "-p", "a", "-s", "b", "-k", "c", "-m", "ED25519", "--legacy",
        ]);
        assert!(parsed.is_err());
    }
}
