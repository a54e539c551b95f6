//! `openssl` command line backend
//!
//! Every operation stages its inputs in a fresh [`Workspace`] and runs one
//! `openssl` subcommand against the staged files. Key metadata comes from
//! the text dump of `openssl pkey -pubin -text -noout`.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

use fwverify_crypto::{EdwardsCurve, HashAlgorithm, KeyMetadata};
use tracing::{debug, trace};

use super::{BackendError, BackendResult, CryptoBackend};
use crate::algorithm::SignFamily;
use crate::staging::Workspace;

const NAME: &str = "openssl";

const KEY_FILE: &str = "public.pem";
const SIGNATURE_FILE: &str = "signature.bin";
const PAYLOAD_FILE: &str = "payload.bin";

/// Backend driving an external `openssl` executable
#[derive(Debug, Clone)]
pub struct OpensslCliBackend {
    program: PathBuf,
}

impl Default for OpensslCliBackend {
    fn default() -> Self {
        Self::new("openssl")
    }
}

impl OpensslCliBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// True when `openssl version` runs successfully
    pub fn is_available(&self) -> bool {
        self.run(["version"])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn run<I, S>(&self, args: I) -> BackendResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        trace!(?command, "running openssl");
        Ok(command.output()?)
    }

    fn command_error(&self, output: &Output) -> BackendError {
        BackendError::Command {
            program: self.program.display().to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Verification commands report a bad signature through the exit status
    fn verdict(&self, output: &Output) -> bool {
        if !output.status.success() {
            debug!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "openssl rejected signature"
            );
        }
        output.status.success()
    }
}

impl CryptoBackend for OpensslCliBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn inspect_key(&self, key: &[u8]) -> BackendResult<KeyMetadata> {
        let workspace = Workspace::new()?;
        let key_path = workspace.stage(KEY_FILE, key)?;
        let output = self.run([
            OsStr::new("pkey"),
            OsStr::new("-pubin"),
            OsStr::new("-in"),
            key_path.as_os_str(),
            OsStr::new("-text"),
            OsStr::new("-noout"),
        ])?;
        if !output.status.success() {
            return Err(self.command_error(&output));
        }
        Ok(parse_key_text(&String::from_utf8_lossy(&output.stdout)))
    }

    fn verify_message(
        &self,
        key: &[u8],
        family: &SignFamily,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        if !family.is_eddsa() {
            return Err(BackendError::Unsupported {
                backend: NAME,
                what: format!("raw-message verification for {family}"),
            });
        }
        let workspace = Workspace::new()?;
        let key_path = workspace.stage(KEY_FILE, key)?;
        let signature_path = workspace.stage(SIGNATURE_FILE, signature)?;
        let payload_path = workspace.stage(PAYLOAD_FILE, message)?;
        let output = self.run([
            OsStr::new("pkeyutl"),
            OsStr::new("-verify"),
            OsStr::new("-pubin"),
            OsStr::new("-inkey"),
            key_path.as_os_str(),
            OsStr::new("-rawin"),
            OsStr::new("-in"),
            payload_path.as_os_str(),
            OsStr::new("-sigfile"),
            signature_path.as_os_str(),
        ])?;
        Ok(self.verdict(&output))
    }

    fn verify_digest(
        &self,
        key: &[u8],
        family: &SignFamily,
        hash: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        let workspace = Workspace::new()?;
        let key_path = workspace.stage(KEY_FILE, key)?;
        let signature_path = workspace.stage(SIGNATURE_FILE, signature)?;
        let payload_path = workspace.stage(PAYLOAD_FILE, message)?;

        let hash_flag = format!("-{}", hash.name());
        let mut args = vec![OsStr::new("dgst"), OsStr::new(&hash_flag)];
        if matches!(family, SignFamily::Rsa { .. }) {
            args.push(OsStr::new("-binary"));
        }
        args.extend([
            OsStr::new("-verify"),
            key_path.as_os_str(),
            OsStr::new("-signature"),
            signature_path.as_os_str(),
            payload_path.as_os_str(),
        ]);
        let output = self.run(args)?;
        Ok(self.verdict(&output))
    }

    fn digest_hex(&self, hash: HashAlgorithm, data: &[u8]) -> BackendResult<String> {
        let workspace = Workspace::new()?;
        let payload_path = workspace.stage(PAYLOAD_FILE, data)?;
        let hash_flag = format!("-{}", hash.name());
        let output = self.run([
            OsStr::new("dgst"),
            OsStr::new(&hash_flag),
            OsStr::new("-r"),
            payload_path.as_os_str(),
        ])?;
        if !output.status.success() {
            return Err(self.command_error(&output));
        }
        parse_digest_line(&String::from_utf8_lossy(&output.stdout), hash)
    }
}

/// Read the hex digest from `openssl dgst -r` output (`<hex> *<file>`)
fn parse_digest_line(stdout: &str, hash: HashAlgorithm) -> BackendResult<String> {
    let digest = stdout
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let well_formed = digest.len() == hash.output_len() * 2
        && digest.bytes().all(|b| b.is_ascii_hexdigit());
    if !well_formed {
        return Err(BackendError::UnexpectedOutput(stdout.trim().to_string()));
    }
    Ok(digest)
}

/// Extract key markers from an `openssl pkey -text` dump
///
/// Markers are matched case-insensitively: the Edwards key labels, the
/// `ASN1 OID` / `NIST CURVE` / `EC Public-Key` lines of EC keys, and the
/// `Modulus` / `Exponent` fields with the `Public-Key: (N bit)` size line of
/// RSA keys.
pub fn parse_key_text(text: &str) -> KeyMetadata {
    let lower = text.to_lowercase();
    let mut metadata = KeyMetadata {
        algorithm: text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| line.trim_end_matches(':').to_string()),
        ..Default::default()
    };

    if lower.contains("ed25519") {
        metadata.edwards = Some(EdwardsCurve::Ed25519);
    } else if lower.contains("ed448") {
        metadata.edwards = Some(EdwardsCurve::Ed448);
    }

    metadata.ec_public_key = lower.contains("asn1 oid")
        || lower.contains("nist curve")
        || lower.contains("ec public-key");
    if metadata.ec_public_key {
        metadata.curve = field_value(&lower, "asn1 oid:")
            .or_else(|| field_value(&lower, "nist curve:").map(nist_to_openssl_name));
    }

    metadata.has_modulus = lower.contains("modulus");
    metadata.has_exponent = lower.contains("exponent");
    metadata.key_bits = key_bits(&lower);
    metadata
}

fn field_value(lower: &str, label: &str) -> Option<String> {
    lower
        .lines()
        .find_map(|line| line.trim().strip_prefix(label))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn nist_to_openssl_name(name: String) -> String {
    match name.as_str() {
        "p-256" => "prime256v1".to_string(),
        "p-384" => "secp384r1".to_string(),
        "p-521" => "secp521r1".to_string(),
        _ => name,
    }
}

/// `public-key: (4096 bit)` -> 4096
fn key_bits(lower: &str) -> Option<usize> {
    let (_, rest) = lower.split_once("public-key: (")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if !rest[digits.len()..].starts_with(" bit") {
        return None;
    }
    digits.parse().ok()
}
