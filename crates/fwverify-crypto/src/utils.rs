//! Small encoding helpers shared by the verifier
//!
//! PEM sniffing and hex digest normalisation.

/// True when the input starts (after leading whitespace) with a PEM boundary
pub fn looks_like_pem(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"-----BEGIN")
}

/// Lowercase a hex digest and strip all whitespace
///
/// Expected digests are often pasted from release notes with line breaks or
/// grouped with spaces; comparison happens on this normalised form.
pub fn normalize_hex(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
