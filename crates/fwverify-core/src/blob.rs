//! Digest-only entry point for in-memory blobs (archives, images)

use fwverify_crypto::HashAlgorithm;
use tracing::debug;

use crate::backend::CryptoBackend;
use crate::error::Result;

/// Fixed digest for blobs, no negotiation
pub const BLOB_DIGEST: HashAlgorithm = HashAlgorithm::Sha256;

/// Lowercase SHA-256 hex of `blob`
pub fn digest_blob(backend: &dyn CryptoBackend, blob: &[u8]) -> Result<String> {
    let digest = backend.digest_hex(BLOB_DIGEST, blob)?;
    debug!(len = blob.len(), %digest, "blob digest");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;

    #[test]
    fn test_blob_digest_is_sha256() {
        assert_eq!(
            digest_blob(&NativeBackend::new(), b"hello").unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            digest_blob(&NativeBackend::new(), b"").unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
