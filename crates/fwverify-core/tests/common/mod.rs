#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fwverify_core::backend::{BackendResult, CryptoBackend, NativeBackend};
use fwverify_core::{SignFamily, VerificationInputs};
use fwverify_crypto::{HashAlgorithm, KeyMetadata};

pub const PAYLOAD: &[u8] = include_bytes!("../fixtures/payload.bin");

pub const RSA4096_PUB: &[u8] = include_bytes!("../fixtures/rsa4096.pub.pem");
pub const RSA4096_SHA512_SIG: &[u8] = include_bytes!("../fixtures/rsa4096-sha512.sig");
pub const RSA2048_PUB: &[u8] = include_bytes!("../fixtures/rsa2048.pub.pem");
pub const RSA2048_PKCS1: &[u8] = include_bytes!("../fixtures/rsa2048.pkcs1.pem");
pub const RSA2048_SHA256_SIG: &[u8] = include_bytes!("../fixtures/rsa2048-sha256.sig");
pub const RSA_PSS_UNLABELLED_PUB: &[u8] = include_bytes!("../fixtures/rsa-pss-unlabelled.pub.pem");

pub const P256_PUB: &[u8] = include_bytes!("../fixtures/p256.pub.pem");
pub const P256_SHA256_SIG: &[u8] = include_bytes!("../fixtures/p256-sha256.sig");
pub const P384_PUB: &[u8] = include_bytes!("../fixtures/p384.pub.pem");
pub const P384_SHA384_SIG: &[u8] = include_bytes!("../fixtures/p384-sha384.sig");
pub const P521_PUB: &[u8] = include_bytes!("../fixtures/p521.pub.pem");
pub const P521_SHA512_SIG: &[u8] = include_bytes!("../fixtures/p521-sha512.sig");
pub const SECP256K1_PUB: &[u8] = include_bytes!("../fixtures/secp256k1.pub.pem");

pub const ED25519_PUB: &[u8] = include_bytes!("../fixtures/ed25519.pub.pem");
pub const ED25519_SIG: &[u8] = include_bytes!("../fixtures/ed25519.sig");
pub const ED448_PUB: &[u8] = include_bytes!("../fixtures/ed448.pub.pem");
pub const ED448_SIG: &[u8] = include_bytes!("../fixtures/ed448.sig");

pub const X25519_PUB: &[u8] = include_bytes!("../fixtures/x25519.pub.pem");
pub const AMBIGUOUS_EC_RSA_PUB: &[u8] = include_bytes!("../fixtures/ambiguous-ec-rsa.pub.pem");
pub const GARBAGE_PEM: &[u8] = include_bytes!("../fixtures/garbage.pem");

pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
pub const HELLO_SHA512: &str = "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca72323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043";
pub const HELLO_SHA3_256: &str = "3338be694f50c5f338814986cdf0686453a888b84f424d792af4b9202398f392";

pub fn inputs<'a>(
    public_key: &'a [u8],
    signature: &'a [u8],
    claimed_method: &'a str,
    digests: &'a [fwverify_core::DigestExpectation],
) -> VerificationInputs<'a> {
    VerificationInputs {
        payload: PAYLOAD,
        signature,
        public_key,
        claimed_method,
        digests,
    }
}

/// Native backend that counts digest computations
#[derive(Clone, Default)]
pub struct CountingBackend {
    inner: NativeBackend,
    digests: Arc<AtomicUsize>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digest_calls(&self) -> usize {
        self.digests.load(Ordering::SeqCst)
    }
}

impl CryptoBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn inspect_key(&self, key: &[u8]) -> BackendResult<KeyMetadata> {
        self.inner.inspect_key(key)
    }

    fn verify_message(
        &self,
        key: &[u8],
        family: &SignFamily,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        self.inner.verify_message(key, family, message, signature)
    }

    fn verify_digest(
        &self,
        key: &[u8],
        family: &SignFamily,
        hash: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> BackendResult<bool> {
        self.inner.verify_digest(key, family, hash, message, signature)
    }

    fn digest_hex(&self, hash: HashAlgorithm, data: &[u8]) -> BackendResult<String> {
        self.digests.fetch_add(1, Ordering::SeqCst);
        self.inner.digest_hex(hash, data)
    }
}
