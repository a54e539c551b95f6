mod common;

use common::*;
use fwverify_core::{DigestExpectation, DigestIntegrityChecker, NativeBackend, VerificationEngine};

fn check(expectations: &[DigestExpectation]) -> bool {
    DigestIntegrityChecker::new(&NativeBackend::new()).check_all(PAYLOAD, expectations)
}

#[test]
fn empty_list_passes() {
    assert!(check(&[]));
}

#[test]
fn all_matching_pass_regardless_of_formatting() {
    let spaced: String = HELLO_SHA512
        .as_bytes()
        .chunks(16)
        .map(|chunk| String::from_utf8_lossy(chunk).to_uppercase())
        .collect::<Vec<_>>()
        .join(" \n");
    assert!(check(&[
        DigestExpectation::new("SHA-256", &HELLO_SHA256.to_uppercase()),
        DigestExpectation::new("Sha512", &spaced),
        DigestExpectation::new("sha3_256", HELLO_SHA3_256),
    ]));
}

#[test]
fn unknown_algorithm_fails() {
    assert!(!check(&[DigestExpectation::new("BLAKE2b", HELLO_SHA256)]));
}

#[test]
fn stops_at_first_mismatch() {
    let backend = CountingBackend::new();
    let checker = DigestIntegrityChecker::new(&backend);
    let expectations = [
        DigestExpectation::new("sha256", HELLO_SHA256),
        DigestExpectation::new("sha512", HELLO_SHA256),
        DigestExpectation::new("sha3-256", HELLO_SHA3_256),
        DigestExpectation::new("sha256", HELLO_SHA256),
    ];

    assert!(!checker.check_all(PAYLOAD, &expectations));
    assert_eq!(backend.digest_calls(), 2);
}

#[test]
fn unknown_algorithm_short_circuits_without_hashing() {
    let backend = CountingBackend::new();
    let checker = DigestIntegrityChecker::new(&backend);
    let expectations = [
        DigestExpectation::new("md5", "5d41402abc4b2a76b9719d911017c592"),
        DigestExpectation::new("sha256", HELLO_SHA256),
    ];

    assert!(!checker.check_all(PAYLOAD, &expectations));
    assert_eq!(backend.digest_calls(), 0);
}

#[test]
fn digests_run_even_when_signature_fails() {
    let backend = CountingBackend::new();
    let engine = VerificationEngine::new(Box::new(backend.clone()));
    let digests = [
        DigestExpectation::new("sha256", HELLO_SHA256),
        DigestExpectation::new("sha512", HELLO_SHA512),
    ];

    let result = engine.verify_bytes(&inputs(ED25519_PUB, &[0u8; 64], "ED25519", &digests));
    assert!(!result.signature_valid());
    assert!(result.integrity_valid());
    assert_eq!(backend.digest_calls(), 2);
}
