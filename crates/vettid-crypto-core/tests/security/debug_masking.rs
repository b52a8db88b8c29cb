//! `Debug` output of secret-bearing types never shows their bytes.

use std::time::{Duration, SystemTime};
use vettid_crypto_core::memory::{SecretBuffer, SecretBytes};
use vettid_crypto_core::password::{PasswordDigest, PasswordParams};
use vettid_crypto_core::primitives::agreement::generate_agreement_keypair;
use vettid_crypto_core::primitives::signing::generate_signing_keypair;
use vettid_crypto_core::session::SessionHandshake;

#[test]
fn secret_containers_are_masked() {
    let buf = SecretBuffer::new(b"top secret").unwrap();
    assert!(!format!("{buf:?}").contains("top secret"));
    assert!(!format!("{buf}").contains("top secret"));

    let bytes = SecretBytes::<4>::new(*b"ABCD");
    assert_eq!(format!("{bytes:?}"), "SecretBytes<4>(***)");
}

#[test]
fn key_pairs_are_masked() {
    let kp = generate_agreement_keypair();
    let shown = format!("{kp:?}");
    assert!(shown.contains("AgreementPrivateKey(***)"));

    let signing = generate_signing_keypair().unwrap();
    assert_eq!(format!("{signing:?}"), "SigningKeyPair(***)");
}

#[test]
fn session_and_digest_are_masked() {
    let a = SessionHandshake::new();
    let b = SessionHandshake::new();
    let b_pk = b.public_key();
    let session = a
        .complete("dbg", b_pk.as_bytes(), SystemTime::now() + Duration::from_secs(5))
        .unwrap();
    assert!(format!("{session:?}").contains("***"));

    let digest = PasswordDigest::compute(b"pw", &[0u8; 16], PasswordParams::LowMemory).unwrap();
    let hex: String = digest.expose().iter().map(|b| format!("{b:02x}")).collect();
    assert!(!format!("{digest:?}").contains(&hex));
}
