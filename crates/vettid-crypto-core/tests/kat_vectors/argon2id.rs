//! Argon2id tier pins.
//!
//! Reference digests were computed with an independent Argon2id
//! implementation (RFC 9106, version 0x13, no secret, no associated data).

use super::hex_to_bytes;
use vettid_crypto_core::password::{hash_password, PasswordDigest, PasswordParams};

const PASSWORD: &[u8] = b"correct horse battery staple";
const SALT: &[u8; 16] = b"VettIDsalt-16byt";

#[test]
fn interactive_tier_pin() {
    let digest = hash_password(PASSWORD, SALT).unwrap();
    assert_eq!(
        digest.expose().as_slice(),
        hex_to_bytes("e4ffc408f5afb56194216a7eb656b4dd5d81d4ac8b92640b996a93af2649632a")
    );
}

#[test]
fn low_memory_tier_pin() {
    let digest = PasswordDigest::compute(PASSWORD, SALT, PasswordParams::LowMemory).unwrap();
    assert_eq!(
        digest.expose().as_slice(),
        hex_to_bytes("c49e86f31100009552d9bbdd894067e5454582f0cd36309d2d13364a9b686d29")
    );
}

#[test]
fn interactive_phc_pin() {
    let phc = vettid_crypto_core::password::format_phc(PASSWORD, SALT).unwrap();
    assert_eq!(
        phc,
        "$argon2id$v=19$m=65536,t=3,p=4$VmV0dElEc2FsdC0xNmJ5dA\
         $5P/ECPWvtWGUIWp+tla03V2B1KyLkmQLmWqTryZJYyo"
    );
}
