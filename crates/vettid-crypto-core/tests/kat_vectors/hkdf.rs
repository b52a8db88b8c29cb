//! RFC 5869 HKDF-SHA256 vectors (first 32 bytes of OKM) and pinned
//! derivations for each fixed context string.

use super::hex_to_bytes;
use vettid_crypto_core::kdf::{derive_key, CONTEXT_SALT};

#[test]
fn rfc5869_test_case_1() {
    let ikm = [0x0bu8; 22];
    let salt: Vec<u8> = (0x00u8..=0x0c).collect();
    let info: Vec<u8> = (0xf0u8..=0xf9).collect();
    let okm = derive_key(&ikm, &salt, &info).unwrap();
    assert_eq!(
        okm.expose().as_slice(),
        hex_to_bytes("3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf")
    );
}

#[test]
fn rfc5869_test_case_3_empty_salt_and_info() {
    let okm = derive_key(&[0x0bu8; 22], &[], &[]).unwrap();
    assert_eq!(
        okm.expose().as_slice(),
        hex_to_bytes("8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d")
    );
}

/// Session key for the RFC 7748 shared secret, pinned for other platforms.
#[test]
fn session_context_pin() {
    let shared = hex_to_bytes("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
    let key = derive_key(&shared, CONTEXT_SALT, b"vettid-session-v1").unwrap();
    assert_eq!(
        key.expose().as_slice(),
        hex_to_bytes("75a81cccb1486793d758bd7212132ad4466c8d21dca744f79009a05d5dcde48b")
    );
}
