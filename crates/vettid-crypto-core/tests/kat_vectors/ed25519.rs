//! RFC 8032 Section 7.1: Ed25519 Known-Answer Tests.

use super::hex_to_bytes;
use vettid_crypto_core::primitives::signing::{sign, verify, SigningKeyPair};

/// Test vector 1 (empty message).
#[test]
fn rfc8032_test_vector_1() {
    let seed = hex_to_bytes("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let expected_pk =
        hex_to_bytes("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
    let expected_sig = hex_to_bytes(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
         5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    );

    let kp = SigningKeyPair::from_seed(&seed).expect("seed should be valid");
    assert_eq!(kp.public.as_bytes().as_slice(), expected_pk.as_slice());

    let sig = sign(&seed, b"").expect("sign should succeed");
    assert_eq!(sig.as_bytes(), expected_sig.as_slice());
    assert!(verify(&expected_pk, b"", &expected_sig));
}

/// Test vector 2 (single byte `0x72`).
#[test]
fn rfc8032_test_vector_2() {
    let seed = hex_to_bytes("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
    let expected_pk =
        hex_to_bytes("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c");
    let expected_sig = hex_to_bytes(
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
         085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    );

    let kp = SigningKeyPair::from_seed(&seed).expect("seed should be valid");
    assert_eq!(kp.public.as_bytes().as_slice(), expected_pk.as_slice());
    assert_eq!(kp.sign(&[0x72]).expect("sign").as_bytes(), expected_sig.as_slice());
    assert!(verify(&expected_pk, &[0x72], &expected_sig));
    assert!(!verify(&expected_pk, &[0x73], &expected_sig));
}
