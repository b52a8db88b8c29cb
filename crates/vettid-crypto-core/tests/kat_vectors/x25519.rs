//! RFC 7748 Section 6.1: X25519 through the crate's own API.

use super::hex_to_bytes;
use vettid_crypto_core::primitives::agreement::{agree, AgreementPrivateKey};

const ALICE_PRIVATE: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
const BOB_PRIVATE: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
const SHARED: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

#[test]
fn rfc7748_public_keys() {
    let alice = AgreementPrivateKey::from_slice(&hex_to_bytes(ALICE_PRIVATE)).unwrap();
    let bob = AgreementPrivateKey::from_slice(&hex_to_bytes(BOB_PRIVATE)).unwrap();
    assert_eq!(alice.public_key().as_bytes().as_slice(), hex_to_bytes(ALICE_PUBLIC));
    assert_eq!(bob.public_key().as_bytes().as_slice(), hex_to_bytes(BOB_PUBLIC));
}

#[test]
fn rfc7748_shared_secret_both_directions() {
    let ab = agree(&hex_to_bytes(ALICE_PRIVATE), &hex_to_bytes(BOB_PUBLIC)).unwrap();
    let ba = agree(&hex_to_bytes(BOB_PRIVATE), &hex_to_bytes(ALICE_PUBLIC)).unwrap();
    assert_eq!(ab.expose().as_slice(), hex_to_bytes(SHARED));
    assert_eq!(ba.expose().as_slice(), hex_to_bytes(SHARED));
}
