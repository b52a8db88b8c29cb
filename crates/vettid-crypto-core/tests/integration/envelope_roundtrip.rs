//! Hybrid envelope flows, including the enclave "hello vault test" scenario.

use vettid_crypto_core::envelope::{
    decrypt_from, encrypt_to, EnvelopeProtocol, GenericToEnclave, NonceWidth, PasswordToEnclave,
    PasswordToServer,
};
use vettid_crypto_core::kdf::{derive_for_context, ContextPurpose, DerivedKey, KeyContext};
use vettid_crypto_core::primitives::agreement::{generate_agreement_keypair, SharedSecret};
use vettid_crypto_core::CryptoError;

/// The enclave domain string fed through the *other* derivation convention.
/// Exists only to prove the two conventions never coincide.
struct UtkAsContext;

impl ContextPurpose for UtkAsContext {
    const CONTEXT: KeyContext = KeyContext::new("vettid-utk-v1");
}

impl EnvelopeProtocol for UtkAsContext {
    const NAME: &'static str = "utk-as-context";
    const NONCE_WIDTH: NonceWidth = NonceWidth::Extended;

    fn derive(secret: &SharedSecret) -> Result<DerivedKey<Self>, CryptoError> {
        derive_for_context(secret)
    }
}

#[test]
fn hello_vault_scenario() {
    // A: service key pair. B: sender's ephemeral key pair is made inside encrypt_to.
    let service = generate_agreement_keypair();
    let plaintext = b"hello vault test";
    assert_eq!(plaintext.len(), 16);

    let env = encrypt_to::<PasswordToEnclave>(plaintext, service.public.as_bytes()).unwrap();
    assert_eq!(env.nonce.len(), 24);
    assert_eq!(env.ciphertext.len(), 16 + 16);

    let opened = decrypt_from::<PasswordToEnclave>(&env, &service.private).unwrap();
    assert_eq!(opened.expose(), plaintext);

    assert_eq!(
        decrypt_from::<UtkAsContext>(&env, &service.private).unwrap_err(),
        CryptoError::AuthenticationFailure
    );
}

#[test]
fn every_protocol_pair_is_isolated() {
    let service = generate_agreement_keypair();
    let pk = service.public.as_bytes();

    let to_enclave = encrypt_to::<PasswordToEnclave>(b"p", pk).unwrap();
    let generic = encrypt_to::<GenericToEnclave>(b"g", pk).unwrap();
    let to_server = encrypt_to::<PasswordToServer>(b"s", pk).unwrap();

    assert!(decrypt_from::<GenericToEnclave>(&to_enclave, &service.private).is_err());
    assert!(decrypt_from::<PasswordToEnclave>(&generic, &service.private).is_err());
    assert!(decrypt_from::<UtkAsContext>(&generic, &service.private).is_err());
    // 12-byte nonce never reaches a 24-byte protocol's AEAD.
    assert!(matches!(
        decrypt_from::<PasswordToEnclave>(&to_server, &service.private),
        Err(CryptoError::InvalidKeyLength { .. })
    ));
}

#[test]
fn large_payload_roundtrip() {
    let service = generate_agreement_keypair();
    let payload: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    let env = encrypt_to::<GenericToEnclave>(&payload, service.public.as_bytes()).unwrap();
    let opened = decrypt_from::<GenericToEnclave>(&env, &service.private).unwrap();
    assert_eq!(opened.expose(), payload.as_slice());
}
