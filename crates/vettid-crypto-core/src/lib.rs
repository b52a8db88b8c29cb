//! `vettid-crypto-core`: client-side cryptographic engine for VettID.
//!
//! Synchronous, call-and-return: zero network, zero async, zero storage.
//! Key material arrives and leaves as byte buffers; secrets are held in
//! zeroize-on-drop types for exactly as long as an operation needs them.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod primitives;

pub mod kdf;

pub mod envelope;

pub mod password;

pub mod session;

pub mod wire;

pub mod keystore;

pub use envelope::{
    decrypt_from, encrypt_to, EnvelopeProtocol, GenericToEnclave, HybridEnvelope, NonceWidth,
    PasswordToEnclave, PasswordToServer,
};
pub use error::CryptoError;
pub use kdf::{
    derive_for_context, derive_for_domain, derive_key, derive_with_context, derive_with_domain,
    ContextPurpose, DerivedKey, DomainPurpose, DomainSalt, KeyContext, CONTEXT_SALT,
};
pub use keystore::{load_agreement_key, store_agreement_key, KeyStore};
pub use memory::{ct_eq, disable_core_dumps, SecretBuffer, SecretBytes};
pub use password::{
    format_phc, generate_salt, hash_password, seal_password, verify_phc, PasswordDigest,
    PasswordParams,
};
pub use primitives::aead::{aead_open, aead_seal, Aead, ChaCha20Poly1305};
pub use primitives::agreement::{
    agree, generate_agreement_keypair, AgreementKeyPair, AgreementPrivateKey, AgreementPublicKey,
    SharedSecret,
};
pub use primitives::random::random_bytes;
pub use primitives::signing::{
    generate_signing_keypair, sign, verify, Signature, SigningKeyPair, SigningPublicKey,
};
pub use primitives::xchacha::{xchacha_open, xchacha_seal};
pub use primitives::KeyPair;
pub use session::{Session, SessionHandshake, SessionMessage};
pub use wire::{decode_base64, encode_base64, Base64Style, WireBundle};
