//! Hybrid "encrypt to a public key" envelope.
//!
//! This module provides:
//! - [`encrypt_to`]: ephemeral X25519 → HKDF → AEAD, sealed for one recipient
//! - [`decrypt_from`]: the inverse, using the recipient's static private key
//! - [`EnvelopeProtocol`]: one type per wire protocol, fixing its derivation
//!   convention, context string and nonce width
//!
//! # Protocols
//!
//! | Type | Derivation | String | Nonce |
//! |---|---|---|---|
//! | [`PasswordToServer`] | convention (a) | `vettid-password-server-v1` | 12 bytes |
//! | [`PasswordToEnclave`] | convention (b) | `vettid-utk-v1` | 24 bytes |
//! | [`GenericToEnclave`] | convention (b) | `vettid-enclave-v1` | 24 bytes |
//!
//! The ephemeral private key, shared secret and derived key are all held
//! in zeroize-on-drop types and are wiped on every return path.

use crate::error::CryptoError;
use crate::kdf::{
    derive_for_context, derive_for_domain, ContextPurpose, DerivedKey, DomainPurpose, DomainSalt,
    KeyContext,
};
use crate::memory::SecretBuffer;
use crate::primitives::aead::{aead_open, aead_seal, NONCE_LEN};
use crate::primitives::agreement::{
    generate_agreement_keypair, AgreementPrivateKey, AgreementPublicKey, SharedSecret,
    X25519_KEY_LEN,
};
use crate::primitives::random::random_bytes;
use crate::primitives::xchacha::{xchacha_open, xchacha_seal, XNONCE_LEN};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Protocols
// ---------------------------------------------------------------------------

/// Nonce width of an envelope protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceWidth {
    /// 12 bytes, ChaCha20-Poly1305.
    Standard,
    /// 24 bytes, XChaCha20-Poly1305.
    Extended,
}

impl NonceWidth {
    /// Nonce length in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Standard => NONCE_LEN,
            Self::Extended => XNONCE_LEN,
        }
    }
}

/// A versioned envelope protocol.
pub trait EnvelopeProtocol: Sized {
    /// Human-readable protocol name for logs.
    const NAME: &'static str;
    /// Nonce width the peer expects.
    const NONCE_WIDTH: NonceWidth;

    /// Derive this protocol's key from an ECDH output.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` if HKDF fails.
    fn derive(secret: &SharedSecret) -> Result<DerivedKey<Self>, CryptoError>;
}

/// Password material sent to the backend service.
#[derive(Debug)]
pub struct PasswordToServer;

impl ContextPurpose for PasswordToServer {
    const CONTEXT: KeyContext = KeyContext::new("vettid-password-server-v1");
}

impl EnvelopeProtocol for PasswordToServer {
    const NAME: &'static str = "password-to-server";
    const NONCE_WIDTH: NonceWidth = NonceWidth::Standard;

    fn derive(secret: &SharedSecret) -> Result<DerivedKey<Self>, CryptoError> {
        derive_for_context(secret)
    }
}

/// Password material sealed to an attested enclave's user transaction key.
#[derive(Debug)]
pub struct PasswordToEnclave;

impl DomainPurpose for PasswordToEnclave {
    const DOMAIN: DomainSalt = DomainSalt::new("vettid-utk-v1");
}

impl EnvelopeProtocol for PasswordToEnclave {
    const NAME: &'static str = "password-to-enclave";
    const NONCE_WIDTH: NonceWidth = NonceWidth::Extended;

    fn derive(secret: &SharedSecret) -> Result<DerivedKey<Self>, CryptoError> {
        derive_for_domain(secret)
    }
}

/// Any other payload sealed to an attested enclave.
#[derive(Debug)]
pub struct GenericToEnclave;

impl DomainPurpose for GenericToEnclave {
    const DOMAIN: DomainSalt = DomainSalt::new("vettid-enclave-v1");
}

impl EnvelopeProtocol for GenericToEnclave {
    const NAME: &'static str = "generic-to-enclave";
    const NONCE_WIDTH: NonceWidth = NonceWidth::Extended;

    fn derive(secret: &SharedSecret) -> Result<DerivedKey<Self>, CryptoError> {
        derive_for_domain(secret)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Self-contained ciphertext for one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridEnvelope {
    /// AEAD output, tag appended.
    pub ciphertext: Vec<u8>,
    /// 12 or 24 bytes depending on the protocol.
    pub nonce: Vec<u8>,
    /// Sender's one-time X25519 public key.
    pub ephemeral_public_key: [u8; X25519_KEY_LEN],
}

/// Seal `plaintext` to `recipient_public` under protocol `P`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if the recipient key is not 32
/// bytes, `CryptoError::InvalidKeyMaterial` if it is a low-order point, and
/// `CryptoError::EntropyUnavailable` if no nonce can be drawn.
pub fn encrypt_to<P: EnvelopeProtocol>(
    plaintext: &[u8],
    recipient_public: &[u8],
) -> Result<HybridEnvelope, CryptoError> {
    let recipient = AgreementPublicKey::from_slice(recipient_public)?;
    let ephemeral = generate_agreement_keypair();
    let key = {
        let shared = ephemeral.private.agree(&recipient)?;
        P::derive(&shared)?
    };
    drop(ephemeral.private);

    let nonce = random_bytes(P::NONCE_WIDTH.byte_len())?;
    let ciphertext = match P::NONCE_WIDTH {
        NonceWidth::Standard => aead_seal(key.expose(), &nonce, plaintext, &[])?,
        NonceWidth::Extended => xchacha_seal(key.expose(), &nonce, plaintext, &[])?,
    };

    tracing::debug!(protocol = P::NAME, "sealed envelope");
    Ok(HybridEnvelope {
        ciphertext,
        nonce,
        ephemeral_public_key: ephemeral.public.to_bytes(),
    })
}

/// Open an envelope sealed under protocol `P` with the recipient's key.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if the nonce width does not match
/// `P`, and `CryptoError::AuthenticationFailure` for any tampering, wrong
/// recipient, or wrong protocol.
pub fn decrypt_from<P: EnvelopeProtocol>(
    envelope: &HybridEnvelope,
    own_private: &AgreementPrivateKey,
) -> Result<SecretBuffer, CryptoError> {
    let width = P::NONCE_WIDTH.byte_len();
    if envelope.nonce.len() != width {
        return Err(CryptoError::length("envelope nonce", width, envelope.nonce.len()));
    }

    let ephemeral = AgreementPublicKey::from(envelope.ephemeral_public_key);
    if !ephemeral.is_canonical() {
        return Err(CryptoError::AuthenticationFailure);
    }
    let key = {
        let shared = own_private
            .agree(&ephemeral)
            .map_err(|_| CryptoError::AuthenticationFailure)?;
        P::derive(&shared)?
    };

    match P::NONCE_WIDTH {
        NonceWidth::Standard => aead_open(key.expose(), &envelope.nonce, &envelope.ciphertext, &[]),
        NonceWidth::Extended => {
            xchacha_open(key.expose(), &envelope.nonce, &envelope.ciphertext, &[])
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
