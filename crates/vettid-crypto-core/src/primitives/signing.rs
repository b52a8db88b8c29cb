//! Ed25519 signing via `ring`.
//!
//! This module provides:
//! - [`generate_signing_keypair`]: random seed, `ring` key pair
//! - [`SigningKeyPair::from_seed`]: rebuild from a stored 32-byte seed
//! - [`sign`]: sign with a raw seed handed over by a storage collaborator
//! - [`verify`]: boolean verification over raw bytes
//!
//! The seed is copied into [`SecretBytes`] and the `ring` key pair is rebuilt
//! per signature, so no long-lived `ring` object holds the private scalar.

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use crate::primitives::random::random_array;
use ring::signature::{self, Ed25519KeyPair, KeyPair};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 seed length in bytes.
pub const ED25519_SEED_LEN: usize = 32;

/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SigningPublicKey([u8; ED25519_PUBLIC_KEY_LEN]);

impl SigningPublicKey {
    /// Parse a 32-byte public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; ED25519_PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::length("Ed25519 public key", ED25519_PUBLIC_KEY_LEN, bytes.len())
        })?;
        Ok(Self(arr))
    }

    /// Raw encoding.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Check `signature` over `message`.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify(&self.0, message, signature.as_bytes())
    }
}

/// Ed25519 signature (64 bytes).
#[must_use = "signature must be stored or transmitted"]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wrap a received signature, checking its length.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` unless `bytes` is 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != ED25519_SIGNATURE_LEN {
            return Err(CryptoError::length(
                "Ed25519 signature",
                ED25519_SIGNATURE_LEN,
                bytes.len(),
            ));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Raw 64-byte encoding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Ed25519 seed plus its public key. Not `Clone`, not `Serialize`.
pub struct SigningKeyPair {
    seed: SecretBytes<ED25519_SEED_LEN>,
    /// Public key (safe to share).
    pub public: SigningPublicKey,
}

impl SigningKeyPair {
    /// Rebuild from a stored seed.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` unless `seed` is 32 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        let seed = SecretBytes::<ED25519_SEED_LEN>::from_slice(seed, "Ed25519 seed")?;
        let ring_kp = ring_keypair(&seed)?;
        let public = SigningPublicKey::from_slice(ring_kp.public_key().as_ref())?;
        Ok(Self { seed, public })
    }

    /// Sign `message`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Signature` if `ring` rejects the seed.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CryptoError> {
        let ring_kp = ring_keypair(&self.seed)?;
        Ok(Signature(ring_kp.sign(message).as_ref().to_vec()))
    }

    /// Expose the seed for hand-off to a keystore collaborator.
    #[must_use]
    pub const fn expose_seed(&self) -> &[u8; ED25519_SEED_LEN] {
        self.seed.expose()
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKeyPair(***)")
    }
}

fn ring_keypair(seed: &SecretBytes<ED25519_SEED_LEN>) -> Result<Ed25519KeyPair, CryptoError> {
    Ed25519KeyPair::from_seed_unchecked(seed.expose())
        .map_err(|e| CryptoError::Signature(format!("Ed25519 key reconstruction failed: {e}")))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Generate an Ed25519 key pair from a fresh random seed.
///
/// # Errors
///
/// Returns `CryptoError::EntropyUnavailable` if the CSPRNG fails.
pub fn generate_signing_keypair() -> Result<SigningKeyPair, CryptoError> {
    let seed = Zeroizing::new(random_array::<ED25519_SEED_LEN>()?);
    SigningKeyPair::from_seed(seed.as_slice())
}

/// Sign `message` with a raw 32-byte seed.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` unless `seed` is 32 bytes.
pub fn sign(seed: &[u8], message: &[u8]) -> Result<Signature, CryptoError> {
    SigningKeyPair::from_seed(seed)?.sign(message)
}

/// Verify an Ed25519 signature. Malformed keys or signatures yield `false`.
#[must_use]
pub fn verify(public: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if public.len() != ED25519_PUBLIC_KEY_LEN || signature.len() != ED25519_SIGNATURE_LEN {
        return false;
    }
    signature::UnparsedPublicKey::new(&signature::ED25519, public)
        .verify(message, signature)
        .is_ok()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
