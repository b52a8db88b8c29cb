//! X25519 key agreement.
//!
//! This module provides:
//! - [`generate_agreement_keypair`]: fresh X25519 key pair from `OsRng`
//! - [`agree`]: raw-bytes ECDH for keys handed over by a storage collaborator
//! - [`AgreementPrivateKey::agree`]: typed ECDH
//! - [`SharedSecret`]: 32-byte ECDH output, zeroized on drop, never serialized

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// X25519 public and private key length in bytes.
pub const X25519_KEY_LEN: usize = 32;

/// X25519 shared secret length in bytes.
pub const SHARED_SECRET_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// X25519 public key (Montgomery u-coordinate). Safe to transmit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgreementPublicKey([u8; X25519_KEY_LEN]);

impl AgreementPublicKey {
    /// Parse a public key received from a peer or a storage collaborator.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` unless `bytes` is 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; X25519_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::length("X25519 public key", X25519_KEY_LEN, bytes.len()))?;
        Ok(Self(arr))
    }

    /// Raw 32-byte encoding.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; X25519_KEY_LEN] {
        &self.0
    }

    /// Raw 32-byte encoding, by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; X25519_KEY_LEN] {
        self.0
    }

    /// `true` if bit 255 is clear. Honestly generated keys always satisfy
    /// this; X25519 ignores the bit, so a set bit means the encoding was
    /// altered in transit.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        self.0[X25519_KEY_LEN - 1] & 0x80 == 0
    }
}

impl From<[u8; X25519_KEY_LEN]> for AgreementPublicKey {
    fn from(bytes: [u8; X25519_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

/// X25519 private scalar held in zeroize-on-drop memory.
///
/// Intentionally not `Clone`, `Serialize`, or `PartialEq`.
pub struct AgreementPrivateKey {
    secret: SecretBytes<X25519_KEY_LEN>,
}

impl AgreementPrivateKey {
    /// Copy a private key fetched from a keystore.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` unless `bytes` is 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            secret: SecretBytes::from_slice(bytes, "X25519 private key")?,
        })
    }

    /// Move a private key out of a caller buffer, wiping the buffer.
    #[must_use]
    pub fn take(bytes: &mut [u8; X25519_KEY_LEN]) -> Self {
        Self {
            secret: SecretBytes::take(bytes),
        }
    }

    /// Derive the matching public key.
    #[must_use]
    pub fn public_key(&self) -> AgreementPublicKey {
        let secret = self.to_dalek();
        AgreementPublicKey(x25519_dalek::PublicKey::from(&secret).to_bytes())
    }

    /// X25519 scalar multiplication with a peer public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyMaterial` if the peer key is a
    /// low-order point (the result would be all zeros).
    pub fn agree(&self, peer_public: &AgreementPublicKey) -> Result<SharedSecret, CryptoError> {
        let secret = self.to_dalek();
        let peer = x25519_dalek::PublicKey::from(peer_public.0);
        let shared = secret.diffie_hellman(&peer);
        // `secret` and `shared` are Zeroize-on-drop via the x25519-dalek "zeroize" feature.
        if !shared.was_contributory() {
            return Err(CryptoError::InvalidKeyMaterial(
                "X25519 peer public key is a low-order point".into(),
            ));
        }
        let mut raw = Zeroizing::new(shared.to_bytes());
        Ok(SharedSecret(SecretBytes::take(&mut raw)))
    }

    /// Expose the scalar for hand-off to a keystore collaborator.
    #[must_use]
    pub const fn expose(&self) -> &[u8; X25519_KEY_LEN] {
        self.secret.expose()
    }

    fn to_dalek(&self) -> x25519_dalek::StaticSecret {
        let bytes = Zeroizing::new(*self.secret.expose());
        x25519_dalek::StaticSecret::from(*bytes)
    }
}

impl fmt::Debug for AgreementPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AgreementPrivateKey(***)")
    }
}

/// X25519 key pair.
#[must_use = "key pair must be used or stored"]
pub struct AgreementKeyPair {
    /// Public key (safe to share).
    pub public: AgreementPublicKey,
    /// Private key (zeroized on drop).
    pub private: AgreementPrivateKey,
}

impl fmt::Debug for AgreementKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgreementKeyPair")
            .field("public", &self.public)
            .field("private", &self.private)
            .finish()
    }
}

/// 32-byte ECDH output. Feed it to HKDF and let it drop.
pub struct SharedSecret(SecretBytes<SHARED_SECRET_LEN>);

impl SharedSecret {
    /// Expose the raw secret for key derivation.
    #[must_use]
    pub const fn expose(&self) -> &[u8; SHARED_SECRET_LEN] {
        self.0.expose()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Generate a fresh X25519 key pair.
///
/// # Panics
///
/// Panics if the operating system cannot supply entropy; that condition is
/// not recoverable on a supported platform.
pub fn generate_agreement_keypair() -> AgreementKeyPair {
    let secret = x25519_dalek::StaticSecret::random_from_rng(OsRng);
    let public = AgreementPublicKey(x25519_dalek::PublicKey::from(&secret).to_bytes());
    let mut scalar = Zeroizing::new(secret.to_bytes());
    let private = AgreementPrivateKey {
        secret: SecretBytes::take(&mut scalar),
    };
    AgreementKeyPair { public, private }
}

/// ECDH over raw byte buffers.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if either input is not exactly
/// 32 bytes, or `CryptoError::InvalidKeyMaterial` for a low-order peer key.
pub fn agree(private: &[u8], peer_public: &[u8]) -> Result<SharedSecret, CryptoError> {
    let private = AgreementPrivateKey::from_slice(private)?;
    let peer = AgreementPublicKey::from_slice(peer_public)?;
    private.agree(&peer)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
