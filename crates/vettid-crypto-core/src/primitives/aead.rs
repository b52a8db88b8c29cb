//! 12-byte-nonce AEAD via `ring`.
//!
//! This module provides:
//! - [`aead_seal`] / [`aead_open`]: ChaCha20-Poly1305 (RFC 8439)
//! - [`seal_with`] / [`open_with`]: the same framing for any `ring` AEAD
//!   with a 256-bit key and 96-bit nonce
//! - [`Aead`]: strategy trait so a platform backend can pick the cipher
//!
//! Ciphertexts are `encrypted || tag` with a 16-byte tag. Nonces are
//! supplied by the caller; every caller in this crate draws them from
//! `OsRng`.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use ring::aead;
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// AEAD key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Standard AEAD nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Poly1305 / GCM tag length in bytes.
pub const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Strategy trait
// ---------------------------------------------------------------------------

/// A 256-bit-key, 96-bit-nonce AEAD.
pub trait Aead: Send + Sync {
    /// Algorithm name for logs and config.
    fn name(&self) -> &'static str;

    /// Encrypt and authenticate `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` for a bad key or nonce.
    fn seal(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Verify and decrypt `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::AuthenticationFailure` on any tag mismatch.
    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<SecretBuffer, CryptoError>;
}

/// ChaCha20-Poly1305, the default everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChaCha20Poly1305;

impl Aead for ChaCha20Poly1305 {
    fn name(&self) -> &'static str {
        "chacha20-poly1305"
    }

    fn seal(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        aead_seal(key, nonce, plaintext, aad)
    }

    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<SecretBuffer, CryptoError> {
        aead_open(key, nonce, ciphertext, aad)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// ChaCha20-Poly1305 encrypt.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if `key` is not 32 bytes or
/// `nonce` is not 12 bytes.
pub fn aead_seal(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    seal_with(&aead::CHACHA20_POLY1305, key, nonce, plaintext, aad)
}

/// ChaCha20-Poly1305 decrypt.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` for a bad key or nonce, and
/// `CryptoError::AuthenticationFailure` if the tag does not verify
/// (including ciphertexts shorter than the tag).
pub fn aead_open(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<SecretBuffer, CryptoError> {
    open_with(&aead::CHACHA20_POLY1305, key, nonce, ciphertext, aad)
}

/// Seal with an arbitrary `ring` AEAD algorithm.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` for a bad key or nonce.
pub fn seal_with(
    algorithm: &'static aead::Algorithm,
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let sealing_key = less_safe_key(algorithm, key)?;
    let nonce = ring_nonce(nonce)?;

    let mut in_out = plaintext.to_vec();
    let Ok(tag) = sealing_key.seal_in_place_separate_tag(nonce, aead::Aad::from(aad), &mut in_out)
    else {
        in_out.zeroize();
        return Err(CryptoError::InvalidKeyMaterial(
            "AEAD input exceeds the algorithm limit".into(),
        ));
    };
    in_out.extend_from_slice(tag.as_ref());
    Ok(in_out)
}

/// Open with an arbitrary `ring` AEAD algorithm.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` for a bad key or nonce, and
/// `CryptoError::AuthenticationFailure` if the tag does not verify.
pub fn open_with(
    algorithm: &'static aead::Algorithm,
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<SecretBuffer, CryptoError> {
    let opening_key = less_safe_key(algorithm, key)?;
    let nonce = ring_nonce(nonce)?;

    let mut in_out = ciphertext.to_vec();
    let plaintext_len = match opening_key.open_in_place(nonce, aead::Aad::from(aad), &mut in_out) {
        Ok(plaintext) => plaintext.len(),
        Err(_) => {
            in_out.zeroize();
            return Err(CryptoError::AuthenticationFailure);
        }
    };
    // Tail is the tag; the plaintext prefix moves straight into the secret buffer.
    in_out.truncate(plaintext_len);
    Ok(SecretBuffer::from_vec(in_out))
}

fn less_safe_key(
    algorithm: &'static aead::Algorithm,
    key: &[u8],
) -> Result<aead::LessSafeKey, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::length("AEAD key", KEY_LEN, key.len()));
    }
    let unbound = aead::UnboundKey::new(algorithm, key)
        .map_err(|_| CryptoError::length("AEAD key", algorithm.key_len(), key.len()))?;
    Ok(aead::LessSafeKey::new(unbound))
}

fn ring_nonce(nonce: &[u8]) -> Result<aead::Nonce, CryptoError> {
    aead::Nonce::try_assume_unique_for_key(nonce)
        .map_err(|_| CryptoError::length("AEAD nonce", NONCE_LEN, nonce.len()))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
