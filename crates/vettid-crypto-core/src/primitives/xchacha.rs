//! XChaCha20-Poly1305 (24-byte nonce).
//!
//! `subkey = HChaCha20(key, nonce[0..16])`, then ChaCha20-Poly1305 with
//! `subkey` and the 12-byte nonce `[0, 0, 0, 0] || nonce[16..24]`. The
//! subkey lives in a [`SecretBytes`] and is wiped before returning.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use crate::primitives::aead::{aead_open, aead_seal, KEY_LEN, NONCE_LEN};
use crate::primitives::hchacha::{hchacha20, HCHACHA_NONCE_LEN};

/// XChaCha20 nonce length in bytes (192 bits).
pub const XNONCE_LEN: usize = 24;

/// XChaCha20-Poly1305 encrypt.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if `key` is not 32 bytes or
/// `nonce` is not 24 bytes.
pub fn xchacha_seal(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let (key, hnonce, inner) = split_inputs(key, nonce)?;
    let subkey = hchacha20(key, hnonce);
    aead_seal(subkey.expose(), &inner, plaintext, aad)
}

/// XChaCha20-Poly1305 decrypt.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` for a bad key or nonce, and
/// `CryptoError::AuthenticationFailure` if the tag does not verify.
pub fn xchacha_open(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<SecretBuffer, CryptoError> {
    let (key, hnonce, inner) = split_inputs(key, nonce)?;
    let subkey = hchacha20(key, hnonce);
    aead_open(subkey.expose(), &inner, ciphertext, aad)
}

type XChaChaInputs<'a> = (
    &'a [u8; KEY_LEN],
    &'a [u8; HCHACHA_NONCE_LEN],
    [u8; NONCE_LEN],
);

fn split_inputs<'a>(key: &'a [u8], nonce: &'a [u8]) -> Result<XChaChaInputs<'a>, CryptoError> {
    let key: &[u8; KEY_LEN] = key
        .try_into()
        .map_err(|_| CryptoError::length("XChaCha20 key", KEY_LEN, key.len()))?;
    if nonce.len() != XNONCE_LEN {
        return Err(CryptoError::length("XChaCha20 nonce", XNONCE_LEN, nonce.len()));
    }
    let (head, tail) = nonce.split_at(HCHACHA_NONCE_LEN);
    let hnonce: &[u8; HCHACHA_NONCE_LEN] = head
        .try_into()
        .map_err(|_| CryptoError::length("XChaCha20 nonce", XNONCE_LEN, nonce.len()))?;
    let mut inner = [0u8; NONCE_LEN];
    inner[4..].copy_from_slice(tail);
    Ok((key, hnonce, inner))
}
