//! Injected secure-storage capability.
//!
//! The core never persists keys. Platforms implement [`KeyStore`] over
//! whatever hardware-backed store they have; the helpers here move X25519
//! private keys in and out without leaving plain copies behind.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use crate::primitives::agreement::AgreementPrivateKey;

/// Byte-oriented secure key storage, keyed by alias.
pub trait KeyStore {
    /// Fetch the key stored under `alias`, if any.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyStore` if the backing store fails.
    fn get(&self, alias: &str) -> Result<Option<SecretBuffer>, CryptoError>;

    /// Store `key` under `alias`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyStore` if the backing store fails.
    fn put(&mut self, alias: &str, key: &[u8]) -> Result<(), CryptoError>;

    /// Remove `alias`. Returns whether a key was present.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyStore` if the backing store fails.
    fn delete(&mut self, alias: &str) -> Result<bool, CryptoError>;
}

/// Load an X25519 private key stored under `alias`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if the stored value is not 32
/// bytes, or the store's own error.
pub fn load_agreement_key<K: KeyStore + ?Sized>(
    store: &K,
    alias: &str,
) -> Result<Option<AgreementPrivateKey>, CryptoError> {
    store
        .get(alias)?
        .map(|stored| AgreementPrivateKey::from_slice(stored.expose()))
        .transpose()
}

/// Store an X25519 private key under `alias`.
///
/// # Errors
///
/// Returns the store's error.
pub fn store_agreement_key<K: KeyStore + ?Sized>(
    store: &mut K,
    alias: &str,
    key: &AgreementPrivateKey,
) -> Result<(), CryptoError> {
    store.put(alias, key.expose())
}
