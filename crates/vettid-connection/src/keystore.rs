//! In-process [`KeyStore`] for tests and hosts without secure storage.
//!
//! Values are held in `Zeroizing` buffers and wiped on overwrite, delete
//! and drop. Nothing is persisted.

use std::collections::HashMap;

use vettid_crypto_core::memory::SecretBuffer;
use vettid_crypto_core::{CryptoError, KeyStore};
use zeroize::Zeroizing;

/// Heap-backed key store.
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: HashMap<String, Zeroizing<Vec<u8>>>,
}

impl MemoryKeyStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether a key is stored under `alias`.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.keys.contains_key(alias)
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, alias: &str) -> Result<Option<SecretBuffer>, CryptoError> {
        self.keys
            .get(alias)
            .map(|key| SecretBuffer::new(key))
            .transpose()
    }

    fn put(&mut self, alias: &str, key: &[u8]) -> Result<(), CryptoError> {
        self.keys
            .insert(alias.to_owned(), Zeroizing::new(key.to_vec()));
        Ok(())
    }

    fn delete(&mut self, alias: &str) -> Result<bool, CryptoError> {
        Ok(self.keys.remove(alias).is_some())
    }
}

impl std::fmt::Debug for MemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryKeyStore")
            .field("keys", &self.keys.len())
            .finish()
    }
}
