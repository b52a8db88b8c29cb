//! Keystore-backed persistent connection keys.
//!
//! Each connection owns one long-lived X25519 key pair; the private half
//! lives only in the injected [`KeyStore`] and is loaded for the duration
//! of a single call. Messages use a static-static ECDH with the peer's
//! long-lived public key:
//!
//! ```text
//! shared  = X25519(own_private, peer_public)
//! key     = HKDF-SHA256(shared, CONTEXT_SALT, "vettid-connection-v1")
//! message = AEAD(key, random 12-byte nonce, plaintext, aad = connection_id)
//! ```

use serde::{Deserialize, Serialize};
use vettid_crypto_core::kdf::{derive_for_context, ContextPurpose, DerivedKey, KeyContext};
use vettid_crypto_core::memory::SecretBuffer;
use vettid_crypto_core::primitives::aead::NONCE_LEN;
use vettid_crypto_core::primitives::random::random_array;
use vettid_crypto_core::{
    generate_agreement_keypair, generate_salt, load_agreement_key, seal_password,
    store_agreement_key, Aead, AgreementPrivateKey, AgreementPublicKey, EnvelopeProtocol,
    HybridEnvelope, KeyStore, PasswordDigest,
};

use crate::backend::{select_aead, PlatformCapabilities};
use crate::config::ConnectionConfig;
use crate::error::ConnectionError;

/// Connection message key purpose.
#[derive(Debug)]
pub struct ConnectionKey;

impl ContextPurpose for ConnectionKey {
    const CONTEXT: KeyContext = KeyContext::new("vettid-connection-v1");
}

/// One encrypted message on a connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMessage {
    /// Random 12-byte nonce.
    pub nonce: [u8; NONCE_LEN],
    /// AEAD output, tag appended.
    pub ciphertext: Vec<u8>,
}

/// Per-connection crypto over a key store.
pub struct ConnectionCrypto<K: KeyStore> {
    store: K,
    config: ConnectionConfig,
    aead: Box<dyn Aead>,
}

impl<K: KeyStore> ConnectionCrypto<K> {
    /// Build with the AEAD chosen from `config` and the running CPU.
    #[must_use]
    pub fn new(store: K, config: ConnectionConfig) -> Self {
        let aead = select_aead(PlatformCapabilities::detect(), config.aead);
        Self::with_aead(store, config, aead)
    }

    /// Build with an explicit AEAD backend.
    #[must_use]
    pub fn with_aead(store: K, config: ConnectionConfig, aead: Box<dyn Aead>) -> Self {
        Self {
            store,
            config,
            aead,
        }
    }

    /// Name of the AEAD in use.
    #[must_use]
    pub fn aead_name(&self) -> &'static str {
        self.aead.name()
    }

    /// The underlying key store.
    #[must_use]
    pub const fn store(&self) -> &K {
        &self.store
    }

    /// Generate and store a key pair for a new connection.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::ConnectionExists` if the id already has a
    /// key, or the key store's error.
    pub fn create_connection(
        &mut self,
        connection_id: &str,
    ) -> Result<AgreementPublicKey, ConnectionError> {
        let alias = self.config.key_alias(connection_id);
        if self.store.get(&alias)?.is_some() {
            return Err(ConnectionError::ConnectionExists(connection_id.to_owned()));
        }
        let keypair = generate_agreement_keypair();
        store_agreement_key(&mut self.store, &alias, &keypair.private)?;
        tracing::info!(connection_id, "connection created");
        Ok(keypair.public)
    }

    /// Public key to share with the peer.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownConnection` if no key is stored.
    pub fn public_key(&self, connection_id: &str) -> Result<AgreementPublicKey, ConnectionError> {
        Ok(self.private_key(connection_id)?.public_key())
    }

    /// Encrypt `plaintext` for the peer's long-lived `peer_public` key.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownConnection` if no key is stored,
    /// and crypto errors for a malformed or low-order peer key.
    pub fn encrypt_message(
        &self,
        connection_id: &str,
        peer_public: &[u8],
        plaintext: &[u8],
    ) -> Result<ConnectionMessage, ConnectionError> {
        let key = self.message_key(connection_id, peer_public)?;
        let nonce = random_array::<NONCE_LEN>()?;
        let ciphertext = self
            .aead
            .seal(key.expose(), &nonce, plaintext, connection_id.as_bytes())?;
        Ok(ConnectionMessage { nonce, ciphertext })
    }

    /// Decrypt a message from the peer.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownConnection` if no key is stored, and
    /// `CryptoError::AuthenticationFailure` (wrapped) if the message was not
    /// sealed for this connection with this peer.
    pub fn decrypt_message(
        &self,
        connection_id: &str,
        peer_public: &[u8],
        message: &ConnectionMessage,
    ) -> Result<SecretBuffer, ConnectionError> {
        let key = self.message_key(connection_id, peer_public)?;
        let plaintext = self.aead.open(
            key.expose(),
            &message.nonce,
            &message.ciphertext,
            connection_id.as_bytes(),
        )?;
        Ok(plaintext)
    }

    /// Replace the connection's key pair. Messages sealed under the old key
    /// can no longer be opened.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownConnection` if no key is stored.
    pub fn rotate(&mut self, connection_id: &str) -> Result<AgreementPublicKey, ConnectionError> {
        let alias = self.config.key_alias(connection_id);
        if self.store.get(&alias)?.is_none() {
            return Err(ConnectionError::UnknownConnection(connection_id.to_owned()));
        }
        let keypair = generate_agreement_keypair();
        store_agreement_key(&mut self.store, &alias, &keypair.private)?;
        tracing::debug!(connection_id, "connection key rotated");
        Ok(keypair.public)
    }

    /// Remove the connection's key.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownConnection` if no key was stored.
    pub fn delete_connection(&mut self, connection_id: &str) -> Result<(), ConnectionError> {
        let alias = self.config.key_alias(connection_id);
        if !self.store.delete(&alias)? {
            return Err(ConnectionError::UnknownConnection(connection_id.to_owned()));
        }
        tracing::info!(connection_id, "connection deleted");
        Ok(())
    }

    /// Argon2id digest of `password` under the configured tier, with a
    /// fresh salt.
    ///
    /// # Errors
    ///
    /// Returns entropy and Argon2id failures from the core.
    pub fn hash_password(&self, password: &[u8]) -> Result<PasswordDigest, ConnectionError> {
        let salt = generate_salt()?;
        let digest = PasswordDigest::compute(password, &salt, self.config.password_tier)?;
        tracing::debug!(tier = ?self.config.password_tier, "password hashed");
        Ok(digest)
    }

    /// Hash `password` under the configured tier and seal its PHC string to
    /// `recipient_public` under protocol `P`.
    ///
    /// # Errors
    ///
    /// Returns hashing errors, and crypto errors for a malformed or
    /// low-order recipient key.
    pub fn seal_password<P: EnvelopeProtocol>(
        &self,
        password: &[u8],
        recipient_public: &[u8],
    ) -> Result<HybridEnvelope, ConnectionError> {
        let salt = generate_salt()?;
        Ok(seal_password::<P>(
            password,
            &salt,
            self.config.password_tier,
            recipient_public,
        )?)
    }

    fn private_key(&self, connection_id: &str) -> Result<AgreementPrivateKey, ConnectionError> {
        load_agreement_key(&self.store, &self.config.key_alias(connection_id))?
            .ok_or_else(|| ConnectionError::UnknownConnection(connection_id.to_owned()))
    }

    fn message_key(
        &self,
        connection_id: &str,
        peer_public: &[u8],
    ) -> Result<DerivedKey<ConnectionKey>, ConnectionError> {
        let peer = AgreementPublicKey::from_slice(peer_public)?;
        let private = self.private_key(connection_id)?;
        let shared = private.agree(&peer)?;
        Ok(derive_for_context::<ConnectionKey>(&shared)?)
    }
}

impl<K: KeyStore> std::fmt::Debug for ConnectionCrypto<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionCrypto")
            .field("aead", &self.aead.name())
            .field("key_alias_prefix", &self.config.key_alias_prefix)
            .finish_non_exhaustive()
    }
}
