//! Session protocol: one ECDH handshake, many AEAD messages.
//!
//! Lifecycle:
//! - [`SessionHandshake`] holds this side's ephemeral key pair before the
//!   peer has answered.
//! - [`Session::from_key_exchange`] (or [`SessionHandshake::complete`])
//!   computes ECDH, derives the session key, and wipes the ephemeral
//!   private key and the shared secret.
//! - A session is usable while `now < expires_at`. Expiry is checked on
//!   every call, never cached.
//! - [`Session::clear`] consumes the session and wipes its key.
//!
//! Messages are XChaCha20-Poly1305 with a random 24-byte nonce and the
//! session id as associated data. A message carrying another session's id
//! is refused before any decryption is attempted.

use crate::error::CryptoError;
use crate::kdf::{derive_for_context, ContextPurpose, DerivedKey, KeyContext};
use crate::memory::SecretBuffer;
use crate::primitives::agreement::{
    generate_agreement_keypair, AgreementKeyPair, AgreementPrivateKey, AgreementPublicKey,
};
use crate::primitives::random::random_array;
use crate::primitives::xchacha::{xchacha_open, xchacha_seal, XNONCE_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Session key purpose (convention (a)).
#[derive(Debug)]
pub struct SessionKey;

impl ContextPurpose for SessionKey {
    const CONTEXT: KeyContext = KeyContext::new("vettid-session-v1");
}

/// One encrypted message within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMessage {
    /// Id of the session the sender encrypted under.
    pub session_id: String,
    /// Random 24-byte nonce.
    pub nonce: [u8; XNONCE_LEN],
    /// XChaCha20-Poly1305 output, tag appended.
    pub ciphertext: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

/// The unestablished side of a handshake.
#[derive(Debug)]
pub struct SessionHandshake {
    keypair: AgreementKeyPair,
}

impl SessionHandshake {
    /// Generate this side's ephemeral key pair.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keypair: generate_agreement_keypair(),
        }
    }

    /// Public key to send to the peer.
    #[must_use]
    pub const fn public_key(&self) -> AgreementPublicKey {
        self.keypair.public
    }

    /// Finish the handshake with the peer's answer.
    ///
    /// # Errors
    ///
    /// See [`Session::from_key_exchange`].
    pub fn complete(
        self,
        session_id: impl Into<String>,
        peer_public: &[u8],
        expires_at: SystemTime,
    ) -> Result<Session, CryptoError> {
        let AgreementKeyPair { public, private } = self.keypair;
        Session::from_key_exchange(session_id, private, public, peer_public, expires_at)
    }
}

impl Default for SessionHandshake {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An established session.
pub struct Session {
    id: String,
    key: DerivedKey<SessionKey>,
    expires_at: SystemTime,
    public_key: AgreementPublicKey,
}

impl Session {
    /// Establish a session from a completed key exchange.
    ///
    /// Takes the ephemeral private key by value; it is wiped when this call
    /// returns, on success and on error.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` if `peer_public` is not 32
    /// bytes, and `CryptoError::InvalidKeyMaterial` if `own_public` does not
    /// belong to `own_ephemeral_private` or the peer key is low-order.
    pub fn from_key_exchange(
        session_id: impl Into<String>,
        own_ephemeral_private: AgreementPrivateKey,
        own_public: AgreementPublicKey,
        peer_public: &[u8],
        expires_at: SystemTime,
    ) -> Result<Self, CryptoError> {
        let peer = AgreementPublicKey::from_slice(peer_public)?;
        if own_ephemeral_private.public_key() != own_public {
            return Err(CryptoError::InvalidKeyMaterial(
                "own public key does not match the ephemeral private key".into(),
            ));
        }
        let key = {
            let shared = own_ephemeral_private.agree(&peer)?;
            derive_for_context::<SessionKey>(&shared)?
        };
        drop(own_ephemeral_private);

        let id = session_id.into();
        tracing::debug!(session_id = %id, "session established");
        Ok(Self {
            id,
            key,
            expires_at,
            public_key: own_public,
        })
    }

    /// Server-issued session id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// This side's agreement public key from the handshake.
    #[must_use]
    pub const fn public_key(&self) -> &AgreementPublicKey {
        &self.public_key
    }

    /// Absolute expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> SystemTime {
        self.expires_at
    }

    /// `true` while the wall clock is before `expires_at`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(SystemTime::now())
    }

    /// `true` if `now` is strictly before `expires_at`.
    #[must_use]
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }

    /// Time left before expiry, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.expires_at
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO)
    }

    /// Encrypt `plaintext` for the peer.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SessionExpired` once expired, or
    /// `CryptoError::EntropyUnavailable` if no nonce can be drawn.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<SessionMessage, CryptoError> {
        self.encrypt_at(plaintext, SystemTime::now())
    }

    /// [`Self::encrypt`] against an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Same as [`Self::encrypt`].
    pub fn encrypt_at(
        &self,
        plaintext: &[u8],
        now: SystemTime,
    ) -> Result<SessionMessage, CryptoError> {
        self.ensure_valid(now)?;
        let nonce = random_array::<XNONCE_LEN>()?;
        let ciphertext = xchacha_seal(self.key.expose(), &nonce, plaintext, self.id.as_bytes())?;
        Ok(SessionMessage {
            session_id: self.id.clone(),
            nonce,
            ciphertext,
        })
    }

    /// Decrypt a message from the peer.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SessionExpired` once expired,
    /// `CryptoError::SessionMismatch` if the message names another session,
    /// and `CryptoError::AuthenticationFailure` if the tag does not verify.
    pub fn decrypt(&self, message: &SessionMessage) -> Result<SecretBuffer, CryptoError> {
        self.decrypt_at(message, SystemTime::now())
    }

    /// [`Self::decrypt`] against an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Same as [`Self::decrypt`].
    pub fn decrypt_at(
        &self,
        message: &SessionMessage,
        now: SystemTime,
    ) -> Result<SecretBuffer, CryptoError> {
        self.ensure_valid(now)?;
        if message.session_id != self.id {
            tracing::debug!(
                session_id = %self.id,
                message_session_id = %message.session_id,
                "refusing message for another session"
            );
            return Err(CryptoError::SessionMismatch);
        }
        xchacha_open(
            self.key.expose(),
            &message.nonce,
            &message.ciphertext,
            self.id.as_bytes(),
        )
    }

    /// End the session and wipe its key.
    pub fn clear(self) {
        tracing::debug!(session_id = %self.id, "session cleared");
    }

    fn ensure_valid(&self, now: SystemTime) -> Result<(), CryptoError> {
        if self.is_valid_at(now) {
            Ok(())
        } else {
            tracing::debug!(session_id = %self.id, "session expired");
            Err(CryptoError::SessionExpired)
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("expires_at", &self.expires_at)
            .field("key", &"***")
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
