//! Live sessions keyed by server-issued id.
//!
//! Incoming messages are routed by the session id they carry. Logging out
//! or purging consumes the [`Session`], which wipes its key.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use vettid_crypto_core::memory::SecretBuffer;
use vettid_crypto_core::{Session, SessionHandshake, SessionMessage};

use crate::error::ConnectionError;

/// Sessions owned by this client.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
    ttl: Duration,
}

impl SessionRegistry {
    /// Empty registry; new sessions live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Finish `handshake` with the server's answer and register the session.
    /// An existing session with the same id is replaced and cleared.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Config` if the configured ttl puts the
    /// expiry past what `SystemTime` can represent, or the handshake's
    /// crypto error for a malformed or low-order peer key.
    pub fn establish(
        &mut self,
        handshake: SessionHandshake,
        session_id: &str,
        peer_public: &[u8],
    ) -> Result<SystemTime, ConnectionError> {
        let expires_at = SystemTime::now()
            .checked_add(self.ttl)
            .ok_or_else(|| ConnectionError::Config("session ttl overflows the clock".into()))?;
        self.establish_until(handshake, session_id, peer_public, expires_at)?;
        Ok(expires_at)
    }

    /// [`Self::establish`] with a server-dictated expiry.
    ///
    /// # Errors
    ///
    /// Same as [`Self::establish`].
    pub fn establish_until(
        &mut self,
        handshake: SessionHandshake,
        session_id: &str,
        peer_public: &[u8],
        expires_at: SystemTime,
    ) -> Result<(), ConnectionError> {
        let session = handshake.complete(session_id, peer_public, expires_at)?;
        if let Some(previous) = self.sessions.insert(session_id.to_owned(), session) {
            tracing::debug!(session_id, "replaced existing session");
            previous.clear();
        }
        Ok(())
    }

    /// Encrypt under the named session.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownSession` if no such session is
    /// registered, or the session's own error (for example expiry).
    pub fn encrypt(
        &self,
        session_id: &str,
        plaintext: &[u8],
    ) -> Result<SessionMessage, ConnectionError> {
        Ok(self.get(session_id)?.encrypt(plaintext)?)
    }

    /// Decrypt a message with the session it names.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::UnknownSession` if the message names no
    /// registered session, or the session's own error.
    pub fn decrypt(&self, message: &SessionMessage) -> Result<SecretBuffer, ConnectionError> {
        Ok(self.get(&message.session_id)?.decrypt(message)?)
    }

    /// Remove and clear a session. Returns whether it existed.
    pub fn logout(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some_and(|session| {
            session.clear();
            true
        })
    }

    /// Drop every session that has expired. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(SystemTime::now())
    }

    /// [`Self::purge_expired`] against an explicit clock reading.
    pub fn purge_expired_at(&mut self, now: SystemTime) -> usize {
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, session)| !session.is_valid_at(now))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            if let Some(session) = self.sessions.remove(id) {
                session.clear();
            }
        }
        if !expired.is_empty() {
            tracing::debug!(purged = expired.len(), "purged expired sessions");
        }
        expired.len()
    }

    /// Whether `session_id` is registered (expired or not).
    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn get(&self, session_id: &str) -> Result<&Session, ConnectionError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| ConnectionError::UnknownSession(session_id.to_owned()))
    }
}
