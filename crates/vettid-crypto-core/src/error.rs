//! Cryptographic error types for `vettid-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Messages name the operation or algorithm involved and never include
/// key bytes, plaintext, or passwords.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Key, nonce, or salt has the wrong byte length for the primitive.
    #[error("invalid {what} length: {actual} bytes (expected {expected})")]
    InvalidKeyLength {
        /// Which input was rejected (e.g. "X25519 public key").
        what: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// AEAD tag verification failed: tampered data, wrong key, or wrong
    /// context. Deliberately carries no detail.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// The session's `expires_at` instant has been reached.
    #[error("session expired")]
    SessionExpired,

    /// A message addressed to a different session was presented.
    #[error("session mismatch")]
    SessionMismatch,

    /// The operating system CSPRNG could not produce bytes.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Argon2id rejected its parameters or could not allocate its memory.
    #[error("argon2id failure: {0}")]
    Argon2Failure(String),

    /// HKDF extract/expand failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Key material is well-sized but unusable (e.g. low-order X25519 point).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Ed25519 key reconstruction or signing failure.
    #[error("signature error: {0}")]
    Signature(String),

    /// Wire-format decoding failure (base64, JSON, PHC string).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Secure memory allocation failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),

    /// A keystore collaborator failed to get, put, or delete a key.
    #[error("keystore error: {0}")]
    KeyStore(String),
}

impl CryptoError {
    /// Shorthand for a length mismatch on `what`.
    #[must_use]
    pub const fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidKeyLength {
            what,
            expected,
            actual,
        }
    }
}
