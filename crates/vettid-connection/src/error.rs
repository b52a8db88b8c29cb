//! Error types for `vettid-connection`.

use thiserror::Error;
use vettid_crypto_core::CryptoError;

/// Errors produced by connection and session management.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Cryptographic operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// No key is stored for this connection id.
    #[error("unknown connection: {0}")]
    UnknownConnection(String),

    /// A key is already stored for this connection id.
    #[error("connection already exists: {0}")]
    ConnectionExists(String),

    /// No live session with this id.
    #[error("unknown session: {0}")]
    UnknownSession(String),

    /// Configuration could not be parsed or holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
