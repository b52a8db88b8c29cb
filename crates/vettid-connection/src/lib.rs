//! `vettid-connection`: client-side connection and session management.
//!
//! Composes `vettid-crypto-core` with an injected [`KeyStore`]:
//! persistent per-connection keys, a registry of live sessions, AEAD
//! backend selection, and JSON configuration.
//!
//! [`KeyStore`]: vettid_crypto_core::KeyStore

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod backend;
pub mod config;
pub mod connection;
pub mod error;
pub mod keystore;
pub mod registry;

pub use backend::{select_aead, AeadPreference, Aes256Gcm, PlatformCapabilities};
pub use config::ConnectionConfig;
pub use connection::{ConnectionCrypto, ConnectionKey, ConnectionMessage};
pub use error::ConnectionError;
pub use keystore::MemoryKeyStore;
pub use registry::SessionRegistry;
