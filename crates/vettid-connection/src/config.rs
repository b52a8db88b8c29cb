//! Connection-layer configuration, stored as JSON.
//!
//! Every field has a default, so a partial file (or none at all) yields a
//! usable configuration. Values that parse but make no sense, such as a
//! zero TTL, are rejected.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vettid_crypto_core::PasswordParams;

use crate::backend::AeadPreference;
use crate::error::ConnectionError;

/// Connection and session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Cipher for connection messages.
    #[serde(default)]
    pub aead: AeadPreference,

    /// Prefix prepended to connection ids to form keystore aliases.
    #[serde(default = "default_key_alias_prefix")]
    pub key_alias_prefix: String,

    /// Lifetime of newly established sessions, in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Argon2id tier for password hashing.
    #[serde(default)]
    pub password_tier: PasswordParams,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            aead: AeadPreference::default(),
            key_alias_prefix: default_key_alias_prefix(),
            session_ttl_secs: default_session_ttl_secs(),
            password_tier: PasswordParams::default(),
        }
    }
}

fn default_key_alias_prefix() -> String {
    "vettid.connection.".into()
}
const fn default_session_ttl_secs() -> u64 {
    3600
}

impl ConnectionConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Config` for malformed JSON, unknown enum
    /// values, or values rejected by [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConnectionError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConnectionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Io` if the file exists but cannot be read,
    /// and `ConnectionError::Config` if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, ConnectionError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no connection config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to `path` atomically (temp file, then rename).
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Io` if the write or rename fails.
    pub fn save(&self, path: &Path) -> Result<(), ConnectionError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConnectionError::Config(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Reject values that deserialize but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Config` for an empty alias prefix or a
    /// zero session TTL.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.key_alias_prefix.is_empty() {
            return Err(ConnectionError::Config(
                "key_alias_prefix must not be empty".into(),
            ));
        }
        if self.session_ttl_secs == 0 {
            return Err(ConnectionError::Config(
                "session_ttl_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Session lifetime as a `Duration`.
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Keystore alias for a connection id.
    #[must_use]
    pub fn key_alias(&self, connection_id: &str) -> String {
        format!("{}{connection_id}", self.key_alias_prefix)
    }
}
