//! Text encoding of envelopes and session messages for JSON transports.
//!
//! The peer expects a JSON object with standard-alphabet base64 fields:
//!
//! ```json
//! { "ciphertext": "...", "nonce": "...", "ephemeral_public_key": "...", "session_id": "..." }
//! ```
//!
//! `ephemeral_public_key` is present for hybrid envelopes, `session_id` for
//! session messages. Call sites differ on padding, so encoding takes a
//! [`Base64Style`] and decoding accepts both.

use crate::envelope::HybridEnvelope;
use crate::error::CryptoError;
use crate::primitives::agreement::X25519_KEY_LEN;
use crate::primitives::xchacha::XNONCE_LEN;
use crate::session::SessionMessage;
use data_encoding::{BASE64, BASE64_NOPAD};
use serde::{Deserialize, Serialize};

/// Base64 padding choice for outgoing fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base64Style {
    /// With `=` padding.
    #[default]
    Padded,
    /// Without padding.
    Unpadded,
}

/// Encode `bytes` in the standard base64 alphabet.
#[must_use]
pub fn encode_base64(bytes: &[u8], style: Base64Style) -> String {
    match style {
        Base64Style::Padded => BASE64.encode(bytes),
        Base64Style::Unpadded => BASE64_NOPAD.encode(bytes),
    }
}

/// Decode standard base64, padded or not.
///
/// # Errors
///
/// Returns `CryptoError::Encoding` if the input is not valid base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    let input = text.as_bytes();
    let decoded = if input.ends_with(b"=") {
        BASE64.decode(input)
    } else {
        BASE64_NOPAD.decode(input)
    };
    decoded.map_err(|e| CryptoError::Encoding(format!("base64: {e}")))
}

/// Transport bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBundle {
    /// Base64 ciphertext, tag appended.
    pub ciphertext: String,
    /// Base64 nonce.
    pub nonce: String,
    /// Base64 sender ephemeral key (envelopes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_public_key: Option<String>,
    /// Session id (session messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl WireBundle {
    /// Encode a hybrid envelope.
    #[must_use]
    pub fn from_envelope(envelope: &HybridEnvelope, style: Base64Style) -> Self {
        Self {
            ciphertext: encode_base64(&envelope.ciphertext, style),
            nonce: encode_base64(&envelope.nonce, style),
            ephemeral_public_key: Some(encode_base64(&envelope.ephemeral_public_key, style)),
            session_id: None,
        }
    }

    /// Decode into a hybrid envelope.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` if `ephemeral_public_key` is missing
    /// or a field is not base64, and `CryptoError::InvalidKeyLength` if the
    /// ephemeral key is not 32 bytes.
    pub fn to_envelope(&self) -> Result<HybridEnvelope, CryptoError> {
        let epk = self
            .ephemeral_public_key
            .as_deref()
            .ok_or_else(|| CryptoError::Encoding("missing ephemeral_public_key".into()))?;
        let epk = decode_base64(epk)?;
        let ephemeral_public_key: [u8; X25519_KEY_LEN] = epk.as_slice().try_into().map_err(|_| {
            CryptoError::length("ephemeral public key", X25519_KEY_LEN, epk.len())
        })?;
        Ok(HybridEnvelope {
            ciphertext: decode_base64(&self.ciphertext)?,
            nonce: decode_base64(&self.nonce)?,
            ephemeral_public_key,
        })
    }

    /// Encode a session message.
    #[must_use]
    pub fn from_session_message(message: &SessionMessage, style: Base64Style) -> Self {
        Self {
            ciphertext: encode_base64(&message.ciphertext, style),
            nonce: encode_base64(&message.nonce, style),
            ephemeral_public_key: None,
            session_id: Some(message.session_id.clone()),
        }
    }

    /// Decode into a session message.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` if `session_id` is missing or a field
    /// is not base64, and `CryptoError::InvalidKeyLength` if the nonce is
    /// not 24 bytes.
    pub fn to_session_message(&self) -> Result<SessionMessage, CryptoError> {
        let session_id = self
            .session_id
            .clone()
            .ok_or_else(|| CryptoError::Encoding("missing session_id".into()))?;
        let nonce = decode_base64(&self.nonce)?;
        let nonce: [u8; XNONCE_LEN] = nonce
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::length("session nonce", XNONCE_LEN, nonce.len()))?;
        Ok(SessionMessage {
            session_id,
            nonce,
            ciphertext: decode_base64(&self.ciphertext)?,
        })
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` if serialization fails.
    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self).map_err(|e| CryptoError::Encoding(format!("json: {e}")))
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(|e| CryptoError::Encoding(format!("json: {e}")))
    }
}
