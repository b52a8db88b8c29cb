//! AEAD backend selection.
//!
//! ```text
//! Aead (trait, vettid-crypto-core)
//! ├── ChaCha20Poly1305  (core default, constant-time in software)
//! └── Aes256Gcm         (preferred when the CPU has AES instructions)
//! ```
//!
//! Both peers of a connection must agree on the cipher; the preference is
//! a configuration value, and `Auto` only picks AES-GCM on hardware that
//! runs it in constant time.

use serde::{Deserialize, Serialize};
use vettid_crypto_core::memory::SecretBuffer;
use vettid_crypto_core::primitives::aead::{open_with, seal_with};
use vettid_crypto_core::{Aead, ChaCha20Poly1305, CryptoError};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// What the current CPU offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Hardware AES (AES-NI with PCLMULQDQ, or the ARMv8 crypto extension).
    pub aes_hardware: bool,
}

impl PlatformCapabilities {
    /// Probe the running CPU.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            aes_hardware: detect_aes_hardware(),
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_aes_hardware() -> bool {
    std::arch::is_x86_feature_detected!("aes") && std::arch::is_x86_feature_detected!("pclmulqdq")
}

#[cfg(target_arch = "aarch64")]
fn detect_aes_hardware() -> bool {
    std::arch::is_aarch64_feature_detected!("aes")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
const fn detect_aes_hardware() -> bool {
    false
}

// ---------------------------------------------------------------------------
// Preference
// ---------------------------------------------------------------------------

/// Configured cipher preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AeadPreference {
    /// AES-256-GCM with hardware AES, ChaCha20-Poly1305 otherwise.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// Always ChaCha20-Poly1305.
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    /// Always AES-256-GCM.
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
}

// ---------------------------------------------------------------------------
// AES-256-GCM adapter
// ---------------------------------------------------------------------------

/// AES-256-GCM through `ring`, same framing as the core AEAD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aes256Gcm;

impl Aead for Aes256Gcm {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn seal(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        seal_with(&ring::aead::AES_256_GCM, key, nonce, plaintext, aad)
    }

    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<SecretBuffer, CryptoError> {
        open_with(&ring::aead::AES_256_GCM, key, nonce, ciphertext, aad)
    }
}

/// Pick the AEAD for `preference` on a platform with `capabilities`.
#[must_use]
pub fn select_aead(
    capabilities: PlatformCapabilities,
    preference: AeadPreference,
) -> Box<dyn Aead> {
    let aead: Box<dyn Aead> = match preference {
        AeadPreference::ChaCha20Poly1305 => Box::new(ChaCha20Poly1305),
        AeadPreference::Aes256Gcm => Box::new(Aes256Gcm),
        AeadPreference::Auto if capabilities.aes_hardware => Box::new(Aes256Gcm),
        AeadPreference::Auto => Box::new(ChaCha20Poly1305),
    };
    tracing::debug!(
        backend = aead.name(),
        ?preference,
        aes_hardware = capabilities.aes_hardware,
        "selected AEAD backend"
    );
    aead
}
