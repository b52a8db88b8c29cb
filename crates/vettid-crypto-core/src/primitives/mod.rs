//! Primitive layer: X25519, Ed25519, AEAD, XChaCha20, Argon2id, CSPRNG.

pub mod aead;
pub mod agreement;
pub mod argon2id;
pub mod hchacha;
pub mod random;
pub mod signing;
pub mod xchacha;

use agreement::{AgreementKeyPair, X25519_KEY_LEN};
use signing::SigningKeyPair;

/// Either kind of asymmetric key pair the engine handles.
#[derive(Debug)]
pub enum KeyPair {
    /// X25519 key agreement.
    Agreement(AgreementKeyPair),
    /// Ed25519 signing.
    Signing(SigningKeyPair),
}

impl KeyPair {
    /// The 32-byte public half, whichever kind this is.
    #[must_use]
    pub const fn public_bytes(&self) -> &[u8; X25519_KEY_LEN] {
        match self {
            Self::Agreement(kp) => kp.public.as_bytes(),
            Self::Signing(kp) => kp.public.as_bytes(),
        }
    }

    /// Algorithm label for logs and wire metadata.
    #[must_use]
    pub const fn algorithm(&self) -> &'static str {
        match self {
            Self::Agreement(_) => "X25519",
            Self::Signing(_) => "Ed25519",
        }
    }
}

impl From<AgreementKeyPair> for KeyPair {
    fn from(kp: AgreementKeyPair) -> Self {
        Self::Agreement(kp)
    }
}

impl From<SigningKeyPair> for KeyPair {
    fn from(kp: SigningKeyPair) -> Self {
        Self::Signing(kp)
    }
}
