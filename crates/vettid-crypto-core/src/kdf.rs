//! HKDF-SHA256 key derivation with typed domain separation.
//!
//! This module provides:
//! - [`derive_key`]: raw HKDF-SHA256 (extract with `salt`, expand with `info`)
//! - [`derive_with_context`]: convention (a): fixed [`CONTEXT_SALT`], caller `info`
//! - [`derive_with_domain`]: convention (b): caller domain as salt, empty `info`
//! - [`derive_for_context`] / [`derive_for_domain`]: the same, producing a
//!   [`DerivedKey<P>`] tagged with its purpose type
//!
//! # Conventions
//!
//! Both conventions end in the same HKDF call with the string in a
//! different argument slot. [`KeyContext`] and [`DomainSalt`] are distinct
//! newtypes and purpose markers implement exactly one of [`ContextPurpose`]
//! or [`DomainPurpose`], so a key derived one way cannot be passed where the
//! other is expected.

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use crate::primitives::agreement::SharedSecret;
use ring::hkdf;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Derived key length in bytes (256 bits).
pub const DERIVED_KEY_LEN: usize = 32;

/// Fixed salt shared by every convention-(a) derivation on every platform.
pub const CONTEXT_SALT: &[u8] = b"VettID-HKDF-Salt-v1";

/// Marker type for `ring::hkdf::Prk::expand`; requests 32-byte output.
struct HkdfLen32;

impl hkdf::KeyType for HkdfLen32 {
    fn len(&self) -> usize {
        DERIVED_KEY_LEN
    }
}

// ---------------------------------------------------------------------------
// Context / domain newtypes
// ---------------------------------------------------------------------------

/// Convention (a) `info` string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyContext(Cow<'static, [u8]>);

impl KeyContext {
    /// Compile-time context.
    #[must_use]
    pub const fn new(info: &'static str) -> Self {
        Self(Cow::Borrowed(info.as_bytes()))
    }

    /// Context assembled at runtime.
    #[must_use]
    pub fn owned(info: impl Into<Vec<u8>>) -> Self {
        Self(Cow::Owned(info.into()))
    }

    /// Raw bytes fed to HKDF-Expand.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Convention (b) domain string, used as the HKDF salt.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomainSalt(Cow<'static, [u8]>);

impl DomainSalt {
    /// Compile-time domain.
    #[must_use]
    pub const fn new(domain: &'static str) -> Self {
        Self(Cow::Borrowed(domain.as_bytes()))
    }

    /// Domain assembled at runtime.
    #[must_use]
    pub fn owned(domain: impl Into<Vec<u8>>) -> Self {
        Self(Cow::Owned(domain.into()))
    }

    /// Raw bytes fed to HKDF-Extract.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Purpose-tagged keys
// ---------------------------------------------------------------------------

/// A purpose derived with convention (a).
pub trait ContextPurpose {
    /// The HKDF `info` string for this purpose.
    const CONTEXT: KeyContext;
}

/// A purpose derived with convention (b).
pub trait DomainPurpose {
    /// The HKDF salt for this purpose.
    const DOMAIN: DomainSalt;
}

/// A 32-byte key bound to purpose `P`.
///
/// Only constructible through [`derive_for_context`] or
/// [`derive_for_domain`], so `DerivedKey<A>` can never be produced from
/// `B`'s context string.
pub struct DerivedKey<P> {
    key: SecretBytes<DERIVED_KEY_LEN>,
    _purpose: PhantomData<fn() -> P>,
}

impl<P> DerivedKey<P> {
    const fn wrap(key: SecretBytes<DERIVED_KEY_LEN>) -> Self {
        Self {
            key,
            _purpose: PhantomData,
        }
    }

    /// Key bytes for the AEAD call.
    #[must_use]
    pub const fn expose(&self) -> &[u8; DERIVED_KEY_LEN] {
        self.key.expose()
    }

    /// Constant-time comparison with another key of the same purpose.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.key.ct_eq(&other.key)
    }
}

impl<P> fmt::Debug for DerivedKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey<{}>(***)", std::any::type_name::<P>())
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// HKDF-SHA256 extract-then-expand to 32 bytes.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if `ring` refuses the expansion
/// (not reachable for a 32-byte output).
pub fn derive_key(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<SecretBytes<DERIVED_KEY_LEN>, CryptoError> {
    let prk = hkdf::Salt::new(hkdf::HKDF_SHA256, salt).extract(ikm);
    let info_parts = [info];
    let okm = prk
        .expand(&info_parts, HkdfLen32)
        .map_err(|_| CryptoError::KeyDerivation("HKDF-SHA256 expand failed".into()))?;
    let mut out = SecretBytes::<DERIVED_KEY_LEN>::zeroed();
    okm.fill(out.expose_mut())
        .map_err(|_| CryptoError::KeyDerivation("HKDF-SHA256 fill failed".into()))?;
    Ok(out)
}

/// Convention (a): fixed salt, `context` as info.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if HKDF fails.
pub fn derive_with_context(
    secret: &SharedSecret,
    context: &KeyContext,
) -> Result<SecretBytes<DERIVED_KEY_LEN>, CryptoError> {
    derive_key(secret.expose(), CONTEXT_SALT, context.as_bytes())
}

/// Convention (b): `domain` as salt, empty info.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if HKDF fails.
pub fn derive_with_domain(
    secret: &SharedSecret,
    domain: &DomainSalt,
) -> Result<SecretBytes<DERIVED_KEY_LEN>, CryptoError> {
    derive_key(secret.expose(), domain.as_bytes(), &[])
}

/// Derive the key for a convention-(a) purpose.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if HKDF fails.
pub fn derive_for_context<P: ContextPurpose>(
    secret: &SharedSecret,
) -> Result<DerivedKey<P>, CryptoError> {
    derive_with_context(secret, &P::CONTEXT).map(DerivedKey::wrap)
}

/// Derive the key for a convention-(b) purpose.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if HKDF fails.
pub fn derive_for_domain<P: DomainPurpose>(
    secret: &SharedSecret,
) -> Result<DerivedKey<P>, CryptoError> {
    derive_with_domain(secret, &P::DOMAIN).map(DerivedKey::wrap)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
