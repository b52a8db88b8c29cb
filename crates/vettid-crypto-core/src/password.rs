//! Password hashing and submission.
//!
//! This module provides:
//! - [`hash_password`]: Argon2id with the default (interactive) tier
//! - [`PasswordDigest`]: digest + salt + tier, ready for verification or PHC
//! - [`format_phc`] / [`verify_phc`]: PHC string interop
//! - [`generate_salt`]: 16 random bytes
//! - [`seal_password`]: hash, format as PHC, and seal to a recipient key
//!
//! Parameters are versioned tiers ([`PasswordParams`]), never free input.
//! Verification recomputes and compares in constant time.

use crate::envelope::{encrypt_to, EnvelopeProtocol, HybridEnvelope};
use crate::error::CryptoError;
use crate::memory::{ct_eq, SecretBytes};
use crate::primitives::argon2id::{self, Argon2idParams, OUTPUT_LEN};
use crate::primitives::random::random_array;
use data_encoding::BASE64_NOPAD;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = OUTPUT_LEN;

/// Argon2 version number written into PHC strings (0x13).
const PHC_VERSION: u32 = 19;

// ---------------------------------------------------------------------------
// Parameter tiers
// ---------------------------------------------------------------------------

/// Versioned Argon2id parameter tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordParams {
    /// 64 MiB, 3 iterations, 4 lanes.
    #[default]
    Interactive,
    /// 19 MiB, 2 iterations, 1 lane, for devices that cannot allocate the
    /// interactive tier.
    LowMemory,
}

impl PasswordParams {
    /// Concrete Argon2id costs for this tier.
    #[must_use]
    pub const fn argon2(self) -> Argon2idParams {
        match self {
            Self::Interactive => Argon2idParams {
                m_cost: 65_536,
                t_cost: 3,
                p_cost: 4,
            },
            Self::LowMemory => Argon2idParams {
                m_cost: 19_456,
                t_cost: 2,
                p_cost: 1,
            },
        }
    }

    /// Map a parsed cost set back to its tier.
    #[must_use]
    pub fn from_argon2(params: &Argon2idParams) -> Option<Self> {
        [Self::Interactive, Self::LowMemory]
            .into_iter()
            .find(|tier| tier.argon2() == *params)
    }
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Argon2id output with the inputs needed to recompute it.
pub struct PasswordDigest {
    digest: SecretBytes<DIGEST_LEN>,
    salt: [u8; SALT_LEN],
    params: PasswordParams,
}

impl PasswordDigest {
    /// Hash `password` with `salt` under `params`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` unless `salt` is 16 bytes,
    /// and `CryptoError::Argon2Failure` if Argon2id fails.
    pub fn compute(
        password: &[u8],
        salt: &[u8],
        params: PasswordParams,
    ) -> Result<Self, CryptoError> {
        let salt: [u8; SALT_LEN] = salt
            .try_into()
            .map_err(|_| CryptoError::length("password salt", SALT_LEN, salt.len()))?;
        let digest = argon2id::derive(password, &salt, &params.argon2())?;
        Ok(Self {
            digest,
            salt,
            params,
        })
    }

    /// Raw 32-byte digest.
    #[must_use]
    pub const fn expose(&self) -> &[u8; DIGEST_LEN] {
        self.digest.expose()
    }

    /// Salt used.
    #[must_use]
    pub const fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Tier used.
    #[must_use]
    pub const fn params(&self) -> PasswordParams {
        self.params
    }

    /// Recompute with `password` and compare in constant time.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Argon2Failure` if recomputation fails.
    pub fn verify(&self, password: &[u8]) -> Result<bool, CryptoError> {
        let candidate = Self::compute(password, &self.salt, self.params)?;
        Ok(self.digest.ct_eq(&candidate.digest))
    }

    /// `$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`, base64 without padding.
    #[must_use]
    pub fn to_phc(&self) -> String {
        let p = self.params.argon2();
        format!(
            "$argon2id$v={PHC_VERSION}$m={},t={},p={}${}${}",
            p.m_cost,
            p.t_cost,
            p.p_cost,
            BASE64_NOPAD.encode(&self.salt),
            BASE64_NOPAD.encode(self.digest.expose()),
        )
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("params", &self.params)
            .field("digest", &"***")
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// 16 random bytes for a new password hash.
///
/// # Errors
///
/// Returns `CryptoError::EntropyUnavailable` if the CSPRNG fails.
pub fn generate_salt() -> Result<[u8; SALT_LEN], CryptoError> {
    random_array()
}

/// Argon2id over `password` and a 16-byte `salt`, interactive tier.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` for a bad salt and
/// `CryptoError::Argon2Failure` if Argon2id fails.
pub fn hash_password(
    password: &[u8],
    salt: &[u8],
) -> Result<SecretBytes<DIGEST_LEN>, CryptoError> {
    let digest = PasswordDigest::compute(password, salt, PasswordParams::Interactive)?;
    Ok(digest.digest)
}

/// PHC string for `password` and `salt`, interactive tier.
///
/// # Errors
///
/// Same as [`hash_password`].
pub fn format_phc(password: &[u8], salt: &[u8]) -> Result<String, CryptoError> {
    PasswordDigest::compute(password, salt, PasswordParams::Interactive).map(|d| d.to_phc())
}

/// Check `password` against a PHC string produced by [`format_phc`].
///
/// Only the known tiers are accepted; an unrecognized cost set is an
/// encoding error rather than an attacker-chosen Argon2 workload.
///
/// # Errors
///
/// Returns `CryptoError::Encoding` for a malformed or unsupported PHC
/// string, and `CryptoError::Argon2Failure` if recomputation fails.
pub fn verify_phc(password: &[u8], phc: &str) -> Result<bool, CryptoError> {
    let parsed = parse_phc(phc)?;
    let candidate = PasswordDigest::compute(password, &parsed.salt, parsed.params)?;
    Ok(ct_eq(candidate.expose(), &parsed.hash))
}

/// Hash `password`, format it as PHC, and seal the string to
/// `recipient_public` under protocol `P`.
///
/// # Errors
///
/// Propagates hashing and envelope errors.
pub fn seal_password<P: EnvelopeProtocol>(
    password: &[u8],
    salt: &[u8],
    params: PasswordParams,
    recipient_public: &[u8],
) -> Result<HybridEnvelope, CryptoError> {
    let phc = Zeroizing::new(PasswordDigest::compute(password, salt, params)?.to_phc());
    encrypt_to::<P>(phc.as_bytes(), recipient_public)
}

// ---------------------------------------------------------------------------
// PHC parsing
// ---------------------------------------------------------------------------

struct ParsedPhc {
    params: PasswordParams,
    salt: Vec<u8>,
    hash: Zeroizing<Vec<u8>>,
}

fn parse_phc(phc: &str) -> Result<ParsedPhc, CryptoError> {
    let malformed = || CryptoError::Encoding("malformed PHC string".into());

    let mut fields = phc.split('$');
    if fields.next() != Some("") || fields.next() != Some("argon2id") {
        return Err(CryptoError::Encoding("PHC algorithm is not argon2id".into()));
    }
    if fields.next() != Some("v=19") {
        return Err(CryptoError::Encoding("unsupported argon2 version".into()));
    }
    let costs = fields.next().ok_or_else(malformed)?;
    let salt = fields.next().ok_or_else(malformed)?;
    let hash = fields.next().ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    let mut m_cost = None;
    let mut t_cost = None;
    let mut p_cost = None;
    for pair in costs.split(',') {
        let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
        let value: u32 = value.parse().map_err(|_| malformed())?;
        match key {
            "m" => m_cost = Some(value),
            "t" => t_cost = Some(value),
            "p" => p_cost = Some(value),
            _ => return Err(malformed()),
        }
    }
    let argon2 = Argon2idParams {
        m_cost: m_cost.ok_or_else(malformed)?,
        t_cost: t_cost.ok_or_else(malformed)?,
        p_cost: p_cost.ok_or_else(malformed)?,
    };
    let params = PasswordParams::from_argon2(&argon2)
        .ok_or_else(|| CryptoError::Encoding("unsupported argon2id parameters".into()))?;

    let salt = BASE64_NOPAD
        .decode(salt.as_bytes())
        .map_err(|e| CryptoError::Encoding(format!("PHC salt: {e}")))?;
    let hash = Zeroizing::new(
        BASE64_NOPAD
            .decode(hash.as_bytes())
            .map_err(|e| CryptoError::Encoding(format!("PHC hash: {e}")))?,
    );
    if hash.len() != DIGEST_LEN {
        return Err(CryptoError::length("PHC hash", DIGEST_LEN, hash.len()));
    }

    Ok(ParsedPhc { params, salt, hash })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
