//! Argon2id (RFC 9106, version 0x13) with a 32-byte output.
//!
//! Accepts any password length, including empty. Salts shorter than 16
//! bytes are rejected. Parameter sets are chosen by the password layer from
//! versioned tiers; this module only runs them.

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use serde::{Deserialize, Serialize};

/// Output length in bytes.
pub const OUTPUT_LEN: usize = 32;

/// Minimum salt length in bytes (stricter than argon2's 8).
pub const MIN_SALT_LEN: usize = 16;

/// Argon2id cost parameters.
///
/// Fields use the `argon2` crate convention:
/// - `m_cost`: memory in KiB
/// - `t_cost`: number of iterations
/// - `p_cost`: degree of parallelism
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argon2idParams {
    /// Memory cost in kibibytes.
    pub m_cost: u32,
    /// Number of iterations.
    pub t_cost: u32,
    /// Number of lanes.
    pub p_cost: u32,
}

/// Run Argon2id over `password` and `salt`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if the salt is shorter than 16
/// bytes, and `CryptoError::Argon2Failure` if `argon2` rejects the
/// parameters or the derivation fails.
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &Argon2idParams,
) -> Result<SecretBytes<OUTPUT_LEN>, CryptoError> {
    if salt.len() < MIN_SALT_LEN {
        return Err(CryptoError::length("Argon2id salt", MIN_SALT_LEN, salt.len()));
    }

    let argon2_params = argon2::Params::new(
        params.m_cost,
        params.t_cost,
        params.p_cost,
        Some(OUTPUT_LEN),
    )
    .map_err(|e| {
        tracing::warn!(
            m_cost = params.m_cost,
            t_cost = params.t_cost,
            p_cost = params.p_cost,
            "argon2id rejected parameters"
        );
        CryptoError::Argon2Failure(format!("invalid parameters: {e}"))
    })?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut output = SecretBytes::<OUTPUT_LEN>::zeroed();
    argon2
        .hash_password_into(password, salt, output.expose_mut())
        .map_err(|e| {
            tracing::warn!(m_cost = params.m_cost, "argon2id derivation failed");
            CryptoError::Argon2Failure(format!("derivation failed: {e}"))
        })?;
    Ok(output)
}
