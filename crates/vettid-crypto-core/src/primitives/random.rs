//! CSPRNG access.
//!
//! All randomness in the crate comes from `OsRng` (the operating system's
//! `getrandom` source). A failing entropy source is reported as
//! [`CryptoError::EntropyUnavailable`] where the caller can receive an error;
//! key generation treats it as fatal.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Return `n` bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns `CryptoError::EntropyUnavailable` if the OS source fails.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut out = vec![0u8; n];
    fill_random(&mut out)?;
    Ok(out)
}

/// Fill `buf` from the OS CSPRNG.
///
/// # Errors
///
/// Returns `CryptoError::EntropyUnavailable` if the OS source fails.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::EntropyUnavailable(format!("OsRng: {e}")))
}

/// Fixed-size random array (nonces, salts).
///
/// # Errors
///
/// Returns `CryptoError::EntropyUnavailable` if the OS source fails.
pub fn random_array<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    fill_random(&mut out)?;
    Ok(out)
}
