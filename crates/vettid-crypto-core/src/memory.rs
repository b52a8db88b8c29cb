//! Containers for key material.
//!
//! [`SecretBuffer`] holds variable-length secrets (plaintexts, keys read
//! back from a [`KeyStore`](crate::KeyStore)), [`SecretBytes`] fixed-size
//! ones (private scalars, shared secrets, derived keys, HChaCha20
//! subkeys). Both wipe themselves on drop and print as `***`. Only the
//! heap buffer is pinned with `mlock`; a `SecretBytes` lives inline and
//! moves, so there is no stable address to pin.
//!
//! Code that needs a transient secret outside these types wraps it in
//! [`zeroize::Zeroizing`], so `?` and early returns still wipe it.

use crate::error::CryptoError;
use crate::primitives::random::fill_random;
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ---------------------------------------------------------------------------
// Page pinning
// ---------------------------------------------------------------------------

/// A best-effort `mlock` on one address range, released on drop.
///
/// Failing to lock (no privilege, `RLIMIT_MEMLOCK` exhausted) is not an
/// error; the first failure per process is logged once.
struct PagePin {
    addr: *const u8,
    len: usize,
    held: bool,
}

// SAFETY: `addr` is only handed to mlock/munlock and never dereferenced.
unsafe impl Send for PagePin {}
unsafe impl Sync for PagePin {}

impl PagePin {
    const NONE: Self = Self {
        addr: std::ptr::null(),
        len: 0,
        held: false,
    };

    fn over(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::NONE;
        }
        let held = sys::lock(bytes.as_ptr(), bytes.len());
        if !held {
            static ONCE: std::sync::Once = std::sync::Once::new();
            ONCE.call_once(|| {
                tracing::warn!(
                    len = bytes.len(),
                    "mlock refused; key material may reach swap (check RLIMIT_MEMLOCK)"
                );
            });
        }
        Self {
            addr: bytes.as_ptr(),
            len: bytes.len(),
            held,
        }
    }
}

impl Drop for PagePin {
    fn drop(&mut self) {
        if self.held {
            sys::unlock(self.addr, self.len);
        }
    }
}

// ---------------------------------------------------------------------------
// SecretBuffer
// ---------------------------------------------------------------------------

/// Heap secret of any length.
pub struct SecretBuffer {
    bytes: SecretSlice<u8>,
    pin: PagePin,
}

impl SecretBuffer {
    /// Copy `data` into a fresh pinned allocation. Wiping `data` stays the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps room for allocators that
    /// can refuse locked memory.
    pub fn new(data: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self::from_vec(data.to_vec()))
    }

    /// Adopt `data`'s allocation as the secret storage.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        let bytes: SecretSlice<u8> = data.into();
        let pin = PagePin::over(bytes.expose_secret());
        Self { bytes, pin }
    }

    /// `len` bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EntropyUnavailable` if the CSPRNG fails.
    pub fn random(len: usize) -> Result<Self, CryptoError> {
        let mut fresh = zeroize::Zeroizing::new(vec![0u8; len]);
        fill_random(&mut fresh)?;
        Ok(Self::from_vec(std::mem::take(&mut *fresh)))
    }

    /// Borrow the contents.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.bytes.expose_secret()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }

    /// Whether `mlock` succeeded for this allocation.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.pin.held
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// SecretBytes<N>
// ---------------------------------------------------------------------------

/// Inline secret of exactly `N` bytes, wiped on drop.
///
/// Not `mlock`ed: the value moves with its owner, and a lock taken on the
/// construction address would cover a stale stack slot. Copies left behind
/// by moves are not wiped; keep long-lived keys in a [`SecretBuffer`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> SecretBytes<N> {
    #[must_use]
    pub const fn new(data: [u8; N]) -> Self {
        Self { bytes: data }
    }

    /// All zeros, for filling in place.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self::new([0u8; N])
    }

    /// Copy an exactly-`N`-byte slice. `what` names the input in the error.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` on any other length.
    pub fn from_slice(data: &[u8], what: &'static str) -> Result<Self, CryptoError> {
        if data.len() != N {
            return Err(CryptoError::length(what, N, data.len()));
        }
        let mut out = Self::zeroed();
        out.bytes.copy_from_slice(data);
        Ok(out)
    }

    /// Move `source` in and leave zeros behind.
    #[must_use]
    pub fn take(source: &mut [u8; N]) -> Self {
        let mut out = Self::zeroed();
        out.bytes.copy_from_slice(source);
        source.zeroize();
        out
    }

    /// `N` bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EntropyUnavailable` if the CSPRNG fails.
    pub fn random() -> Result<Self, CryptoError> {
        let mut out = Self::zeroed();
        fill_random(&mut out.bytes)?;
        Ok(out)
    }

    #[must_use]
    pub const fn expose(&self) -> &[u8; N] {
        &self.bytes
    }

    pub(crate) fn expose_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    /// Constant-time comparison with another secret of the same width.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> bool {
        ct_eq(&self.bytes, &other.bytes)
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>(***)")
    }
}

impl<const N: usize> fmt::Display for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<const N: usize> From<[u8; N]> for SecretBytes<N> {
    fn from(data: [u8; N]) -> Self {
        Self::new(data)
    }
}

// ---------------------------------------------------------------------------
// Process hardening
// ---------------------------------------------------------------------------

/// Compare two byte strings without branching on their contents.
///
/// Lengths are compared first and may short-circuit; every caller compares
/// digests or tags whose length is public.
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let acc = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(acc) == 0
}

/// Set `RLIMIT_CORE` to zero so a crash cannot write key material to disk.
/// Does nothing on non-Unix targets.
///
/// # Errors
///
/// Returns `CryptoError::SecureMemory` if `setrlimit` fails.
pub fn disable_core_dumps() -> Result<(), CryptoError> {
    sys::zero_core_limit()
}

#[cfg(unix)]
mod sys {
    use crate::error::CryptoError;

    pub(super) fn lock(addr: *const u8, len: usize) -> bool {
        // SAFETY: mlock only inspects the range; a bad range yields ENOMEM.
        unsafe { libc::mlock(addr.cast(), len) == 0 }
    }

    pub(super) fn unlock(addr: *const u8, len: usize) {
        // SAFETY: as for mlock; the result is ignored.
        unsafe {
            libc::munlock(addr.cast(), len);
        }
    }

    pub(super) fn zero_core_limit() -> Result<(), CryptoError> {
        let zero = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: plain POSIX call on a stack value.
        if unsafe { libc::setrlimit(libc::RLIMIT_CORE, &raw const zero) } == 0 {
            Ok(())
        } else {
            Err(CryptoError::SecureMemory("setrlimit(RLIMIT_CORE, 0) failed".into()))
        }
    }
}

#[cfg(not(unix))]
mod sys {
    use crate::error::CryptoError;

    pub(super) const fn lock(_addr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) const fn unlock(_addr: *const u8, _len: usize) {}

    pub(super) const fn zero_core_limit() -> Result<(), CryptoError> {
        Ok(())
    }
}
