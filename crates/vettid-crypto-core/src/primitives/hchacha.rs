//! HChaCha20 subkey derivation (draft-irtf-cfrg-xchacha §2.2).
//!
//! `ring` has no XChaCha20, so the 24-byte-nonce construction is built
//! here from HChaCha20 plus `ring`'s ChaCha20-Poly1305. The core runs the
//! same 20 rounds as the ChaCha20 block function but returns words 0..4
//! and 12..16 of the state without the final feed-forward addition.

use crate::memory::SecretBytes;
use zeroize::Zeroizing;

/// HChaCha20 input nonce length in bytes.
pub const HCHACHA_NONCE_LEN: usize = 16;

/// "expand 32-byte k"
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// ChaCha quarter round on four state words (RFC 8439 §2.1).
pub fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

fn double_round(state: &mut [u32; 16]) {
    // Columns
    quarter_round(state, 0, 4, 8, 12);
    quarter_round(state, 1, 5, 9, 13);
    quarter_round(state, 2, 6, 10, 14);
    quarter_round(state, 3, 7, 11, 15);
    // Diagonals
    quarter_round(state, 0, 5, 10, 15);
    quarter_round(state, 1, 6, 11, 12);
    quarter_round(state, 2, 7, 8, 13);
    quarter_round(state, 3, 4, 9, 14);
}

fn load_le(word: &mut u32, bytes: &[u8]) {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    *word = u32::from_le_bytes(buf);
}

/// Derive a 32-byte subkey from `key` and the first 16 nonce bytes.
#[must_use]
pub fn hchacha20(key: &[u8; 32], nonce: &[u8; HCHACHA_NONCE_LEN]) -> SecretBytes<32> {
    let mut state = Zeroizing::new([0u32; 16]);
    state[..4].copy_from_slice(&SIGMA);
    for (word, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        load_le(word, chunk);
    }
    for (word, chunk) in state[12..].iter_mut().zip(nonce.chunks_exact(4)) {
        load_le(word, chunk);
    }

    for _ in 0..10 {
        double_round(&mut state);
    }

    let mut subkey = SecretBytes::<32>::zeroed();
    let words = state[..4].iter().chain(state[12..].iter());
    for (out, word) in subkey.expose_mut().chunks_exact_mut(4).zip(words) {
        out.copy_from_slice(&word.to_le_bytes());
    }
    subkey
}
