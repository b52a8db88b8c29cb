//! CSPRNG smoke tests: Shannon entropy and nonce uniqueness.
//!
//! | Sample size | Expected entropy | Threshold |
//! |-------------|-----------------|-----------|
//! | 32 bytes    | ~4.88           | 4.0       |
//! | 64 KB       | ~7.997          | 7.99      |

use std::collections::HashSet;
use vettid_crypto_core::envelope::{encrypt_to, GenericToEnclave};
use vettid_crypto_core::memory::SecretBytes;
use vettid_crypto_core::primitives::agreement::generate_agreement_keypair;
use vettid_crypto_core::primitives::random::random_bytes;

/// Shannon entropy in bits per byte.
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn random_bytes_64kb_entropy() {
    let data = random_bytes(65536).unwrap();
    let entropy = shannon_entropy(&data);
    assert!(entropy > 7.99, "random_bytes(65536) entropy too low: {entropy:.4}");
}

#[test]
fn secret_bytes_32_random_entropy() {
    let key = SecretBytes::<32>::random().unwrap();
    let entropy = shannon_entropy(key.expose());
    assert!(entropy > 4.0, "SecretBytes::<32>::random() entropy too low: {entropy:.4}");
}

#[test]
fn envelope_nonces_and_ephemeral_keys_never_repeat() {
    let recipient = generate_agreement_keypair();
    let mut nonces = HashSet::new();
    let mut ephemerals = HashSet::new();
    for _ in 0..500 {
        let env = encrypt_to::<GenericToEnclave>(b"n", recipient.public.as_bytes()).unwrap();
        assert!(nonces.insert(env.nonce), "nonce reused");
        assert!(ephemerals.insert(env.ephemeral_public_key), "ephemeral key reused");
    }
}
