//! Timing side-channel check for the constant-time comparison used on
//! password digests (Welch's t-test, dudect style).
//!
//! Class A compares equal digests, class B digests differing in the first
//! byte (the case an early-exit comparison would make fastest). |t| above
//! 4.5 would indicate a timing difference at >99.999% confidence.
//!
//! **Caveat:** statistical test; heavy scheduler noise can cause a rare
//! false positive. Samples are interleaved to cancel drift.

use std::time::Instant;
use vettid_crypto_core::memory::ct_eq;

const SAMPLES: usize = 10_000;

/// Comparisons per sample, to lift each measurement above timer resolution.
const BATCH: usize = 32;

const T_THRESHOLD: f64 = 4.5;

#[inline(never)]
fn timed_batch(a: &[u8], b: &[u8]) -> u128 {
    let start = Instant::now();
    for _ in 0..BATCH {
        std::hint::black_box(ct_eq(std::hint::black_box(a), std::hint::black_box(b)));
    }
    start.elapsed().as_nanos()
}

/// Sample mean and unbiased variance.
#[allow(clippy::cast_precision_loss)]
fn moments(xs: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

#[allow(clippy::cast_precision_loss)]
fn welch_t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }
    let (mean_a, var_a) = moments(a);
    let (mean_b, var_b) = moments(b);
    let se = (var_a / a.len() as f64 + var_b / b.len() as f64).sqrt();
    if se == 0.0 {
        0.0
    } else {
        (mean_a - mean_b) / se
    }
}

#[test]
fn ct_eq_no_timing_leak() {
    let reference = [0x5Au8; 32];
    let equal = reference;
    let mut differs_first = reference;
    differs_first[0] ^= 0xFF;

    for _ in 0..1000 {
        timed_batch(&reference, &equal);
        timed_batch(&reference, &differs_first);
    }

    let mut times_a = Vec::with_capacity(SAMPLES);
    let mut times_b = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        #[allow(clippy::cast_precision_loss)]
        {
            times_a.push(timed_batch(&reference, &equal) as f64);
            times_b.push(timed_batch(&reference, &differs_first) as f64);
        }
    }

    let abs_t = welch_t_statistic(&times_a, &times_b).abs();
    eprintln!("ct_eq timing: |t| = {abs_t:.2} (threshold {T_THRESHOLD}), {SAMPLES} samples");
    assert!(
        abs_t < T_THRESHOLD,
        "timing difference detected: |t| = {abs_t:.2} exceeds {T_THRESHOLD}"
    );
}

#[test]
fn welch_t_test_identical_distributions() {
    let t = welch_t_statistic(&[1.0; 100], &[1.0; 100]);
    assert!(t.abs() < 0.001, "identical distributions should yield t ≈ 0, got {t}");
}

#[test]
fn welch_t_test_different_distributions() {
    let a: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 3)).collect();
    let b: Vec<f64> = (0..1000).map(|i| 200.0 + f64::from(i % 3)).collect();
    assert!(welch_t_statistic(&a, &b).abs() > 100.0);
}
