//! Seeded random stream for placeholder data.
//!
//! RULE: Only `mock` draws from this. Real analytics are pure functions
//! of roster and events and never touch a random number.
//!
//! Streams are derived from (seed XOR stream_index * golden ratio), so
//! the same seed and stream always replay the same numbers.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct MockRng {
    inner: Pcg64Mcg,
}

impl MockRng {
    pub fn new(seed: u64, stream: u64) -> Self {
        let derived_seed = seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self { inner: Pcg64Mcg::seed_from_u64(derived_seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n). `n` must be non-zero.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u32 in [lo, hi].
    pub fn between(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        lo + self.next_u64_below(u64::from(hi - lo) + 1) as u32
    }
}

/// Stable 64-bit FNV-1a, used to give each member its own stream.
pub fn stream_for(key: &str) -> u64 {
    key.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
