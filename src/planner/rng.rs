//! Seeded RNG
//!
//! Deterministic float/shuffle/pick generation from a string seed. The planner
//! relies on this everywhere a nondeterministic RNG would break replayability:
//! lane ordering, tie-breaks, motif rotation. State is an explicit value, never
//! a global, so concurrent planning calls cannot interfere.

use sha2::{Digest, Sha256};

/// Deterministic PRNG seeded from a string.
///
/// Identical seeds always produce identical sequences across runs and
/// platforms; no platform random source is ever consulted.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn from_seed(seed: &str) -> Self {
        Self {
            state: hash_str(seed),
        }
    }

    /// splitmix64 step.
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next float in [0, 1).
    pub fn next(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next integer in [0, bound). Returns 0 for an empty bound.
    pub fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next() * bound as f64) as usize % bound
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_index(items.len());
        items.get(idx)
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() < 2 {
            return;
        }
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Stable 64-bit hash of a string, shared by the seed constructor and the
/// hash-based tie-breaks (template noise, series-mark slot pick).
pub fn hash_str(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
