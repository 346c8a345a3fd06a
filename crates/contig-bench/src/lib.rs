//! Benchmark workloads for contig.
//!
//! Provides deterministic input generators shared by the criterion
//! benchmarks:
//!
//! - [`random_bytes`] / [`random_u32s`]: seeded uniform runs.
//! - [`haystack_with_needle`]: a byte run guaranteed to contain a value
//!   only at one chosen position.
//! - [`sorted_u32s`]: strictly increasing keys for binary search.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run lengths swept by the scan benchmarks.
///
/// Covers runs shorter than one vector register, a few registers, and
/// sizes large enough for the vector loop to dominate.
pub const SCAN_LENGTHS: [usize; 5] = [8, 64, 1024, 16 * 1024, 256 * 1024];

/// `len` pseudo-random bytes from `seed`.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// `len` pseudo-random `u32`s from `seed`.
pub fn random_u32s(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.next_u32()).collect()
}

/// Bytes drawn from `0..=254` with a single `0xFF` at `position`.
///
/// # Panics
///
/// Panics if `position >= len`.
pub fn haystack_with_needle(len: usize, position: usize, seed: u64) -> Vec<u8> {
    assert!(position < len, "needle position {position} outside run of {len}");
    let mut out = random_bytes(len, seed);
    for b in &mut out {
        if *b == NEEDLE {
            *b = 0;
        }
    }
    out[position] = NEEDLE;
    out
}

/// The byte placed by [`haystack_with_needle`].
pub const NEEDLE: u8 = 0xFF;

/// `len` strictly increasing keys starting near zero, with random gaps of
/// 1 to 16.
pub fn sorted_u32s(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut next = 0u32;
    (0..len)
        .map(|_| {
            next = next.wrapping_add(1 + rng.next_u32() % 16);
            next
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_deterministic() {
        assert_eq!(random_bytes(100, 7), random_bytes(100, 7));
        assert_ne!(random_bytes(100, 7), random_bytes(100, 8));
        assert_eq!(random_u32s(50, 1), random_u32s(50, 1));
    }

    #[test]
    fn needle_appears_only_at_position() {
        let hay = haystack_with_needle(4096, 3000, 42);
        assert_eq!(contig_scan::index_of(&hay, NEEDLE), Some(3000));
        assert_eq!(contig_scan::count(&hay, NEEDLE), 1);
    }

    #[test]
    fn sorted_keys_strictly_increase() {
        let keys = sorted_u32s(1000, 3);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let probe = keys[500];
        assert_eq!(contig_scan::binary_search(&keys, &probe), 500);
    }
}
