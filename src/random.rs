//! Per-run random generators.
//!
//! Every stochastic operation takes its generator explicitly. Parallel
//! workers each build their own [`SearchRng`] from a seed that mixes a
//! high-resolution clock reading with a worker tag, so workers started in
//! the same clock tick still draw distinct streams.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generator type used by all runners.
pub type SearchRng = StdRng;

/// Creates a generator from an explicit seed.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Derives a seed from the system clock (nanosecond resolution) and a
/// caller-supplied tag such as a worker index.
pub fn entropy_seed(tag: u64) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    splitmix64(nanos ^ splitmix64(tag.wrapping_add(1)))
}

/// Derives the seed of worker `index` from a base seed.
///
/// Distinct indices give distinct, well-spread seeds for the same base.
pub fn worker_seed(base: u64, index: u64) -> u64 {
    splitmix64(base ^ splitmix64(index.wrapping_add(0x632b_e59b_d9b4_e019)))
}

/// SplitMix64 finalizer.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
