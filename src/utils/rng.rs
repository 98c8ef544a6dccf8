//! Deterministic seeding and RNG utilities.
//!
//! Every slot of a batch owns its own RNG stream so that parallel workers
//! never contend on shared random state. Sub-seeds are derived from the
//! caller's base seed and the slot index with a counter-based SplitMix64
//! mix, so `reset_one(i, seed)` and a full `reset_all(seed)` agree on what
//! slot `i` receives.

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The reproducible PRNG stream used for reset perturbations.
pub type RngStream = ChaCha8Rng;

/// Derive the sub-seed for one slot from a base seed.
///
/// Counter-based SplitMix64: the base seed is offset by the slot index
/// times the golden-ratio constant and run through the SplitMix64
/// finalizer. O(1) per slot, independent of every other slot, and a pure
/// function of `(base_seed, index)` only — never ambient time.
pub fn derive_subseed(base_seed: u64, index: u64) -> u64 {
    // Constants from the SplitMix64 reference for good bit diffusion.
    let mut z = base_seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Create a new RNG stream from a seed.
pub fn rng_from_seed(seed: u64) -> RngStream {
    RngStream::seed_from_u64(seed)
}

/// Create the RNG stream for slot `index` under `base_seed`.
pub fn subseed_rng(base_seed: u64, index: u64) -> RngStream {
    rng_from_seed(derive_subseed(base_seed, index))
}

/// Sample a u64 from an RNG (stable method surface without the rand prelude).
pub fn sample_u64(rng: &mut impl RngCore) -> u64 {
    rng.next_u64()
}
