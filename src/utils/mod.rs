pub mod rng;

pub use rng::{RngStream, derive_subseed, rng_from_seed, sample_u64, subseed_rng};
