//! Random source construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Creates the process RNG from a seed.
///
/// The same seed always yields the same stream, so a batch run threads one
/// RNG created here through every solve to stay reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
