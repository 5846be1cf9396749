//! Seeded RNG construction.
//!
//! All stochastic operators in this crate take an explicit `&mut R: Rng`
//! so that runs can be replayed deterministically and concurrent workers
//! can hold independent streams.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seedable RNG for deterministic replay.
///
/// # Example
///
/// ```
/// use pareto_tour::random::create_rng;
/// use rand::Rng;
///
/// let mut a = create_rng(42);
/// let mut b = create_rng(42);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
