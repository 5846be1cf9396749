//! Genetic operators: spawn, crossover, mutation.
//!
//! All operators produce valid permutations by construction — they only
//! rearrange values, never create or drop them — so offspring are built
//! through the non-validating constructor and the operators are
//! infallible. Spawning is the one exception: its uniqueness requirement
//! can be unsatisfiable for tiny genomes, so it carries a retry budget.

use crate::config::WorldConfig;
use crate::error::GaError;
use crate::fitness::FitnessProvider;
use crate::individual::Individual;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Attempts allowed per requested population slot before spawning gives
/// up with [`GaError::InsufficientDiversity`].
const SPAWN_ATTEMPTS_PER_SLOT: usize = 100;

/// Generates a uniformly shuffled permutation of `0..len`.
pub fn random_genome<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut genome: Vec<usize> = (0..len).collect();
    genome.shuffle(rng);
    genome
}

/// Spawns a population of unique random individuals.
///
/// Shuffled genomes are drawn until `population_count` distinct ones
/// exist, then evaluated (in parallel under the `parallel` feature; the
/// provider is read-only, so per-genome evaluation is independent).
///
/// # Errors
///
/// Returns [`GaError::InsufficientDiversity`] when the retry budget runs
/// out — the permutation space of a short genome can be smaller than the
/// requested population.
pub fn spawn_population<P: FitnessProvider, R: Rng>(
    provider: &P,
    config: &WorldConfig,
    rng: &mut R,
) -> Result<Vec<Individual>, GaError> {
    let genome_len = provider.location_count();
    let budget = config.population_count.saturating_mul(SPAWN_ATTEMPTS_PER_SLOT);

    let mut genomes: Vec<Vec<usize>> = Vec::with_capacity(config.population_count);
    let mut attempts = 0;
    while genomes.len() < config.population_count {
        if attempts >= budget {
            return Err(GaError::InsufficientDiversity {
                required: config.population_count,
                genome_len,
                attempts,
            });
        }
        attempts += 1;

        let genome = random_genome(genome_len, rng);
        if !genomes.contains(&genome) {
            genomes.push(genome);
        }
    }

    #[cfg(feature = "parallel")]
    let population = genomes
        .into_par_iter()
        .map(|genome| Individual::from_valid(genome, provider))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let population = genomes
        .into_iter()
        .map(|genome| Individual::from_valid(genome, provider))
        .collect();

    Ok(population)
}

/// Single-point order-preserving crossover at a random point.
///
/// The point is uniform in `[1, N-2]`, so each child always inherits a
/// non-empty head from one parent and at least its final gene from the
/// other's ordering.
pub fn crossover<P: FitnessProvider, R: Rng>(
    parent_a: &Individual,
    parent_b: &Individual,
    provider: &P,
    rng: &mut R,
) -> Individual {
    let len = parent_a.genome().len();
    debug_assert!(len >= 3, "crossover needs at least three genes");
    let point = rng.random_range(1..len - 1);
    crossover_at(parent_a, parent_b, point, provider)
}

/// Single-point order-preserving crossover at a fixed point.
///
/// The child takes the first `point` genes of `parent_a`, then
/// `parent_b`'s genome filtered to the values not already placed. Every
/// value appears in exactly one of the two sources' remaining positions,
/// so the child is a permutation unconditionally.
pub fn crossover_at<P: FitnessProvider>(
    parent_a: &Individual,
    parent_b: &Individual,
    point: usize,
    provider: &P,
) -> Individual {
    let a = parent_a.genome();
    let b = parent_b.genome();
    debug_assert_eq!(a.len(), b.len(), "parents must have equal genome length");
    debug_assert!(
        (1..a.len() - 1).contains(&point),
        "crossover point {point} outside [1, {}]",
        a.len() - 2
    );

    let mut child = Vec::with_capacity(a.len());
    child.extend_from_slice(&a[..point]);

    let mut placed = vec![false; a.len()];
    for &value in &child {
        placed[value] = true;
    }
    for &value in b {
        if !placed[value] {
            child.push(value);
        }
    }

    Individual::from_valid(child, provider)
}

/// Swap mutation: exchanges the values at two distinct random positions.
pub fn swap_mutate<P: FitnessProvider, R: Rng>(
    individual: &Individual,
    provider: &P,
    rng: &mut R,
) -> Individual {
    let mut genome = individual.genome().to_vec();
    let (first, second) = distinct_positions(genome.len(), rng);
    genome.swap(first, second);
    Individual::from_valid(genome, provider)
}

/// Segment-reverse mutation: reverses the genes strictly between two
/// distinct random positions.
///
/// With the positions ordered as `first < second`, the range
/// `[first, second)` is reversed; the head before `first` and the tail
/// from `second` onward are untouched.
pub fn segment_reverse_mutate<P: FitnessProvider, R: Rng>(
    individual: &Individual,
    provider: &P,
    rng: &mut R,
) -> Individual {
    let mut genome = individual.genome().to_vec();
    let (a, b) = distinct_positions(genome.len(), rng);
    let (first, second) = if a < b { (a, b) } else { (b, a) };
    genome[first..second].reverse();
    Individual::from_valid(genome, provider)
}

/// Applies mutation with probability `mutation_chance`; on trigger a coin
/// flip picks between swap and segment-reverse.
pub fn maybe_mutate<P: FitnessProvider, R: Rng>(
    offspring: Individual,
    mutation_chance: f64,
    provider: &P,
    rng: &mut R,
) -> Individual {
    if rng.random_range(0.0..1.0) >= mutation_chance {
        return offspring;
    }

    if rng.random_range(0.0..1.0) > 0.5 {
        swap_mutate(&offspring, provider, rng)
    } else {
        segment_reverse_mutate(&offspring, provider, rng)
    }
}

/// Two distinct uniform positions in `0..len`.
fn distinct_positions<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(len >= 2, "need at least two positions");
    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }
    (first, second)
}
