//! Parent selection.
//!
//! Parents are chosen by binary tournament over two value-distinct
//! candidates drawn uniformly from the population. The tournament
//! compares Pareto rank first and crowding distance second; its
//! tie-break (return the second candidate on an exact tie) is part of
//! the contract, since the generational loop leans on it before the
//! first ranking pass when every individual still holds sentinel values.

use crate::individual::Individual;
use rand::Rng;

/// Draws two value-distinct candidates from the population.
///
/// # Panics
///
/// Panics when the population holds fewer than two individuals. The
/// population must contain at least two value-distinct members for the
/// redraw loop to terminate; spawning guarantees this by construction.
pub fn candidate_parents<'a, R: Rng>(
    population: &'a [Individual],
    rng: &mut R,
) -> (&'a Individual, &'a Individual) {
    assert!(
        population.len() >= 2,
        "cannot sample candidate parents from fewer than two individuals"
    );

    let first = &population[rng.random_range(0..population.len())];
    let mut second = &population[rng.random_range(0..population.len())];
    while first == second {
        second = &population[rng.random_range(0..population.len())];
    }

    (first, second)
}

/// Binary tournament between two candidates.
///
/// Lower rank wins; on equal rank the larger crowding distance wins; on
/// an exact tie the second candidate is returned.
pub fn tournament<'a>(first: &'a Individual, second: &'a Individual) -> &'a Individual {
    if first.rank < second.rank {
        first
    } else if first.rank == second.rank {
        if first.crowding_distance > second.crowding_distance {
            first
        } else {
            second
        }
    } else {
        second
    }
}
