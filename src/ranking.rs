//! Pareto ranking: normalization, non-dominated fronts, crowding distance.
//!
//! Ranking operates on a whole population snapshot and rewrites only the
//! rank, crowding, and normalized-fitness fields; genomes and raw fitness
//! are never touched, so a pass is idempotent on an unchanged population.
//!
//! Front extraction is the plain repeated-scan variant: each pass over the
//! remaining set collects every individual no other remaining individual
//! dominates. O(F·N²) for F fronts — slower than the bookkeeping-heavy
//! O(N log N) formulation but comfortably fast for populations up to a few
//! thousand.
//!
//! The crowding measure is the simplified two-objective form: one sort per
//! front by normalized distance fitness, boundary members get infinity,
//! interior members sum the Euclidean distances to their sort-order
//! neighbours in the normalized objective plane. Tournament selection
//! depends on these exact values, tie-breaks included.

use crate::individual::{Individual, CROWDING_UNSET, UNRANKED};

/// Recomputes rank and crowding distance for every individual.
///
/// 1. Reset rank and crowding to their sentinels.
/// 2. Normalize both objectives by the population maximum (a zero maximum
///    normalizes to 1.0 for everyone rather than dividing by zero).
/// 3. Partition into fronts by repeated non-dominated scans; rank 1 is
///    the Pareto front.
/// 4. Assign crowding distances independently per front.
pub fn update_population_fitness(population: &mut [Individual]) {
    if population.is_empty() {
        return;
    }

    for individual in population.iter_mut() {
        individual.rank = UNRANKED;
        individual.crowding_distance = CROWDING_UNSET;
    }

    normalize_fitness(population);

    let max_rank = assign_ranks(population);

    for rank in 1..=max_rank {
        let front: Vec<usize> = (0..population.len())
            .filter(|&i| population[i].rank == rank)
            .collect();
        assign_crowding_distance(population, front);
    }
}

/// Divides each objective by its population maximum.
fn normalize_fitness(population: &mut [Individual]) {
    let max_distance = population
        .iter()
        .map(|i| i.distance_fitness)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_time = population
        .iter()
        .map(|i| i.time_fitness)
        .fold(f64::NEG_INFINITY, f64::max);

    for individual in population.iter_mut() {
        individual.normalized_distance_fitness = if max_distance == 0.0 {
            1.0
        } else {
            individual.distance_fitness / max_distance
        };
        individual.normalized_time_fitness = if max_time == 0.0 {
            1.0
        } else {
            individual.time_fitness / max_time
        };
    }
}

/// Partitions the population into fronts; returns the highest rank used.
fn assign_ranks(population: &mut [Individual]) -> usize {
    let mut remaining: Vec<usize> = (0..population.len()).collect();
    let mut rank = 0;

    while !remaining.is_empty() {
        rank += 1;

        let mut front: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| is_not_dominated(population, i, &remaining))
            .collect();

        // A scan comes up empty only when distinct genomes tie exactly on
        // both objectives and block each other. Rank the members dominated
        // solely through such ties; genuinely dominated individuals stay
        // behind for later scans.
        if front.is_empty() {
            front = remaining
                .iter()
                .copied()
                .filter(|&i| is_not_strictly_dominated(population, i, &remaining))
                .collect();
            debug_assert!(!front.is_empty(), "tie fallback must make progress");
        }

        for &i in &front {
            population[i].rank = rank;
        }
        remaining.retain(|i| !front.contains(i));
    }

    rank
}

/// An individual is not dominated when no other remaining individual is at
/// least as good on both objectives.
///
/// "Other" means value-unequal: copies of the subject's genome carry the
/// same fitness by construction and are skipped, so a duplicated genome
/// cannot demote itself. The comparison is `<=` on both axes, matching the
/// selection semantics downstream: an exact two-objective tie between
/// distinct genomes counts as domination in either direction.
fn is_not_dominated(population: &[Individual], subject: usize, remaining: &[usize]) -> bool {
    let a = &population[subject];
    remaining.iter().all(|&j| {
        let b = &population[j];
        b == a || !(b.distance_fitness <= a.distance_fitness && b.time_fitness <= a.time_fitness)
    })
}

/// Like [`is_not_dominated`], but exact two-objective ties never count as
/// domination.
///
/// Used when a scan deadlocks on tied fitness pairs: the individuals kept
/// here are worse than no one except their exact ties, and such a minimal
/// member always exists, so the fallback front is never empty.
fn is_not_strictly_dominated(population: &[Individual], subject: usize, remaining: &[usize]) -> bool {
    let a = &population[subject];
    remaining.iter().all(|&j| {
        let b = &population[j];
        b == a
            || (b.distance_fitness == a.distance_fitness && b.time_fitness == a.time_fitness)
            || !(b.distance_fitness <= a.distance_fitness && b.time_fitness <= a.time_fitness)
    })
}

/// Crowding distance for one front.
///
/// The front is ordered by normalized distance fitness; with only two
/// objectives that single order also fixes each member's neighbours in
/// the normalized plane.
fn assign_crowding_distance(population: &mut [Individual], mut front: Vec<usize>) {
    front.sort_by(|&a, &b| {
        population[a]
            .normalized_distance_fitness
            .partial_cmp(&population[b].normalized_distance_fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let points: Vec<(f64, f64)> = front
        .iter()
        .map(|&i| {
            (
                population[i].normalized_time_fitness,
                population[i].normalized_distance_fitness,
            )
        })
        .collect();

    let last = front.len() - 1;
    for (position, &i) in front.iter().enumerate() {
        population[i].crowding_distance = if position == 0 || position == last {
            f64::INFINITY
        } else {
            euclidean(points[position], points[position - 1])
                + euclidean(points[position], points[position + 1])
        };
    }
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
