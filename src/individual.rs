//! Candidate solutions.
//!
//! An [`Individual`] is a permutation genome over the location indices
//! plus the values derived from it: the two objective fitnesses (computed
//! eagerly at construction, never revisited) and the rank / crowding
//! fields written by each ranking pass.

use crate::error::GaError;
use crate::fitness::FitnessProvider;

/// Sentinel rank for individuals that have not been through a ranking
/// pass. Real ranks start at 1 (the Pareto front).
pub const UNRANKED: usize = usize::MAX;

/// Sentinel crowding distance written before each ranking pass.
pub const CROWDING_UNSET: f64 = -1.0;

/// One candidate solution: a visiting order and its derived fitness.
///
/// Two individuals are equal iff their genomes are equal element for
/// element; fitness, rank, and crowding never participate in equality.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genome: Vec<usize>,
    pub(crate) distance_fitness: f64,
    pub(crate) time_fitness: f64,
    pub(crate) normalized_distance_fitness: f64,
    pub(crate) normalized_time_fitness: f64,
    pub(crate) rank: usize,
    pub(crate) crowding_distance: f64,
}

impl Individual {
    /// Creates an individual from a genome, computing both objective
    /// fitnesses through the provider.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidGenome`] when the genome is not a
    /// permutation of `0..provider.location_count()`.
    pub fn new<P: FitnessProvider>(genome: Vec<usize>, provider: &P) -> Result<Self, GaError> {
        validate_genome(&genome, provider.location_count())?;
        Ok(Self::from_valid(genome, provider))
    }

    /// Creates an individual from a genome known to be a valid
    /// permutation.
    ///
    /// Genetic operators preserve the permutation invariant by
    /// construction, so they use this path and skip re-validation.
    pub(crate) fn from_valid<P: FitnessProvider>(genome: Vec<usize>, provider: &P) -> Self {
        debug_assert!(validate_genome(&genome, provider.location_count()).is_ok());

        let mut distance_fitness = 0.0;
        let mut time_fitness = 0.0;
        for pair in genome.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let edge = provider.distance(from, to);
            distance_fitness += edge;
            time_fitness += edge / provider.speed(from, to);
        }

        Self {
            genome,
            distance_fitness,
            time_fitness,
            normalized_distance_fitness: 0.0,
            normalized_time_fitness: 0.0,
            rank: UNRANKED,
            crowding_distance: CROWDING_UNSET,
        }
    }

    /// Test-only constructor with directly assigned objective values.
    #[cfg(test)]
    pub(crate) fn with_fitness(genome: Vec<usize>, distance: f64, time: f64) -> Self {
        Self {
            genome,
            distance_fitness: distance,
            time_fitness: time,
            normalized_distance_fitness: 0.0,
            normalized_time_fitness: 0.0,
            rank: UNRANKED,
            crowding_distance: CROWDING_UNSET,
        }
    }

    /// The visiting order.
    pub fn genome(&self) -> &[usize] {
        &self.genome
    }

    /// Total travel distance over consecutive genome entries.
    pub fn distance_fitness(&self) -> f64 {
        self.distance_fitness
    }

    /// Total travel time: each edge's distance divided by its directional
    /// speed.
    pub fn time_fitness(&self) -> f64 {
        self.time_fitness
    }

    /// Distance fitness divided by the population maximum.
    ///
    /// Only meaningful immediately after a ranking pass.
    pub fn normalized_distance_fitness(&self) -> f64 {
        self.normalized_distance_fitness
    }

    /// Time fitness divided by the population maximum.
    ///
    /// Only meaningful immediately after a ranking pass.
    pub fn normalized_time_fitness(&self) -> f64 {
        self.normalized_time_fitness
    }

    /// Pareto rank; 1 is the non-dominated front. [`UNRANKED`] before the
    /// first ranking pass.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Crowding distance within this individual's front. Boundary members
    /// hold positive infinity; [`CROWDING_UNSET`] before the first pass.
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome
    }
}

impl Eq for Individual {}

fn validate_genome(genome: &[usize], expected_len: usize) -> Result<(), GaError> {
    if genome.len() != expected_len {
        return Err(GaError::InvalidGenome {
            expected_len,
            reason: format!("length is {}", genome.len()),
        });
    }

    let mut seen = vec![false; expected_len];
    for &value in genome {
        if value >= expected_len {
            return Err(GaError::InvalidGenome {
                expected_len,
                reason: format!("value {value} is out of range"),
            });
        }
        if seen[value] {
            return Err(GaError::InvalidGenome {
                expected_len,
                reason: format!("value {value} appears more than once"),
            });
        }
        seen[value] = true;
    }

    Ok(())
}
