//! Error types for the evolutionary core.

use thiserror::Error;

/// Errors produced during construction of individuals, populations,
/// travel tables, and configurations.
///
/// Operators whose outputs are valid by construction (crossover,
/// mutation) do not return `Result`; only genuine contract violations
/// surface here.
#[derive(Debug, Error)]
pub enum GaError {
    /// The genome is not a permutation of `0..expected_len`.
    ///
    /// Raised at construction time and never recovered.
    #[error("invalid genome: {reason} (expected a permutation of 0..{expected_len})")]
    InvalidGenome {
        /// Required genome length (the location count).
        expected_len: usize,
        /// What exactly was wrong: length, duplicate, or out-of-range value.
        reason: String,
    },

    /// Spawning could not reach the requested number of unique genomes
    /// within the retry budget.
    ///
    /// Happens when the permutation space is too small for the requested
    /// population. Callers may reduce the population size.
    #[error(
        "could not spawn {required} unique genomes of length {genome_len} \
         within {attempts} attempts"
    )]
    InsufficientDiversity {
        /// Requested population size.
        required: usize,
        /// Genome length (the location count).
        genome_len: usize,
        /// Attempts made before giving up.
        attempts: usize,
    },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The distance or speed tables are malformed.
    #[error("invalid travel tables: {0}")]
    InvalidTables(String),
}
