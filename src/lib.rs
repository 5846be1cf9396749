//! Multi-objective tour optimization over a fixed set of locations.
//!
//! Evolves a population of permutation genomes ("visiting orders") with an
//! NSGA-II-style genetic algorithm, minimizing two competing objectives at
//! once: total travel distance and total travel time. Because speeds are
//! directional, the two objectives genuinely conflict and the result is a
//! Pareto front of trade-offs rather than a single winner.
//!
//! # Components
//!
//! - [`Individual`]: a permutation genome plus its eagerly computed
//!   objective fitnesses, Pareto rank, and crowding distance.
//! - [`FitnessProvider`]: the seam to the problem data — pairwise
//!   distances and directional speeds. [`TravelMatrix`] is the bundled
//!   table-backed implementation.
//! - [`ranking`]: non-dominated sorting and crowding-distance assignment.
//! - [`selection`] / [`operators`]: binary tournament, permutation-safe
//!   crossover, swap and segment-reverse mutation, population spawning.
//! - [`World`]: the elitist generational loop with convergence detection.
//!
//! # Example
//!
//! ```
//! use pareto_tour::{TravelMatrix, World, WorldConfig};
//!
//! // Four locations with Euclidean distances and uniform speeds.
//! let positions = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)];
//! let speeds = vec![vec![1.0; 4]; 4];
//! let matrix = TravelMatrix::from_positions(&positions, speeds).unwrap();
//!
//! let config = WorldConfig::default()
//!     .with_population_count(10)
//!     .with_max_generations(25)
//!     .with_seed(42);
//!
//! let mut world = World::new(matrix, config).unwrap();
//! world.run().unwrap();
//!
//! let best = world.best_individual();
//! assert_eq!(best.genome().len(), 4);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate freshly spawned individuals in parallel with
//!   rayon.
//! - `serde`: `Serialize`/`Deserialize` on the public data records.
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*

pub mod config;
pub mod error;
pub mod fitness;
pub mod individual;
pub mod operators;
pub mod random;
pub mod ranking;
pub mod selection;
pub mod world;

pub use config::WorldConfig;
pub use error::GaError;
pub use fitness::{FitnessProvider, TravelMatrix};
pub use individual::Individual;
pub use world::{GenerationStats, World};
