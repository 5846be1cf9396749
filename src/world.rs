//! The generational loop.
//!
//! [`World`] owns the population and drives it through elitist NSGA-II
//! style generations: breed offspring by tournament selection, merge them
//! with the current population, re-rank the merged set, and keep the best
//! `population_count` individuals regardless of parentage.
//!
//! The loop is designed to be ticked by an external driver: one
//! [`do_generation`](World::do_generation) call per discrete step, no
//! internal concurrency, and the population reference is swapped only
//! after truncation completes, so a caller never observes a half-updated
//! generation.

use crate::config::WorldConfig;
use crate::error::GaError;
use crate::fitness::FitnessProvider;
use crate::individual::Individual;
use crate::operators;
use crate::random::create_rng;
use crate::ranking;
use crate::selection;
use rand::rngs::StdRng;
use rand::Rng;

/// Per-generation summary, kept for external charting.
///
/// With two objectives there is no single "best" fitness scalar; the
/// record carries the candidates (front size, per-objective minima) and
/// leaves the choice of charted metric to the integrator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation index.
    pub generation: usize,

    /// Size of the lowest-rank (Pareto) front after truncation.
    pub front_size: usize,

    /// Minimum distance fitness in the surviving population.
    pub best_distance: f64,

    /// Minimum time fitness in the surviving population.
    pub best_time: f64,
}

/// Orchestrates the evolutionary run.
///
/// # Example
///
/// ```
/// use pareto_tour::{TravelMatrix, World, WorldConfig};
///
/// let positions = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)];
/// let speeds = vec![vec![1.0; 5]; 5];
/// let matrix = TravelMatrix::from_positions(&positions, speeds).unwrap();
///
/// let config = WorldConfig::default()
///     .with_population_count(20)
///     .with_max_generations(50)
///     .with_seed(42);
///
/// let mut world = World::new(matrix, config).unwrap();
/// world.spawn().unwrap();
/// while !world.has_converged() {
///     world.do_generation();
/// }
///
/// let best = world.best_individual();
/// assert_eq!(best.rank(), 1);
/// ```
pub struct World<P: FitnessProvider> {
    provider: P,
    config: WorldConfig,
    rng: StdRng,
    population: Vec<Individual>,
    generation_count: usize,
    no_improvement_count: usize,
    best_distance: f64,
    best_time: f64,
    history: Vec<GenerationStats>,
}

impl<P: FitnessProvider> World<P> {
    /// Creates a world over the given provider.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] when the configuration fails
    /// validation or the provider has fewer than three locations (the
    /// crossover point range `[1, N-2]` is empty below that).
    pub fn new(provider: P, config: WorldConfig) -> Result<Self, GaError> {
        config.validate()?;
        if provider.location_count() < 3 {
            return Err(GaError::InvalidConfig(
                "at least 3 locations are required".into(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        Ok(Self {
            provider,
            config,
            rng,
            population: Vec::new(),
            generation_count: 0,
            no_improvement_count: 0,
            best_distance: f64::INFINITY,
            best_time: f64::INFINITY,
            history: Vec::new(),
        })
    }

    /// Spawns the initial population of unique random individuals.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InsufficientDiversity`] when the permutation
    /// space cannot supply enough unique genomes.
    pub fn spawn(&mut self) -> Result<(), GaError> {
        let population = operators::spawn_population(&self.provider, &self.config, &mut self.rng)?;
        tracing::info!(count = population.len(), "population spawned");
        self.population = population;
        Ok(())
    }

    /// Runs one elitist generation step.
    ///
    /// Offspring are bred until they number at least `population_count`
    /// (one over for an odd count, trimmed again at truncation), merged
    /// with the current population, ranked, then the merged set is ordered
    /// by ascending rank and descending crowding distance, deduplicated
    /// keeping first occurrences, and truncated. Survivors are the best
    /// fronts whether they are offspring or previous-generation members.
    ///
    /// # Panics
    ///
    /// Panics if called before a successful [`spawn`](World::spawn).
    pub fn do_generation(&mut self) {
        assert!(
            !self.population.is_empty(),
            "do_generation requires a spawned population"
        );

        self.generation_count += 1;

        let offspring = self.breed_offspring();

        let mut merged = self.population.clone();
        merged.extend(offspring);
        ranking::update_population_fitness(&mut merged);

        merged.sort_by(|a, b| {
            a.rank.cmp(&b.rank).then_with(|| {
                b.crowding_distance
                    .partial_cmp(&a.crowding_distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        let mut next = Vec::with_capacity(self.config.population_count);
        for individual in merged {
            if next.len() == self.config.population_count {
                break;
            }
            if !next.contains(&individual) {
                next.push(individual);
            }
        }

        // The previous generation stays observable until this swap; a
        // panic above leaves the population untouched.
        self.population = next;

        self.record_generation();
    }

    /// Breeds offspring by tournament selection and two-way crossover.
    fn breed_offspring(&mut self) -> Vec<Individual> {
        let population = &self.population;
        let provider = &self.provider;
        let rng = &mut self.rng;
        let mutation_chance = self.config.mutation_chance;

        let mut offspring = Vec::with_capacity(self.config.population_count + 1);
        while offspring.len() < self.config.population_count {
            let mother = Self::select_parent(population, rng);
            let mut father = Self::select_parent(population, rng);
            while father == mother {
                father = Self::select_parent(population, rng);
            }

            let child_a = operators::crossover(mother, father, provider, rng);
            let child_b = operators::crossover(father, mother, provider, rng);

            offspring.push(operators::maybe_mutate(child_a, mutation_chance, provider, rng));
            offspring.push(operators::maybe_mutate(child_b, mutation_chance, provider, rng));
        }

        offspring
    }

    fn select_parent<'a>(population: &'a [Individual], rng: &mut StdRng) -> &'a Individual {
        let (first, second) = selection::candidate_parents(population, rng);
        selection::tournament(first, second)
    }

    /// Updates the improvement counters and appends to the history log.
    fn record_generation(&mut self) {
        let mut best_distance = f64::INFINITY;
        let mut best_time = f64::INFINITY;
        for individual in &self.population {
            best_distance = best_distance.min(individual.distance_fitness);
            best_time = best_time.min(individual.time_fitness);
        }

        if best_distance < self.best_distance || best_time < self.best_time {
            self.best_distance = self.best_distance.min(best_distance);
            self.best_time = self.best_time.min(best_time);
            self.no_improvement_count = 0;
        } else {
            self.no_improvement_count += 1;
        }

        let min_rank = self
            .population
            .iter()
            .map(|i| i.rank)
            .min()
            .unwrap_or_default();
        let front_size = self
            .population
            .iter()
            .filter(|i| i.rank == min_rank)
            .count();

        self.history.push(GenerationStats {
            generation: self.generation_count,
            front_size,
            best_distance,
            best_time,
        });

        tracing::debug!(
            generation = self.generation_count,
            front_size,
            best_distance,
            best_time,
            no_improvement = self.no_improvement_count,
            "generation complete"
        );
    }

    /// Spawns (when necessary) and ticks generations until convergence.
    pub fn run(&mut self) -> Result<(), GaError> {
        if self.population.is_empty() {
            self.spawn()?;
        }
        while !self.has_converged() {
            self.do_generation();
        }
        tracing::info!(generations = self.generation_count, "run converged");
        Ok(())
    }

    /// Picks a uniformly random member of the lowest-rank front.
    ///
    /// Rank-1 members are mutually non-dominated with no total order, so
    /// there is no single scalar best; any front member is as much "the
    /// best" as another.
    ///
    /// # Panics
    ///
    /// Panics when the population is empty.
    pub fn best_individual(&mut self) -> &Individual {
        assert!(
            !self.population.is_empty(),
            "best_individual requires a spawned population"
        );

        let min_rank = self
            .population
            .iter()
            .map(|i| i.rank)
            .min()
            .expect("population is non-empty");
        let front: Vec<usize> = (0..self.population.len())
            .filter(|&i| self.population[i].rank == min_rank)
            .collect();

        let pick = front[self.rng.random_range(0..front.len())];
        &self.population[pick]
    }

    /// The current generation's population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Number of completed generation steps.
    pub fn generation_count(&self) -> usize {
        self.generation_count
    }

    /// Consecutive generations without an improvement in either
    /// objective's best value.
    pub fn no_improvement_count(&self) -> usize {
        self.no_improvement_count
    }

    /// Whether the run is finished.
    ///
    /// True once the generation count exceeds `max_generations` or the
    /// no-improvement streak exceeds `max_no_improvement_count` — both
    /// strictly greater-than. Terminal: nothing in the loop decreases
    /// either counter past its limit.
    pub fn has_converged(&self) -> bool {
        self.generation_count > self.config.max_generations
            || self.no_improvement_count > self.config.max_no_improvement_count
    }

    /// Per-generation summaries since spawn.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::TravelMatrix;
    use crate::individual::UNRANKED;

    fn grid_world(population_count: usize, seed: u64) -> World<TravelMatrix> {
        let positions = [
            (0.0, 0.0),
            (12.0, 0.0),
            (12.0, 9.0),
            (0.0, 9.0),
            (6.0, 4.0),
            (3.0, 8.0),
        ];
        let n = positions.len();
        let speeds: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| 1.0 + ((i + 2 * j) % 3) as f64).collect())
            .collect();
        let matrix = TravelMatrix::from_positions(&positions, speeds).unwrap();

        let config = WorldConfig::default()
            .with_population_count(population_count)
            .with_max_generations(100)
            .with_max_no_improvement_count(100)
            .with_seed(seed);

        World::new(matrix, config).unwrap()
    }

    /// Every tour has identical fitness: improvement is only possible on
    /// the very first generation.
    struct FlatProvider {
        count: usize,
    }

    impl FitnessProvider for FlatProvider {
        fn location_count(&self) -> usize {
            self.count
        }

        fn distance(&self, from: usize, to: usize) -> f64 {
            if from == to {
                0.0
            } else {
                1.0
            }
        }

        fn speed(&self, _from: usize, _to: usize) -> f64 {
            1.0
        }
    }

    fn is_permutation(genome: &[usize], len: usize) -> bool {
        let mut seen = vec![false; len];
        genome.len() == len
            && genome.iter().all(|&v| {
                v < len && !std::mem::replace(&mut seen[v], true)
            })
    }

    #[test]
    fn test_spawn_fills_population() {
        let mut world = grid_world(20, 42);
        world.spawn().unwrap();

        assert_eq!(world.population().len(), 20);
        assert_eq!(world.generation_count(), 0);
        for individual in world.population() {
            assert!(is_permutation(individual.genome(), 6));
            assert_eq!(individual.rank(), UNRANKED);
        }
    }

    #[test]
    fn test_generation_preserves_size_and_invariants() {
        let mut world = grid_world(20, 42);
        world.spawn().unwrap();

        for generation in 1..=10 {
            world.do_generation();
            assert_eq!(world.generation_count(), generation);
            assert_eq!(world.population().len(), 20);
            for individual in world.population() {
                assert!(is_permutation(individual.genome(), 6));
                assert_ne!(individual.rank(), UNRANKED);
            }
        }
    }

    #[test]
    fn test_population_stays_unique() {
        let mut world = grid_world(20, 7);
        world.spawn().unwrap();

        for _ in 0..10 {
            world.do_generation();
            let population = world.population();
            for (i, a) in population.iter().enumerate() {
                for b in &population[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_population_ordered_by_rank_then_crowding() {
        let mut world = grid_world(24, 11);
        world.spawn().unwrap();
        world.do_generation();

        let population = world.population();
        for pair in population.windows(2) {
            assert!(pair[0].rank() <= pair[1].rank());
            if pair[0].rank() == pair[1].rank() {
                assert!(pair[0].crowding_distance() >= pair[1].crowding_distance());
            }
        }
    }

    #[test]
    fn test_best_individual_comes_from_first_front() {
        let mut world = grid_world(20, 42);
        world.spawn().unwrap();
        for _ in 0..5 {
            world.do_generation();
        }

        let min_rank = world
            .population()
            .iter()
            .map(|i| i.rank())
            .min()
            .unwrap();
        for _ in 0..20 {
            assert_eq!(world.best_individual().rank(), min_rank);
        }
    }

    #[test]
    fn test_max_generations_convergence_is_strict() {
        let mut world = grid_world(20, 42);
        world.config.max_generations = 5;
        world.spawn().unwrap();

        for _ in 0..5 {
            assert!(!world.has_converged());
            world.do_generation();
        }
        // generation_count == max_generations: not converged yet.
        assert!(!world.has_converged());
        world.do_generation();
        assert!(world.has_converged());
    }

    #[test]
    fn test_no_improvement_convergence() {
        let config = WorldConfig::default()
            .with_population_count(6)
            .with_max_generations(1000)
            .with_max_no_improvement_count(3)
            .with_seed(42);
        let mut world = World::new(FlatProvider { count: 5 }, config).unwrap();

        world.run().unwrap();

        // Generation 1 improves from the initial infinities; every later
        // generation stagnates, so the counter reaches 4 at generation 5.
        assert_eq!(world.generation_count(), 5);
        assert_eq!(world.no_improvement_count(), 4);
    }

    #[test]
    fn test_improvement_resets_counter_over_run() {
        let mut world = grid_world(20, 42);
        world.spawn().unwrap();
        world.do_generation();

        // First generation always improves on the initial infinities.
        assert_eq!(world.no_improvement_count(), 0);
    }

    #[test]
    fn test_history_tracks_each_generation() {
        let mut world = grid_world(20, 42);
        world.spawn().unwrap();
        for _ in 0..4 {
            world.do_generation();
        }

        let history = world.history();
        assert_eq!(history.len(), 4);
        for (index, stats) in history.iter().enumerate() {
            assert_eq!(stats.generation, index + 1);
            assert!(stats.front_size >= 1);
            assert!(stats.best_distance.is_finite());
            assert!(stats.best_time.is_finite());
        }

        // Elitism: per-objective minima never regress between generations.
        for pair in history.windows(2) {
            assert!(pair[1].best_distance <= pair[0].best_distance);
            assert!(pair[1].best_time <= pair[0].best_time);
        }
    }

    #[test]
    fn test_odd_population_count_does_not_drift() {
        let mut world = grid_world(15, 42);
        world.spawn().unwrap();

        for _ in 0..5 {
            world.do_generation();
            assert_eq!(world.population().len(), 15);
        }
    }

    #[test]
    fn test_seeded_runs_replay_identically() {
        let mut a = grid_world(20, 99);
        let mut b = grid_world(20, 99);
        a.spawn().unwrap();
        b.spawn().unwrap();
        for _ in 0..5 {
            a.do_generation();
            b.do_generation();
        }

        let genomes_a: Vec<&[usize]> = a.population().iter().map(|i| i.genome()).collect();
        let genomes_b: Vec<&[usize]> = b.population().iter().map(|i| i.genome()).collect();
        assert_eq!(genomes_a, genomes_b);
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_rejects_too_few_locations() {
        let matrix = TravelMatrix::new(
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![vec![1.0; 2]; 2],
        )
        .unwrap();
        assert!(matches!(
            World::new(matrix, WorldConfig::default()),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    #[should_panic(expected = "requires a spawned population")]
    fn test_generation_before_spawn_panics() {
        let mut world = grid_world(20, 42);
        world.do_generation();
    }
}
