//! World configuration.
//!
//! [`WorldConfig`] holds the constants that control the generational loop.

use crate::error::GaError;

/// Configuration for the evolutionary world.
///
/// # Defaults
///
/// ```
/// use pareto_tour::WorldConfig;
///
/// let config = WorldConfig::default();
/// assert_eq!(config.population_count, 100);
/// assert_eq!(config.max_generations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use pareto_tour::WorldConfig;
///
/// let config = WorldConfig::default()
///     .with_population_count(50)
///     .with_mutation_chance(0.1)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Maximum number of generations before the run converges.
    pub max_generations: usize,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_chance: f64,

    /// Number of individuals in the population between generations.
    ///
    /// The merged set transiently holds up to twice this many during a
    /// generation step.
    pub population_count: usize,

    /// Number of consecutive non-improving generations tolerated before
    /// the run converges.
    ///
    /// A generation improves when it strictly lowers the best value of
    /// either objective.
    pub max_no_improvement_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_generations: 10_000,
            mutation_chance: 0.05,
            population_count: 100,
            max_no_improvement_count: 20,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the per-offspring mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_chance(mut self, chance: f64) -> Self {
        self.mutation_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Sets the population size.
    pub fn with_population_count(mut self, n: usize) -> Self {
        self.population_count = n;
        self
    }

    /// Sets the no-improvement tolerance.
    pub fn with_max_no_improvement_count(mut self, n: usize) -> Self {
        self.max_no_improvement_count = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_count < 2 {
            return Err(GaError::InvalidConfig(
                "population_count must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(GaError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(GaError::InvalidConfig(
                "mutation_chance must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.max_generations, 10_000);
        assert!((config.mutation_chance - 0.05).abs() < 1e-12);
        assert_eq!(config.population_count, 100);
        assert_eq!(config.max_no_improvement_count, 20);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = WorldConfig::default()
            .with_max_generations(500)
            .with_mutation_chance(0.2)
            .with_population_count(40)
            .with_max_no_improvement_count(10)
            .with_seed(7);

        assert_eq!(config.max_generations, 500);
        assert!((config.mutation_chance - 0.2).abs() < 1e-12);
        assert_eq!(config.population_count, 40);
        assert_eq!(config.max_no_improvement_count, 10);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_mutation_chance_clamped() {
        let config = WorldConfig::default().with_mutation_chance(1.5);
        assert!((config.mutation_chance - 1.0).abs() < 1e-12);

        let config = WorldConfig::default().with_mutation_chance(-0.5);
        assert!((config.mutation_chance - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_ok() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = WorldConfig::default().with_population_count(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = WorldConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_out_of_range_mutation_chance() {
        let config = WorldConfig {
            mutation_chance: 1.5,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
