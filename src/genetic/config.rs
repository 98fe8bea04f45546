#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the evolutionary route search.
///
/// ```
/// use mapnav::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_generations(80)
///     .with_seed(42);
/// assert_eq!(config.event_interval, 9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticConfig {
    /// Number of generations, each runs exactly one
    /// selection / crossover / mutation / regeneration pass.
    pub generations: usize,

    /// A random event fires on every generation index that is a positive
    /// multiple of this value. 0 disables random events.
    pub event_interval: usize,

    /// Upper bound (exclusive) of the weight drawn by a random event.
    pub event_max_weight: f64,

    /// Added to the cost of a random walk that gets stuck and jumps to the goal.
    pub dead_end_penalty: f64,

    /// Added to a crossover child's cost for each consecutive pair with no connection.
    pub seam_penalty: f64,

    /// Target population is `locations * numerator / denominator`, rounded down.
    pub population_numerator: usize,
    pub population_denominator: usize,

    /// Regeneration keeps `population / elite_divisor` candidates.
    pub elite_divisor: usize,

    /// Each generation mutates `(target - 1) / mutation_divisor` candidates.
    pub mutation_divisor: usize,

    /// How many candidates survive the local crossover tournament.
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed from the operating system.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            event_interval: 9,
            event_max_weight: 100.0,
            dead_end_penalty: 1_000_000.0,
            seam_penalty: 1000.0,
            population_numerator: 4,
            population_denominator: 5,
            elite_divisor: 10,
            mutation_divisor: 10,
            tournament_size: 4,
            seed: None,
        }
    }
}

impl GeneticConfig {
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the random event interval (0 to disable).
    pub fn with_event_interval(mut self, n: usize) -> Self {
        self.event_interval = n;
        self
    }

    pub fn with_event_max_weight(mut self, max: f64) -> Self {
        self.event_max_weight = max;
        self
    }

    pub fn with_penalties(mut self, dead_end: f64, seam: f64) -> Self {
        self.dead_end_penalty = dead_end;
        self.seam_penalty = seam;
        self
    }

    /// Sets the population ratio, the target size is `locations * numerator / denominator`.
    pub fn with_population_ratio(mut self, numerator: usize, denominator: usize) -> Self {
        self.population_numerator = numerator;
        self.population_denominator = denominator;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Target population size for a graph with `location_count` locations
    pub fn population_size(&self, location_count: usize) -> usize {
        location_count * self.population_numerator / self.population_denominator.max(1)
    }

    /// Validates the configuration, returning a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_denominator == 0 {
            return Err("population_denominator must be at least 1".into());
        }
        if self.population_numerator == 0 {
            return Err("population_numerator must be at least 1".into());
        }
        if self.elite_divisor == 0 {
            return Err("elite_divisor must be at least 1".into());
        }
        if self.mutation_divisor == 0 {
            return Err("mutation_divisor must be at least 1".into());
        }
        if !(self.event_max_weight.is_finite() && self.event_max_weight > 0.0) {
            return Err("event_max_weight must be finite and positive".into());
        }
        if !(self.dead_end_penalty.is_finite() && self.dead_end_penalty >= 0.0) {
            return Err("dead_end_penalty must be finite and non-negative".into());
        }
        if !(self.seam_penalty.is_finite() && self.seam_penalty >= 0.0) {
            return Err("seam_penalty must be finite and non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneticConfig::default();
        assert_eq!(config.generations, 50);
        assert_eq!(config.event_interval, 9);
        assert_eq!(config.event_max_weight, 100.0);
        assert_eq!(config.dead_end_penalty, 1_000_000.0);
        assert_eq!(config.seam_penalty, 1000.0);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_population_size_rounds_down() {
        let config = GeneticConfig::default();
        assert_eq!(config.population_size(10), 8);
        assert_eq!(config.population_size(12), 9);
        assert_eq!(config.population_size(1), 0);
    }

    #[test]
    fn test_validate_rejects_zero_divisors() {
        assert!(GeneticConfig::default().with_population_ratio(4, 0).validate().is_err());
        let config = GeneticConfig { elite_divisor: 0, ..GeneticConfig::default() };
        assert!(config.validate().is_err());
        assert!(GeneticConfig::default().with_event_max_weight(0.0).validate().is_err());
        assert!(GeneticConfig::default().with_penalties(-1.0, 1000.0).validate().is_err());
    }
}
