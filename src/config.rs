use crate::error::{RejigError, RjResult};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub solver: SolverParams,
    #[command(flatten)]
    pub detector: DetectorParams,
}

#[derive(Args, Debug, Clone)]
pub struct SolverParams {
    /// Chromosomes per generation
    #[arg(long, default_value_t = 200)]
    pub population_size: usize,

    /// Maximum number of generations
    #[arg(long, default_value_t = 20)]
    pub generations: usize,

    /// Probability that an offspring is produced by crossover rather than
    /// cloned from a parent
    #[arg(long, default_value_t = 0.8)]
    pub crossover_rate: f32,

    /// Per-chromosome probability of swap mutation
    #[arg(long, default_value_t = 0.3)]
    pub mutation_rate: f32,

    /// Maximum random position swaps per mutation
    #[arg(long, default_value_t = 2)]
    pub mutation_swaps: usize,

    /// Fittest chromosomes copied verbatim into the next generation
    #[arg(long, default_value_t = 4)]
    pub elitism_count: usize,

    /// Tournament size for parent selection
    #[arg(long, default_value_t = 4)]
    pub tournament_size: usize,

    /// Generations without material improvement before the run stops
    #[arg(long, default_value_t = 10)]
    pub stagnation_window: usize,

    /// Minimum fitness gain that counts as improvement
    #[arg(long, default_value_t = 1e-3)]
    pub stagnation_epsilon: f32,
}

#[derive(Args, Debug, Clone)]
pub struct DetectorParams {
    /// Smallest piece size tried by auto-detection, in pixels
    #[arg(long, default_value_t = 32)]
    pub min_piece_size: usize,

    /// Largest piece size tried by auto-detection, in pixels
    #[arg(long, default_value_t = 128)]
    pub max_piece_size: usize,

    /// Minimum mutual-best-buddy ratio a candidate must reach
    #[arg(long, default_value_t = 0.25)]
    pub min_mutual_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverParams::default(),
            detector: DetectorParams::default(),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            population_size: 200,
            generations: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.3,
            mutation_swaps: 2,
            elitism_count: 4,
            tournament_size: 4,
            stagnation_window: 10,
            stagnation_epsilon: 1e-3,
        }
    }
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            min_piece_size: 32,
            max_piece_size: 128,
            min_mutual_ratio: 0.25,
        }
    }
}

impl Config {
    pub fn validate(&self) -> RjResult<()> {
        self.solver.validate()?;
        self.detector.validate()
    }
}

impl SolverParams {
    pub fn validate(&self) -> RjResult<()> {
        if self.population_size < 2 {
            return Err(RejigError::Config(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(RejigError::Config("generations must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(RejigError::Config(format!(
                "crossover_rate must be within [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(RejigError::Config(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elitism_count >= self.population_size {
            return Err(RejigError::Config(format!(
                "elitism_count ({}) must be smaller than population_size ({})",
                self.elitism_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(RejigError::Config(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.stagnation_window == 0 {
            return Err(RejigError::Config(
                "stagnation_window must be at least 1".into(),
            ));
        }
        if !self.stagnation_epsilon.is_finite() || self.stagnation_epsilon < 0.0 {
            return Err(RejigError::Config(format!(
                "stagnation_epsilon must be finite and non-negative, got {}",
                self.stagnation_epsilon
            )));
        }
        Ok(())
    }
}

impl DetectorParams {
    pub fn validate(&self) -> RjResult<()> {
        if self.min_piece_size == 0 {
            return Err(RejigError::Config(
                "min_piece_size must be at least 1".into(),
            ));
        }
        if self.min_piece_size > self.max_piece_size {
            return Err(RejigError::Config(format!(
                "min_piece_size ({}) exceeds max_piece_size ({})",
                self.min_piece_size, self.max_piece_size
            )));
        }
        if !(0.0..=1.0).contains(&self.min_mutual_ratio) {
            return Err(RejigError::Config(format!(
                "min_mutual_ratio must be within [0, 1], got {}",
                self.min_mutual_ratio
            )));
        }
        Ok(())
    }
}
