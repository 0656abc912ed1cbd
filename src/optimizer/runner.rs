use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::compat::{BestBuddyIndex, CompatibilityTable};
use crate::config::SolverParams;
use crate::error::{RejigError, RjResult};
use crate::optimizer::crossover::best_buddy_crossover;
use crate::optimizer::initialization::seed_population;
use crate::optimizer::mutation::swap_mutation;
use crate::optimizer::{Chromosome, Population};
use crate::pieces::PieceId;

/// Full run configuration for one engine invocation.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub solver: SolverParams,
    pub seed: u64,
    pub max_time: Option<Duration>,
}

impl From<&SolverParams> for EngineOptions {
    fn from(solver: &SolverParams) -> Self {
        Self {
            solver: solver.clone(),
            seed: 0,
            max_time: None,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> RjResult<()> {
        self.solver.validate()
    }
}

/// Per-generation run telemetry, also recorded as run history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f32,
    pub best_ever: f32,
    pub mean_fitness: f32,
    pub buddy_ratio: f32,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum StopReason {
    GenerationLimit,
    Stagnated,
    Cancelled,
    TimedOut,
}

/// Receives per-generation telemetry. Returning false cancels the run
/// after the current generation.
pub trait ProgressCallback: Send {
    fn on_generation(&mut self, stats: &GenerationStats) -> bool;
}

/// Callback that reports nothing and never cancels.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation(&mut self, _stats: &GenerationStats) -> bool {
        true
    }
}

/// Result of a finished run. `best` is the fittest arrangement seen across
/// ALL generations, not necessarily a member of the final one.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub best: Vec<PieceId>,
    pub best_fitness: f32,
    pub buddy_ratio: f32,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub history: Vec<GenerationStats>,
}

/// Generational loop: elitism, tournament selection, best-buddy crossover,
/// swap mutation, stagnation tracking.
///
/// All randomness flows through one sequential rng seeded from the options,
/// so a (seed, options, table) triple fully determines the outcome. The
/// thread pool only evaluates fitness, which is pure.
pub struct GeneticEngine<'a> {
    rows: usize,
    cols: usize,
    table: &'a CompatibilityTable,
    buddies: &'a BestBuddyIndex,
    options: EngineOptions,
}

impl<'a> GeneticEngine<'a> {
    pub fn new(
        rows: usize,
        cols: usize,
        table: &'a CompatibilityTable,
        buddies: &'a BestBuddyIndex,
        options: EngineOptions,
    ) -> RjResult<Self> {
        options.validate()?;
        if rows * cols != table.len() {
            return Err(RejigError::Config(format!(
                "{}x{} grid does not match the {}-piece compatibility table",
                rows,
                cols,
                table.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            table,
            buddies,
            options,
        })
    }

    pub fn run(&self, progress: &mut dyn ProgressCallback) -> SolveOutcome {
        let params = &self.options.solver;
        let mut rng = fastrand::Rng::with_seed(self.options.seed);
        let started = Instant::now();

        let mut population = seed_population(
            self.rows,
            self.cols,
            params.population_size,
            self.table,
            self.buddies,
            &mut rng,
        );
        population.evaluate(self.table);

        let mut best_ever: Chromosome = population.best().clone();
        let mut best_ever_fitness = best_ever.fitness().unwrap_or(f32::MIN);

        let mut history = Vec::with_capacity(params.generations);
        let mut stop_reason = StopReason::GenerationLimit;
        let mut generations_run = 0;
        let mut stagnant_generations = 0;

        for generation in 1..=params.generations {
            population = self.breed(&population, &mut rng);
            population.evaluate(self.table);
            generations_run = generation;

            let best = population.best();
            let best_fitness = best.fitness().unwrap_or(f32::MIN);

            if best_fitness > best_ever_fitness + params.stagnation_epsilon {
                stagnant_generations = 0;
            } else {
                stagnant_generations += 1;
            }
            if best_fitness > best_ever_fitness {
                best_ever = best.clone();
                best_ever_fitness = best_fitness;
            }

            let stats = GenerationStats {
                generation,
                best_fitness,
                best_ever: best_ever_fitness,
                mean_fitness: population.mean_fitness(),
                buddy_ratio: best.buddy_ratio(self.buddies),
            };
            debug!(
                generation,
                best_fitness = stats.best_fitness,
                mean_fitness = stats.mean_fitness,
                buddy_ratio = stats.buddy_ratio,
                "generation evaluated"
            );
            history.push(stats);

            if !progress.on_generation(&stats) {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if stagnant_generations >= params.stagnation_window {
                stop_reason = StopReason::Stagnated;
                break;
            }
            if let Some(limit) = self.options.max_time {
                if started.elapsed() >= limit {
                    stop_reason = StopReason::TimedOut;
                    break;
                }
            }
        }

        SolveOutcome {
            buddy_ratio: best_ever.buddy_ratio(self.buddies),
            best: best_ever.placement().to_vec(),
            best_fitness: best_ever_fitness,
            generations_run,
            stop_reason,
            history,
        }
    }

    /// Next generation: elites verbatim, the rest from tournament parents
    /// via crossover (or cloning) plus mutation.
    fn breed(&self, population: &Population, rng: &mut fastrand::Rng) -> Population {
        let params = &self.options.solver;
        let mut next: Vec<Chromosome> = Vec::with_capacity(params.population_size);
        next.extend_from_slice(&population.members()[..params.elitism_count]);

        while next.len() < params.population_size {
            let parent_a = population.tournament_select(params.tournament_size, rng);
            let mut child = if rng.f32() < params.crossover_rate {
                let parent_b = population.tournament_select(params.tournament_size, rng);
                best_buddy_crossover(parent_a, parent_b, self.table, self.buddies, rng)
            } else {
                parent_a.clone()
            };
            swap_mutation(&mut child, params.mutation_rate, params.mutation_swaps, rng);
            next.push(child);
        }

        Population::new(next)
    }
}
