pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod runner;

pub use runner::{
    EngineOptions, GeneticEngine, GenerationStats, ProgressCallback, SilentProgress,
    SolveOutcome, StopReason,
};

use crate::compat::{BestBuddyIndex, CompatibilityTable};
use crate::pieces::{Direction, PieceId};
use rayon::prelude::*;

/// One candidate arrangement: a bijective mapping from grid position
/// (reading order) to piece id, with a cached fitness value.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    rows: usize,
    cols: usize,
    placement: Vec<PieceId>,
    fitness: Option<f32>,
}

impl Chromosome {
    pub fn new(rows: usize, cols: usize, placement: Vec<PieceId>) -> Self {
        debug_assert_eq!(placement.len(), rows * cols);
        debug_assert!(is_bijection(&placement));
        Self {
            rows,
            cols,
            placement,
            fitness: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn placement(&self) -> &[PieceId] {
        &self.placement
    }

    #[inline]
    pub fn piece_at(&self, row: usize, col: usize) -> PieceId {
        self.placement[row * self.cols + col]
    }

    /// Cached fitness; `None` until evaluated or after any change.
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    /// Inverse mapping: `positions()[piece] == grid index`.
    pub fn positions(&self) -> Vec<usize> {
        let mut pos = vec![0usize; self.placement.len()];
        for (idx, &piece) in self.placement.iter().enumerate() {
            pos[piece as usize] = idx;
        }
        pos
    }

    /// Total edge dissimilarity over all horizontally and vertically
    /// adjacent placed pairs.
    pub fn total_cost(&self, table: &CompatibilityTable) -> f32 {
        let mut total = 0.0f32;
        for r in 0..self.rows {
            for c in 0..self.cols - 1 {
                total += table.cost(self.piece_at(r, c), Direction::Right, self.piece_at(r, c + 1));
            }
        }
        for r in 0..self.rows - 1 {
            for c in 0..self.cols {
                total += table.cost(self.piece_at(r, c), Direction::Down, self.piece_at(r + 1, c));
            }
        }
        total
    }

    /// Evaluates and caches fitness: the negative total cost, so higher
    /// is better and 0 is perfect continuity.
    pub fn evaluate(&mut self, table: &CompatibilityTable) -> f32 {
        if self.fitness.is_none() {
            self.fitness = Some(-self.total_cost(table));
        }
        self.fitness.unwrap_or(f32::MIN)
    }

    /// Diagnostic only: fraction of adjacent placed pairs that are mutual
    /// best buddies. Reported and used for termination insight, never
    /// optimized against.
    pub fn buddy_ratio(&self, buddies: &BestBuddyIndex) -> f32 {
        let mut mutual = 0usize;
        let mut total = 0usize;
        for r in 0..self.rows {
            for c in 0..self.cols - 1 {
                total += 1;
                let bb = buddies.get(self.piece_at(r, c), Direction::Right);
                if bb.mutual && bb.neighbor == self.piece_at(r, c + 1) {
                    mutual += 1;
                }
            }
        }
        for r in 0..self.rows - 1 {
            for c in 0..self.cols {
                total += 1;
                let bb = buddies.get(self.piece_at(r, c), Direction::Down);
                if bb.mutual && bb.neighbor == self.piece_at(r + 1, c) {
                    mutual += 1;
                }
            }
        }
        mutual as f32 / total as f32
    }

    /// Swaps the pieces at two grid indices, invalidating cached fitness.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.placement.swap(i, j);
        self.fitness = None;
    }
}

fn is_bijection(placement: &[PieceId]) -> bool {
    let mut seen = vec![false; placement.len()];
    for &p in placement {
        let idx = p as usize;
        if idx >= seen.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// A fixed-size generation of chromosomes, sorted best-first after
/// evaluation.
pub struct Population {
    members: Vec<Chromosome>,
}

impl Population {
    pub fn new(members: Vec<Chromosome>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    pub fn best(&self) -> &Chromosome {
        &self.members[0]
    }

    /// Evaluates every member in parallel, then sorts best-first.
    /// Evaluation is pure, so the worker pool never affects results; the
    /// stable sort keeps equal-fitness ordering deterministic.
    pub fn evaluate(&mut self, table: &CompatibilityTable) {
        self.members.par_iter_mut().for_each(|c| {
            c.evaluate(table);
        });
        self.members
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
    }

    pub fn mean_fitness(&self) -> f32 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.members.iter().filter_map(|c| c.fitness).sum();
        sum / self.members.len() as f32
    }

    /// Rank-biased tournament: draws `k` members and keeps the best
    /// ranked one. Assumes the population is sorted best-first.
    pub fn tournament_select(&self, k: usize, rng: &mut fastrand::Rng) -> &Chromosome {
        let mut winner = rng.usize(0..self.members.len());
        for _ in 1..k {
            let challenger = rng.usize(0..self.members.len());
            if challenger < winner {
                winner = challenger;
            }
        }
        &self.members[winner]
    }
}
