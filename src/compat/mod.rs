pub mod buddies;

pub use buddies::{BestBuddy, BestBuddyIndex};

use crate::pieces::{Direction, Piece, PieceId, PieceSet};
use rayon::prelude::*;

/// Pluggable edge dissimilarity measure.
///
/// `score(a, dir, b)` estimates the visual discontinuity if `b` were placed
/// in `dir` of `a`. Implementations must be finite, non-negative, and
/// consistent under direction inversion.
pub trait EdgeScorer: Send + Sync {
    fn score(&self, a: &Piece, dir: Direction, b: &Piece) -> f32;
}

/// Sum of squared per-channel differences between facing border pixels.
pub struct SquaredDifference;

impl EdgeScorer for SquaredDifference {
    fn score(&self, a: &Piece, dir: Direction, b: &Piece) -> f32 {
        let near = a.edge(dir);
        let far = b.edge(dir.opposite());
        near.iter()
            .zip(far.iter())
            .map(|(pa, pb)| {
                pa.iter()
                    .zip(pb.iter())
                    .map(|(&ca, &cb)| {
                        let d = f32::from(ca) - f32::from(cb);
                        d * d
                    })
                    .sum::<f32>()
            })
            .sum()
    }
}

/// Dense pairwise dissimilarity cache.
///
/// Only Right and Down are stored; Left and Up resolve by operand swap, so
/// `cost(a, Right, b) == cost(b, Left, a)` holds by construction. Built once
/// per piece set and read-only afterward, safe for concurrent reads.
pub struct CompatibilityTable {
    n: usize,
    right: Vec<f32>,
    down: Vec<f32>,
}

impl CompatibilityTable {
    pub fn build(set: &PieceSet, scorer: &dyn EdgeScorer) -> Self {
        let n = set.len();
        let fill = |dir: Direction| -> Vec<f32> {
            let mut table = vec![0.0f32; n * n];
            table.par_chunks_mut(n).enumerate().for_each(|(a, row)| {
                let pa = set.get(a as PieceId);
                for (b, slot) in row.iter_mut().enumerate() {
                    if a != b {
                        *slot = scorer.score(pa, dir, set.get(b as PieceId));
                    }
                }
            });
            table
        };

        Self {
            n,
            right: fill(Direction::Right),
            down: fill(Direction::Down),
        }
    }

    /// Number of pieces covered by the table.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Dissimilarity if `b` were placed in `dir` of `a`.
    #[inline]
    pub fn cost(&self, a: PieceId, dir: Direction, b: PieceId) -> f32 {
        let (a, b) = (a as usize, b as usize);
        match dir {
            Direction::Right => self.right[a * self.n + b],
            Direction::Left => self.right[b * self.n + a],
            Direction::Down => self.down[a * self.n + b],
            Direction::Up => self.down[b * self.n + a],
        }
    }
}
