use crate::compat::CompatibilityTable;
use crate::pieces::{Direction, PieceId};
use rayon::prelude::*;
use strum::IntoEnumIterator;

/// Most compatible neighbor of a piece in one direction. `mutual` is true
/// iff the neighbor's best choice in the opposite direction points back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestBuddy {
    pub neighbor: PieceId,
    pub mutual: bool,
}

/// Per-piece, per-direction best-match table. Built once per piece set in
/// O(n^2) pairwise comparisons and read-only afterward.
pub struct BestBuddyIndex {
    n: usize,
    entries: Vec<BestBuddy>,
}

impl BestBuddyIndex {
    pub fn build(table: &CompatibilityTable) -> Self {
        let n = table.len();
        debug_assert!(n >= 2);

        // Best neighbor per (piece, direction); ties break toward the
        // lowest id so runs stay reproducible.
        let neighbors: Vec<[PieceId; Direction::COUNT]> = (0..n as PieceId)
            .into_par_iter()
            .map(|a| {
                let mut row = [0 as PieceId; Direction::COUNT];
                for dir in Direction::iter() {
                    let mut best = if a == 0 { 1 } else { 0 } as PieceId;
                    let mut best_cost = table.cost(a, dir, best);
                    for b in 0..n as PieceId {
                        if b == a {
                            continue;
                        }
                        let cost = table.cost(a, dir, b);
                        if cost < best_cost {
                            best = b;
                            best_cost = cost;
                        }
                    }
                    row[dir.index()] = best;
                }
                row
            })
            .collect();

        let mut entries = Vec::with_capacity(n * Direction::COUNT);
        for (a, row) in neighbors.iter().enumerate() {
            for dir in Direction::iter() {
                let neighbor = row[dir.index()];
                let back = neighbors[neighbor as usize][dir.opposite().index()];
                entries.push(BestBuddy {
                    neighbor,
                    mutual: back as usize == a,
                });
            }
        }

        Self { n, entries }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, id: PieceId, dir: Direction) -> BestBuddy {
        self.entries[id as usize * Direction::COUNT + dir.index()]
    }

    /// Fraction of (piece, direction) entries whose relation is mutual.
    /// This is the detector's score signal.
    pub fn mutual_ratio(&self) -> f32 {
        let mutual = self.entries.iter().filter(|e| e.mutual).count();
        mutual as f32 / self.entries.len() as f32
    }
}
