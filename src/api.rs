use std::time::Duration;

use tracing::info;

use crate::compat::{BestBuddyIndex, CompatibilityTable, SquaredDifference};
use crate::config::Config;
use crate::detect::detect_piece_size;
use crate::error::RjResult;
use crate::optimizer::{EngineOptions, GeneticEngine, ProgressCallback, SolveOutcome};
use crate::pieces::{PieceId, PieceSet};
use crate::raster::Raster;

/// A finished reconstruction: the winning arrangement plus enough context
/// to render it and explain how the run went.
pub struct Solution {
    pub pieces: PieceSet,
    pub outcome: SolveOutcome,
    pub piece_size: usize,
    pub rows: usize,
    pub cols: usize,
    pub detected: bool,
}

impl Solution {
    /// Composites the best arrangement back into an image.
    pub fn render(&self) -> Raster {
        self.pieces.assemble(&self.outcome.best)
    }
}

/// End-to-end reconstruction of a scrambled raster.
///
/// When `piece_size` is `None` it is detected from pixel evidence first.
/// The same compatibility measure drives detection, crossover guidance,
/// and fitness.
pub fn solve(
    raster: &Raster,
    piece_size: Option<usize>,
    config: &Config,
    seed: u64,
    max_time: Option<Duration>,
    progress: &mut dyn ProgressCallback,
) -> RjResult<Solution> {
    config.validate()?;
    let scorer = SquaredDifference;

    let (piece_size, detected) = match piece_size {
        Some(size) => (size, false),
        None => {
            let candidate = detect_piece_size(raster, &config.detector, &scorer)?;
            (candidate.piece_size, true)
        }
    };

    let pieces = PieceSet::extract(raster, piece_size)?;
    info!(
        piece_size,
        rows = pieces.rows(),
        cols = pieces.cols(),
        detected,
        "puzzle extracted"
    );

    let table = CompatibilityTable::build(&pieces, &scorer);
    let buddies = BestBuddyIndex::build(&table);

    let options = EngineOptions {
        solver: config.solver.clone(),
        seed,
        max_time,
    };
    let engine = GeneticEngine::new(pieces.rows(), pieces.cols(), &table, &buddies, options)?;
    let outcome = engine.run(progress);
    info!(
        generations = outcome.generations_run,
        stop_reason = %outcome.stop_reason,
        best_fitness = outcome.best_fitness,
        buddy_ratio = outcome.buddy_ratio,
        "run finished"
    );

    Ok(Solution {
        rows: pieces.rows(),
        cols: pieces.cols(),
        pieces,
        outcome,
        piece_size,
        detected,
    })
}

/// Cuts a raster into square pieces and reassembles them in a seeded
/// random order. The counterpart of `solve`, for producing test puzzles.
pub fn scramble(raster: &Raster, piece_size: usize, seed: u64) -> RjResult<Raster> {
    let pieces = PieceSet::extract(raster, piece_size)?;
    let mut placement: Vec<PieceId> = (0..pieces.len() as PieceId).collect();
    fastrand::Rng::with_seed(seed).shuffle(&mut placement);
    Ok(pieces.assemble(&placement))
}
