use crate::compat::{BestBuddyIndex, CompatibilityTable, EdgeScorer};
use crate::config::DetectorParams;
use crate::error::{RejigError, RjResult};
use crate::pieces::PieceSet;
use crate::raster::Raster;
use rayon::prelude::*;
use tracing::debug;

/// One scored piece-size trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeCandidate {
    pub piece_size: usize,
    pub rows: usize,
    pub cols: usize,
    pub mutual_ratio: f32,
}

/// Square sizes in `[min, max]` that divide both image dimensions and
/// yield a solvable grid (at least 4 pieces).
pub fn candidate_sizes(width: usize, height: usize, min: usize, max: usize) -> Vec<usize> {
    (min.max(1)..=max)
        .filter(|&s| width % s == 0 && height % s == 0)
        .filter(|&s| (width / s) * (height / s) >= 4)
        .collect()
}

/// Determines the piece size of a scrambled image from pixel evidence.
///
/// Every candidate trial is a pure function (provisional piece set, cost
/// table, buddy index, ratio); trials run in parallel and a sequential fold
/// picks the winner. Ties prefer the coarsest cut, since over-fine candidates
/// artificially inflate the mutual-buddy ratio.
pub fn detect_piece_size(
    raster: &Raster,
    params: &DetectorParams,
    scorer: &dyn EdgeScorer,
) -> RjResult<SizeCandidate> {
    let candidates = candidate_sizes(
        raster.width(),
        raster.height(),
        params.min_piece_size,
        params.max_piece_size,
    );
    if candidates.is_empty() {
        return Err(RejigError::InvalidImageDimensions(format!(
            "no piece size in {}..={} divides a {}x{} image into a grid",
            params.min_piece_size,
            params.max_piece_size,
            raster.width(),
            raster.height()
        )));
    }

    let trials: Vec<SizeCandidate> = candidates
        .par_iter()
        .map(|&size| score_candidate(raster, size, scorer))
        .collect::<RjResult<Vec<_>>>()?;

    let mut best = trials[0];
    for &trial in &trials[1..] {
        debug!(
            piece_size = trial.piece_size,
            mutual_ratio = trial.mutual_ratio,
            "size candidate scored"
        );
        if trial.mutual_ratio > best.mutual_ratio
            || (trial.mutual_ratio == best.mutual_ratio && trial.piece_size > best.piece_size)
        {
            best = trial;
        }
    }

    if best.mutual_ratio < params.min_mutual_ratio {
        return Err(RejigError::SizeDetectionFailed(format!(
            "best candidate ({} px) scored {:.3}, below the acceptance threshold {:.3}",
            best.piece_size, best.mutual_ratio, params.min_mutual_ratio
        )));
    }

    debug!(
        piece_size = best.piece_size,
        rows = best.rows,
        cols = best.cols,
        mutual_ratio = best.mutual_ratio,
        "piece size detected"
    );
    Ok(best)
}

fn score_candidate(
    raster: &Raster,
    piece_size: usize,
    scorer: &dyn EdgeScorer,
) -> RjResult<SizeCandidate> {
    let set = PieceSet::extract(raster, piece_size)?;
    let table = CompatibilityTable::build(&set, scorer);
    let buddies = BestBuddyIndex::build(&table);
    Ok(SizeCandidate {
        piece_size,
        rows: set.rows(),
        cols: set.cols(),
        mutual_ratio: buddies.mutual_ratio(),
    })
}
