use crate::compat::{BestBuddyIndex, CompatibilityTable};
use crate::optimizer::Chromosome;
use crate::pieces::{Direction, PieceId};
use strum::IntoEnumIterator;

const UNSET: PieceId = PieceId::MAX;

/// Grows a child arrangement outward from a random seed position, one
/// frontier cell at a time. Each cell is resolved by the first applicable
/// rule:
///
/// 1. both parents place the same piece against a filled neighbor
/// 2. a filled neighbor has an unused mutual best buddy on the open side
/// 3. the cheapest unused piece against all filled neighbors
///
/// The result is always a valid permutation sharing structure with both
/// parents where they agree.
pub fn best_buddy_crossover(
    parent_a: &Chromosome,
    parent_b: &Chromosome,
    table: &CompatibilityTable,
    buddies: &BestBuddyIndex,
    rng: &mut fastrand::Rng,
) -> Chromosome {
    let (rows, cols) = (parent_a.rows(), parent_a.cols());
    debug_assert_eq!((rows, cols), (parent_b.rows(), parent_b.cols()));
    let n = rows * cols;

    let pos_a = parent_a.positions();
    let pos_b = parent_b.positions();

    let mut placement = vec![UNSET; n];
    let mut used = vec![false; n];
    let mut frontier: Vec<usize> = Vec::new();
    let mut queued = vec![false; n];

    // Seed: copy one placement of a coin-flipped parent at a random position.
    let seed_pos = rng.usize(0..n);
    let seed_parent = if rng.bool() { parent_a } else { parent_b };
    let seed_piece = seed_parent.placement()[seed_pos];
    placement[seed_pos] = seed_piece;
    used[seed_piece as usize] = true;
    push_open_neighbors(seed_pos, rows, cols, &placement, &mut frontier, &mut queued);

    while let Some(pos) = take_random(&mut frontier, rng) {
        let anchors = filled_anchors(pos, rows, cols, &placement);
        debug_assert!(!anchors.is_empty());

        let piece = agreed_piece(&anchors, &pos_a, &pos_b, parent_a, parent_b, &used)
            .or_else(|| mutual_buddy(&anchors, buddies, &used))
            .unwrap_or_else(|| cheapest_unused(&anchors, table, &used));

        placement[pos] = piece;
        used[piece as usize] = true;
        push_open_neighbors(pos, rows, cols, &placement, &mut frontier, &mut queued);
    }

    // Connected growth fills the grid; sweep in reading order if the
    // frontier ever ran dry regardless.
    for pos in 0..n {
        if placement[pos] == UNSET {
            let piece = (0..n as PieceId)
                .find(|&id| !used[id as usize])
                .unwrap_or(0);
            placement[pos] = piece;
            used[piece as usize] = true;
        }
    }

    Chromosome::new(rows, cols, placement)
}

/// Filled neighbors of an open position, as (neighbor piece, direction from
/// the open position toward the neighbor). Fixed iteration order keeps
/// rule resolution deterministic for a given rng stream.
fn filled_anchors(
    pos: usize,
    rows: usize,
    cols: usize,
    placement: &[PieceId],
) -> Vec<(PieceId, Direction)> {
    Direction::iter()
        .filter_map(|dir| {
            let q = neighbor_index(pos, dir, rows, cols)?;
            (placement[q] != UNSET).then(|| (placement[q], dir))
        })
        .collect()
}

fn neighbor_index(pos: usize, dir: Direction, rows: usize, cols: usize) -> Option<usize> {
    let (r, c) = (pos / cols, pos % cols);
    match dir {
        Direction::Right => (c + 1 < cols).then(|| pos + 1),
        Direction::Left => (c > 0).then(|| pos - 1),
        Direction::Down => (r + 1 < rows).then(|| pos + cols),
        Direction::Up => (r > 0).then(|| pos - cols),
    }
}

/// Rule 1: a piece both parents place on the open side of the same anchor.
fn agreed_piece(
    anchors: &[(PieceId, Direction)],
    pos_a: &[usize],
    pos_b: &[usize],
    parent_a: &Chromosome,
    parent_b: &Chromosome,
    used: &[bool],
) -> Option<PieceId> {
    for &(anchor, dir) in anchors {
        // The open cell sits opposite `dir` relative to the anchor.
        let side = dir.opposite();
        let from_a = parent_neighbor(anchor, side, pos_a, parent_a);
        let from_b = parent_neighbor(anchor, side, pos_b, parent_b);
        if let (Some(pa), Some(pb)) = (from_a, from_b) {
            if pa == pb && !used[pa as usize] {
                return Some(pa);
            }
        }
    }
    None
}

/// The piece a parent places in `side` of `anchor`, if any.
fn parent_neighbor(
    anchor: PieceId,
    side: Direction,
    positions: &[usize],
    parent: &Chromosome,
) -> Option<PieceId> {
    let pos = positions[anchor as usize];
    let q = neighbor_index(pos, side, parent.rows(), parent.cols())?;
    Some(parent.placement()[q])
}

/// Rule 2: an anchor's unused mutual best buddy on the open side.
fn mutual_buddy(
    anchors: &[(PieceId, Direction)],
    buddies: &BestBuddyIndex,
    used: &[bool],
) -> Option<PieceId> {
    for &(anchor, dir) in anchors {
        let bb = buddies.get(anchor, dir.opposite());
        if bb.mutual && !used[bb.neighbor as usize] {
            return Some(bb.neighbor);
        }
    }
    None
}

/// Rule 3: minimum summed cost against every anchor, ascending-id ties.
fn cheapest_unused(
    anchors: &[(PieceId, Direction)],
    table: &CompatibilityTable,
    used: &[bool],
) -> PieceId {
    let mut best: Option<(PieceId, f32)> = None;
    for candidate in 0..used.len() as PieceId {
        if used[candidate as usize] {
            continue;
        }
        let cost: f32 = anchors
            .iter()
            .map(|&(anchor, dir)| table.cost(anchor, dir.opposite(), candidate))
            .sum();
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((candidate, cost)),
        }
    }
    best.map(|(id, _)| id).unwrap_or(0)
}

fn push_open_neighbors(
    pos: usize,
    rows: usize,
    cols: usize,
    placement: &[PieceId],
    frontier: &mut Vec<usize>,
    queued: &mut [bool],
) {
    for dir in Direction::iter() {
        if let Some(q) = neighbor_index(pos, dir, rows, cols) {
            if placement[q] == UNSET && !queued[q] {
                queued[q] = true;
                frontier.push(q);
            }
        }
    }
}

fn take_random(frontier: &mut Vec<usize>, rng: &mut fastrand::Rng) -> Option<usize> {
    if frontier.is_empty() {
        return None;
    }
    let idx = rng.usize(0..frontier.len());
    Some(frontier.swap_remove(idx))
}
